// helpers.rs: session construction and event collection for tests

use std::sync::mpsc::Receiver;

use nfctag::session::{Callbacks, Event, EventChannel, TagSession};
use nfctag::test_support::{mock_session, quick_config};
use nfctag::transport::mock::MockBackend;

/// Route `log` output through env_logger; safe to call from every test.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Quick-timing session over `backend` whose events land in the receiver.
pub fn observed_session(backend: &MockBackend) -> (TagSession, Receiver<Event>) {
    init_logger();
    let (events, rx) = EventChannel::new();
    let session = mock_session(backend.clone(), quick_config(), Callbacks::from_channel(events));
    (session, rx)
}

pub fn statuses(rx: &Receiver<Event>) -> Vec<String> {
    rx.try_iter()
        .filter_map(|e| match e {
            Event::Status(s) => Some(s),
            _ => None,
        })
        .collect()
}

pub fn drain(rx: &Receiver<Event>) -> Vec<Event> {
    rx.try_iter().collect()
}
