#[path = "../common/mod.rs"]
mod common;

use nfctag::session::{Event, Outcome, SessionState};
use nfctag::transport::mock::{MockBackend, MockTag};

use common::fixtures::BLANK_UIDS;

#[test]
fn scan_reports_each_new_tag() -> anyhow::Result<()> {
    let backend = MockBackend::new();
    backend.present(MockTag::ntag213(&BLANK_UIDS[0]).with_user_data(&common::fixtures::example_com_dump()));
    backend.present_uid(&BLANK_UIDS[0]);
    backend.present(MockTag::ntag213(&BLANK_UIDS[1]).with_user_data(&common::fixtures::text_hi_dump()));
    let (mut session, rx) = common::helpers::observed_session(&backend);

    let outcome = session.scan()?;
    assert_eq!(outcome, Outcome::TimedOut);
    assert_eq!(session.state(), SessionState::TimedOut);

    let infos: Vec<String> = common::helpers::drain(&rx)
        .into_iter()
        .filter_map(|e| match e {
            Event::Info(s) => Some(s),
            _ => None,
        })
        .collect();
    assert_eq!(infos.len(), 2);
    assert!(infos[0].ends_with("Content:\nhttps://example.com"));
    assert!(infos[1].ends_with("Content:\nhi"));
    Ok(())
}

#[test]
fn scan_without_reader_fails() {
    let backend = MockBackend::with_readers(&[]);
    let (mut session, rx) = common::helpers::observed_session(&backend);
    assert!(session.scan().is_err());
    let statuses = common::helpers::statuses(&rx);
    assert!(statuses.contains(&"Reader not found - Please connect an NFC reader".to_string()));
}

#[test]
fn closure_sinks_receive_info_and_debug() -> anyhow::Result<()> {
    use std::sync::{Arc, Mutex};
    use nfctag::session::Callbacks;

    let backend = MockBackend::new();
    backend.present(MockTag::ntag213(&BLANK_UIDS[2]).with_user_data(&common::fixtures::example_com_dump()));
    let (mut session, _rx) = common::helpers::observed_session(&backend);

    let infos = Arc::new(Mutex::new(Vec::new()));
    let titles = Arc::new(Mutex::new(Vec::new()));
    let (i, t) = (Arc::clone(&infos), Arc::clone(&titles));
    session.set_callbacks(
        Callbacks::new()
            .on_info(move |s: &str| i.lock().unwrap().push(s.to_string()))
            .on_debug(move |title: &str, _: &str| t.lock().unwrap().push(title.to_string())),
    );
    let config = session.config().clone().with_scan_timeout(std::time::Duration::from_millis(50));
    session.set_config(config);
    session.device_mut().find_device()?;

    assert_eq!(session.scan()?, Outcome::TimedOut);
    assert_eq!(infos.lock().unwrap().len(), 1);
    assert!(infos.lock().unwrap()[0].contains("Tag Type: NTAG213"));
    assert_eq!(titles.lock().unwrap().first().map(String::as_str), Some("New tag detected"));
    Ok(())
}
