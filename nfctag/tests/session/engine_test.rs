#[path = "../common/mod.rs"]
mod common;

use std::thread;
use std::time::Duration;

use nfctag::Error;
use nfctag::session::{Completion, Engine, Event, Outcome, SessionState};
use nfctag::transport::mock::MockBackend;

#[test]
fn engine_write_publishes_events() -> anyhow::Result<()> {
    let backend = MockBackend::new();
    backend.present(common::fixtures::blank_tag(0));
    let (session, rx) = common::helpers::observed_session(&backend);
    let mut engine = Engine::new(session);

    engine.write("example.com", 1, false)?;
    match engine.join() {
        Some(Completion::Write(Ok(report))) => assert!(report.is_complete()),
        other => panic!("unexpected completion: {:?}", other),
    }
    assert_eq!(engine.state(), SessionState::Idle);

    let events = common::helpers::drain(&rx);
    assert!(events.contains(&Event::State(SessionState::Processing)));
    assert!(events.contains(&Event::Progress { current: 1, total: 1 }));
    assert_eq!(events.last(), Some(&Event::State(SessionState::Idle)));
    Ok(())
}

#[test]
fn engine_rejects_second_operation() -> anyhow::Result<()> {
    let backend = MockBackend::new();
    let (session, _rx) = common::helpers::observed_session(&backend);
    let mut engine = Engine::new(session);

    engine.start_scan()?;
    assert!(matches!(engine.write("example.com", 1, false), Err(Error::Busy)));
    engine.stop();
    match engine.join() {
        Some(Completion::Scan(Ok(outcome))) => {
            assert!(matches!(outcome, Outcome::Stopped | Outcome::TimedOut))
        }
        other => panic!("unexpected completion: {:?}", other),
    }
    assert!(!engine.is_busy());
    Ok(())
}

#[test]
fn engine_validates_before_spawning() {
    let backend = MockBackend::new();
    let (session, _rx) = common::helpers::observed_session(&backend);
    let mut engine = Engine::new(session);
    assert!(matches!(engine.write("nope", 1, false), Err(Error::InvalidAddress(_))));
    assert!(matches!(engine.copy(0, false), Err(Error::InvalidQuantity(0))));
    assert!(engine.join().is_none());
}

#[test]
fn source_on_reader_is_never_written() -> anyhow::Result<()> {
    let backend = MockBackend::new();
    backend.present(common::fixtures::source_tag("https://example.com/menu"));
    let (session, rx) = common::helpers::observed_session(&backend);
    let mut engine = Engine::new(session);

    engine.read_source(None)?;
    assert!(matches!(engine.join(), Some(Completion::Source(Ok(_)))));

    // the source stays on the reader for the whole copy
    engine.copy(1, false)?;
    thread::sleep(Duration::from_millis(50));
    engine.stop();
    match engine.join() {
        Some(Completion::Copy(Ok(report))) => {
            assert_eq!(report.outcome, Outcome::Stopped);
            assert_eq!(report.written, 0);
        }
        other => panic!("unexpected completion: {:?}", other),
    }
    assert_eq!(backend.state().write_count(), 0);
    assert!(common::helpers::statuses(&rx)
        .contains(&"Source tag detected - Please use a different tag".to_string()));
    Ok(())
}
