#[path = "../common/mod.rs"]
mod common;

use nfctag::Error;
use nfctag::ndef;
use nfctag::session::{Event, Outcome};
use nfctag::transport::mock::MockBackend;

use common::fixtures::BLANK_UIDS;

#[test]
fn batch_write_three_tags() -> anyhow::Result<()> {
    let backend = MockBackend::new();
    for i in 0..3 {
        backend.present(common::fixtures::blank_tag(i));
    }
    let (mut session, rx) = common::helpers::observed_session(&backend);

    let report = session.batch_write("example.com/menu", 3, false)?;
    assert_eq!(report.written, 3);
    assert_eq!(report.outcome, Outcome::Completed);

    for uid in &BLANK_UIDS {
        let memory = backend.tag(uid).expect("registered tag").user_data();
        assert_eq!(
            ndef::decode(&memory).map(|c| c.into_string()),
            Some("https://example.com/menu".to_string())
        );
    }

    let events = common::helpers::drain(&rx);
    let progress: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, Event::Progress { .. }))
        .cloned()
        .collect();
    assert_eq!(
        progress,
        vec![
            Event::Progress { current: 0, total: 3 },
            Event::Progress { current: 1, total: 3 },
            Event::Progress { current: 2, total: 3 },
            Event::Progress { current: 3, total: 3 },
        ]
    );
    assert!(events.contains(&Event::Status("Successfully wrote 3 tags".into())));
    assert_eq!(session.history().latest(), Some("https://example.com/menu"));
    Ok(())
}

#[test]
fn invalid_input_touches_no_tag() {
    let backend = MockBackend::new();
    backend.present(common::fixtures::blank_tag(0));
    let (mut session, rx) = common::helpers::observed_session(&backend);

    assert!(matches!(
        session.batch_write("not an address", 1, false),
        Err(Error::InvalidAddress(_))
    ));
    assert!(matches!(
        session.batch_write("example.com", 0, false),
        Err(Error::InvalidQuantity(0))
    ));
    assert_eq!(backend.state().write_count(), 0);

    let statuses = common::helpers::statuses(&rx);
    assert!(statuses.contains(&"Error: The URL format appears to be invalid".to_string()));
    assert!(statuses.contains(&"Error: Quantity must be at least 1".to_string()));
}

#[test]
fn stop_ends_batch_early() -> anyhow::Result<()> {
    let backend = MockBackend::new();
    backend.present(common::fixtures::blank_tag(0));
    let (mut session, _rx) = common::helpers::observed_session(&backend);
    session.stop_handle().stop();

    let report = session.batch_write("https://example.com", 2, false)?;
    assert_eq!(report.outcome, Outcome::Stopped);
    assert!(!report.is_complete());
    Ok(())
}
