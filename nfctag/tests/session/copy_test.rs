#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use nfctag::Error;
use nfctag::ndef::{self, NdefContent};
use nfctag::session::Outcome;
use nfctag::transport::mock::{MockBackend, MockTag};

use common::fixtures::{BLANK_UIDS, SOURCE_UID};

#[test]
fn copy_source_to_two_blanks() -> anyhow::Result<()> {
    let backend = MockBackend::new();
    backend.present(common::fixtures::source_tag("https://example.com/menu"));
    let (mut session, rx) = common::helpers::observed_session(&backend);

    let source = session.read_source(None)?;
    assert_eq!(source.uid.as_bytes(), &SOURCE_UID);
    assert_eq!(source.content, Some(NdefContent::Uri("https://example.com/menu".into())));

    backend.present(common::fixtures::blank_tag(0));
    backend.present(common::fixtures::blank_tag(1));
    let report = session.copy_to_new_tags(2, false)?;
    assert_eq!(report.outcome, Outcome::Completed);
    assert_eq!(report.written, 2);

    for uid in &BLANK_UIDS[..2] {
        let memory = backend.tag(uid).expect("registered tag").user_data();
        assert_eq!(
            ndef::decode(&memory),
            Some(NdefContent::Uri("https://example.com/menu".into()))
        );
    }

    let statuses = common::helpers::statuses(&rx);
    assert!(statuses.contains(
        &"Ready to copy URL: https://example.com/menu\nPlease present first target tag...".to_string()
    ));
    Ok(())
}

#[test]
fn raw_source_cannot_be_copied() -> anyhow::Result<()> {
    // a complete NDEF block holding an external type record only
    let mut raw = vec![0x03, 0x0A, 0xD4, 0x03, 0x04];
    raw.extend_from_slice(b"a:b");
    raw.extend_from_slice(b"data");
    raw.push(0xFE);
    let backend = MockBackend::new();
    backend.present(MockTag::ntag213(&SOURCE_UID).with_user_data(&raw));
    let (mut session, rx) = common::helpers::observed_session(&backend);

    let source = session.read_source(None)?;
    assert_eq!(source.content, None);

    assert!(matches!(
        session.copy_to_new_tags(1, false),
        Err(Error::NoSourceContent)
    ));
    let statuses = common::helpers::statuses(&rx);
    assert!(statuses.contains(&"Error: Could not extract URL from source tag".to_string()));
    Ok(())
}

#[test]
fn copy_without_source() {
    let backend = MockBackend::new();
    let (mut session, _rx) = common::helpers::observed_session(&backend);
    assert!(matches!(
        session.copy_to_new_tags(1, false),
        Err(Error::NoSourceContent)
    ));
}

#[test]
fn reset_source_forgets_capture() -> anyhow::Result<()> {
    let backend = MockBackend::new();
    backend.present(common::fixtures::source_tag("https://example.com"));
    let (mut session, _rx) = common::helpers::observed_session(&backend);
    session.read_source(None)?;
    assert!(session.source().is_some());

    session.reset_source();
    assert!(session.source().is_none());
    assert!(matches!(
        session.copy_to_new_tags(1, false),
        Err(Error::NoSourceContent)
    ));
    Ok(())
}

#[test]
fn unreadable_source_is_reported_once() {
    let backend = MockBackend::new();
    backend.present(MockTag::ntag213(&SOURCE_UID).with_user_data(&[0xAA; 16]));
    let (mut session, rx) = common::helpers::observed_session(&backend);

    let r = session.read_source(Some(Duration::from_millis(60)));
    assert!(matches!(r, Err(Error::Timeout)));

    let errors: Vec<String> = common::helpers::statuses(&rx)
        .into_iter()
        .filter(|s| s.starts_with("Error:"))
        .collect();
    assert_eq!(errors.len(), 1, "reported: {:?}", errors);
}

#[test]
fn ftp_source_keeps_its_prefix_code() -> anyhow::Result<()> {
    // URI record, identifier code 0x0C (ftp://)
    let raw = hex::decode(format!("0316d10112550c{}fe", hex::encode("files.example.com")))?;
    let backend = MockBackend::new();
    backend.present(MockTag::ntag213(&SOURCE_UID).with_user_data(&raw));
    let (mut session, _rx) = common::helpers::observed_session(&backend);

    let source = session.read_source(None)?;
    assert_eq!(source.content, Some(NdefContent::Uri("ftp://files.example.com".into())));

    backend.present(common::fixtures::blank_tag(0));
    let report = session.copy_to_new_tags(1, false)?;
    assert_eq!(report.written, 1);

    let memory = backend.tag(&BLANK_UIDS[0]).expect("registered tag").user_data();
    assert_eq!(&memory[..raw.len()], raw.as_slice());
    Ok(())
}
