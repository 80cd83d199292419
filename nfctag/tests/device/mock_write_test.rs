#[path = "../common/mod.rs"]
mod common;

use nfctag::constants::{CC_PAGE, LOCK_PAGE};
use nfctag::ndef::{self, NdefContent};
use nfctag::tag::{self, WriteOptions};
use nfctag::test_support::mock_device;
use nfctag::transport::mock::MockBackend;
use nfctag::Error;

use common::fixtures::BLANK_UIDS;

#[test]
fn write_then_decode_tag_memory() -> anyhow::Result<()> {
    common::helpers::init_logger();
    let backend = MockBackend::new();
    backend.present(common::fixtures::blank_tag(0));
    let mut device = mock_device(backend.clone());
    device.find_device()?;

    let mut channel = device.open_channel().expect("tag on reader");
    let report = tag::write(&mut channel, "https://example.com", &WriteOptions::default())?;
    assert!(report.verified);
    assert!(!report.locked);
    drop(channel);

    let written = backend.tag(&BLANK_UIDS[0]).expect("registered tag");
    assert_eq!(
        ndef::decode(&written.user_data()),
        Some(NdefContent::Uri("https://example.com".into()))
    );
    assert_eq!(&written.user_data()[..19], &common::fixtures::example_com_dump()[..]);
    Ok(())
}

#[test]
fn locking_write_sends_lock_last() -> anyhow::Result<()> {
    let backend = MockBackend::new();
    backend.present(common::fixtures::blank_tag(1));
    let mut device = mock_device(backend.clone());
    device.find_device()?;

    let mut channel = device.open_channel().expect("tag on reader");
    let report = tag::write(&mut channel, "https://example.com", &WriteOptions::locking(true))?;
    assert!(report.locked);
    drop(channel);

    let st = backend.state();
    let pages: Vec<u8> = st
        .sent
        .iter()
        .filter(|a| a.len() > 3 && a[..3] == [0xFF, 0xD6, 0x00])
        .map(|a| a[3])
        .collect();
    assert_eq!(pages.first(), Some(&CC_PAGE));
    assert_eq!(pages.last(), Some(&LOCK_PAGE));
    Ok(())
}

#[test]
fn locked_tag_rejects_write() -> anyhow::Result<()> {
    let backend = MockBackend::new();
    backend.present(common::fixtures::blank_tag(2).locked());
    let mut device = mock_device(backend);
    device.find_device()?;

    let mut channel = device.open_channel().expect("tag on reader");
    let r = tag::write(&mut channel, "https://example.com", &WriteOptions::default());
    assert!(matches!(r, Err(Error::NdefInit { .. })));
    Ok(())
}
