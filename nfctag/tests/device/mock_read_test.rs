#[path = "../common/mod.rs"]
mod common;

use nfctag::ndef::{self, NdefContent};
use nfctag::tag::{read_memory, read_tag};
use nfctag::test_support::mock_device;
use nfctag::transport::mock::{MockBackend, MockTag};
use nfctag::{ReadExtent, TagFamily};

use common::fixtures::{BLANK_UIDS, SOURCE_UID};

#[test]
fn read_source_tag_through_device() -> anyhow::Result<()> {
    common::helpers::init_logger();
    let backend = MockBackend::new();
    backend.present(common::fixtures::source_tag("https://example.com/menu"));
    let mut device = mock_device(backend);
    device.find_device()?;

    let mut channel = device.open_channel().expect("tag on reader");
    let memory = read_tag(&mut channel, ReadExtent::Extended).expect("readable tag");
    assert_eq!(memory.uid.as_bytes(), &SOURCE_UID);
    assert_eq!(memory.family(), TagFamily::Ntag215);
    assert_eq!(
        ndef::decode(&memory.data),
        Some(NdefContent::Uri("https://example.com/menu".into()))
    );
    Ok(())
}

#[test]
fn text_tag_with_lock_control() -> anyhow::Result<()> {
    let backend = MockBackend::new();
    backend.present(MockTag::ntag213(&BLANK_UIDS[0]).with_user_data(&common::fixtures::text_hi_dump()));
    let mut device = mock_device(backend);
    device.find_device()?;

    let mut channel = device.open_channel().expect("tag on reader");
    let data = read_memory(&mut channel, ReadExtent::Compact);
    // the terminator is not at a page start, so the read runs to page 40
    assert_eq!(data.len(), 36 * 4);
    assert!(data.starts_with(&common::fixtures::text_hi_dump()));
    assert_eq!(ndef::decode(&data), Some(NdefContent::Text("hi".into())));
    Ok(())
}

#[test]
fn no_tag_no_channel() -> anyhow::Result<()> {
    let backend = MockBackend::new();
    let mut device = mock_device(backend.clone());
    device.find_device()?;
    assert!(device.open_channel().is_none());
    assert_eq!(backend.state().open_channels, 0);
    Ok(())
}
