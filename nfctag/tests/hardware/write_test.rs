#![cfg(feature = "pcsc")]

#[path = "common.rs"]
mod common;

use nfctag::ndef;
use nfctag::tag::{self, read_memory, WriteOptions};
use nfctag::{ReadExtent, Result};
use serial_test::serial;

// Overwrites the tag on the reader (without locking it). Run manually with:
//
// cargo test -p nfctag --test hardware --features pcsc -- --ignored

#[test]
#[ignore]
#[serial]
fn write_and_read_back() -> Result<()> {
    let Some(mut device) = common::open_reader()? else {
        return Ok(());
    };
    let Some(mut channel) = device.open_channel() else {
        return Ok(());
    };
    tag::write(&mut channel, "https://example.com/nfctag", &WriteOptions::default())?;
    let data = read_memory(&mut channel, ReadExtent::Compact);
    assert_eq!(
        ndef::decode(&data).map(|c| c.into_string()),
        Some("https://example.com/nfctag".to_string())
    );
    Ok(())
}
