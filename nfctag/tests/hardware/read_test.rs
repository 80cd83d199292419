#![cfg(feature = "pcsc")]

#[path = "common.rs"]
mod common;

use nfctag::tag::read_tag;
use nfctag::{ReadExtent, Result};
use serial_test::serial;

// Requires a supported reader with a tag on it. Marked `#[ignore]` so CI
// does not attempt to run it. Run manually with:
//
// cargo test -p nfctag --test hardware --features pcsc -- --ignored

#[test]
#[ignore]
#[serial]
fn select_reader() -> Result<()> {
    match common::open_reader()? {
        Some(device) => {
            assert!(device.reader().is_some());
            Ok(())
        }
        None => Ok(()),
    }
}

#[test]
#[ignore]
#[serial]
fn read_presented_tag() -> Result<()> {
    let Some(mut device) = common::open_reader()? else {
        return Ok(());
    };
    if let Some(mut channel) = device.open_channel() {
        let memory = read_tag(&mut channel, ReadExtent::Extended);
        assert!(memory.is_some());
    }
    Ok(())
}
