#[path = "../common/mod.rs"]
mod common;

use nfctag::Error;
use nfctag::ndef::{self, NdefContent};

#[test]
fn encode_matches_captured_tag() {
    let bytes = ndef::encode("https://example.com").unwrap();
    assert_eq!(bytes, common::fixtures::example_com_dump());
}

#[test]
fn encode_plain_text_as_text_record() {
    let bytes = ndef::encode("hello").unwrap();
    // status byte 0: no language code
    assert_eq!(&bytes[2..7], &[0xD1, 0x01, 0x06, b'T', 0x00]);
    assert_eq!(&bytes[7..12], b"hello");
    assert_eq!(ndef::decode(&bytes), Some(NdefContent::Text("hello".into())));
}

#[test]
fn oversized_payload_is_rejected() {
    let long = format!("https://example.com/{}", "a".repeat(300));
    assert!(matches!(
        ndef::encode(&long),
        Err(Error::PayloadTooLarge { .. })
    ));
}

#[test]
fn written_image_fits_compact_read() {
    // 36 pages of 4 bytes are covered by a compact read
    let address = format!("https://example.com/{}", "p".repeat(100));
    let bytes = ndef::encode(&address).unwrap();
    assert!(bytes.len() <= 36 * 4);
    assert_eq!(ndef::decode(&bytes), Some(NdefContent::Uri(address)));
}
