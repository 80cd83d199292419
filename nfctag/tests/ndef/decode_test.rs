#[path = "../common/mod.rs"]
mod common;

use nfctag::ndef::{self, NdefContent};

#[test]
fn decode_captured_uri_tag() {
    let content = ndef::decode(&common::fixtures::example_com_dump());
    assert_eq!(content, Some(NdefContent::Uri("https://example.com".into())));
}

#[test]
fn decode_text_behind_lock_control() {
    let content = ndef::decode(&common::fixtures::text_hi_dump());
    assert_eq!(content, Some(NdefContent::Text("hi".into())));
}

#[test]
fn decode_repairs_tel_web_address() {
    let content = ndef::decode(&common::fixtures::tel_web_dump());
    assert_eq!(content, Some(NdefContent::Uri("https://example.com".into())));
}

#[test]
fn factory_fresh_tag_has_no_content() {
    let dump = common::fixtures::factory_dump();
    assert_eq!(ndef::decode(&dump), None);
    assert!(!ndef::has_complete_ndef_tlv(&dump));
}

#[test]
fn garbage_decodes_to_nothing() {
    assert_eq!(ndef::decode(&[]), None);
    assert_eq!(ndef::decode(&[0xFF; 16]), None);
    // declared length runs past the buffer
    assert_eq!(ndef::decode(&hex::decode("0320d101").unwrap()), None);
}
