// fixtures.rs: tag UIDs and memory images shared by the integration tests

use nfctag::ndef;
use nfctag::transport::mock::MockTag;

pub const SOURCE_UID: [u8; 7] = [0x04, 0x5A, 0x11, 0x22, 0x33, 0x44, 0x80];
pub const BLANK_UIDS: [[u8; 7]; 3] = [
    [0x04, 0xB1, 0x00, 0x00, 0x00, 0x00, 0x01],
    [0x04, 0xB2, 0x00, 0x00, 0x00, 0x00, 0x02],
    [0x04, 0xB3, 0x00, 0x00, 0x00, 0x00, 0x03],
];

/// User memory of a tag holding `https://example.com` (prefix code 0x03)
pub fn example_com_dump() -> Vec<u8> {
    hex::decode("0310d1010c55036578616d706c652e636f6dfe").unwrap()
}

/// User memory of a tag holding the text record "hi" in English
pub fn text_hi_dump() -> Vec<u8> {
    // a lock control TLV comes first and has to be skipped
    hex::decode("0103a00c440307d1010354006869fe").unwrap()
}

/// A `tel:` record whose content is really a web address
pub fn tel_web_dump() -> Vec<u8> {
    hex::decode("0310d1010c55056578616d706c652e636f6dfe").unwrap()
}

/// Factory state: an empty NDEF block followed by the terminator
pub fn factory_dump() -> Vec<u8> {
    hex::decode("0300fe00").unwrap()
}

pub fn source_tag(address: &str) -> MockTag {
    MockTag::ntag215(&SOURCE_UID).with_user_data(&ndef::encode(address).unwrap())
}

pub fn blank_tag(i: usize) -> MockTag {
    MockTag::ntag213(&BLANK_UIDS[i])
}
