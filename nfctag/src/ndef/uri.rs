// nfctag/src/ndef/uri.rs
//! NFC Forum URI record prefix table.

/// Scheme prefixes indexed by URI identifier code (0x00..=0x22).
pub const URI_PREFIXES: [&str; 35] = [
    "http://www.",
    "https://www.",
    "http://",
    "https://",
    "tel:",
    "mailto:",
    "ftp://anonymous:anonymous@",
    "ftp://ftp.",
    "ftps://",
    "sftp://",
    "smb://",
    "nfs://",
    "ftp://",
    "dav://",
    "news:",
    "telnet://",
    "imap:",
    "rtsp://",
    "urn:",
    "pop:",
    "sip:",
    "sips:",
    "tftp:",
    "btspp://",
    "btl2cap://",
    "btgoep://",
    "tcpobex://",
    "irdaobex://",
    "file://",
    "urn:epc:id:",
    "urn:epc:tag:",
    "urn:epc:pat:",
    "urn:epc:raw:",
    "urn:epc:",
    "urn:nfc:",
];

/// `http://www.`
pub const CODE_HTTP_WWW: u8 = 0x00;
/// `https://www.`
pub const CODE_HTTPS_WWW: u8 = 0x01;
/// `http://`
pub const CODE_HTTP: u8 = 0x02;
/// `https://`
pub const CODE_HTTPS: u8 = 0x03;
/// `tel:`
pub const CODE_TEL: u8 = 0x04;
/// `mailto:`
pub const CODE_MAILTO: u8 = 0x05;

/// Prefixes the encoder abbreviates. `tel:` and `mailto:` are left out on
/// purpose: those inputs are stored as text records.
const ENCODABLE: [u8; 4] = [CODE_HTTP_WWW, CODE_HTTPS_WWW, CODE_HTTP, CODE_HTTPS];

/// Prefix for a URI identifier code; unknown codes have none.
pub fn prefix_for(code: u8) -> Option<&'static str> {
    URI_PREFIXES.get(code as usize).copied()
}

/// Split an address into its abbreviated scheme code and the remainder.
/// Longest prefix wins, so `https://www.` beats `https://`.
pub fn split_scheme(address: &str) -> Option<(u8, &str)> {
    ENCODABLE
        .iter()
        .filter_map(|&code| {
            let prefix = URI_PREFIXES[code as usize];
            address.strip_prefix(prefix).map(|rest| (code, rest, prefix.len()))
        })
        .max_by_key(|(_, _, len)| *len)
        .map(|(code, rest, _)| (code, rest))
}
