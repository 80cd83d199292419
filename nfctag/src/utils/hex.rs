//! Hex formatting used for UIDs and debug traces.

use std::fmt::Write;

/// Uppercase hex with a space between bytes: `&[0xde, 0xad]` -> `"DE AD"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a memory buffer as one line per page, numbered from `first_page`.
///
/// ```text
/// 04: 03 0A D1 01
/// 05: 06 55 03 61
/// ```
pub fn format_pages(buffer: &[u8], first_page: u8) -> String {
    let mut out = String::new();
    for (i, chunk) in buffer.chunks(crate::constants::PAGE_SIZE).enumerate() {
        if i != 0 {
            out.push('\n');
        }
        let page = first_page as usize + i;
        let _ = write!(out, "{:02X}: {}", page, bytes_to_hex_spaced(chunk));
    }
    out
}
