// nfctag/src/protocol/commands/read.rs
//! READ BINARY encoding.

use crate::constants::{PAGE_SIZE, READ_PAGE_PREFIX};

/// Encode READ BINARY for one page: FF B0 00 <page> <len>
pub fn encode_read_page(page: u8) -> Vec<u8> {
    let mut buf = Vec::with_capacity(READ_PAGE_PREFIX.len() + 2);
    buf.extend_from_slice(&READ_PAGE_PREFIX);
    buf.push(page);
    buf.push(PAGE_SIZE as u8);
    buf
}
