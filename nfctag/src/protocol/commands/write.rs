// nfctag/src/protocol/commands/write.rs
//! UPDATE BINARY encoding and paging.

use crate::constants::{PAGE_SIZE, UPDATE_PAGE_PREFIX};

/// Encode UPDATE BINARY for one page:
/// FF D6 00 <page> 04 <data(4)>
pub fn encode_write_page(page: u8, data: [u8; PAGE_SIZE]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(UPDATE_PAGE_PREFIX.len() + 2 + PAGE_SIZE);
    buf.extend_from_slice(&UPDATE_PAGE_PREFIX);
    buf.push(page);
    buf.push(PAGE_SIZE as u8);
    buf.extend_from_slice(&data);
    buf
}

/// Split `bytes` into page-sized chunks, zero-padding the last one.
pub fn paginate(bytes: &[u8]) -> Vec<[u8; PAGE_SIZE]> {
    bytes
        .chunks(PAGE_SIZE)
        .map(|chunk| {
            let mut page = [0u8; PAGE_SIZE];
            page[..chunk.len()].copy_from_slice(chunk);
            page
        })
        .collect()
}
