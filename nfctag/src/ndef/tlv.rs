// nfctag/src/ndef/tlv.rs
//! TLV container walking.

use crate::constants::{TLV_NDEF, TLV_NULL, TLV_TERMINATOR};
use crate::protocol::parser::{byte_at, slice_at};
use crate::{Error, Result};

/// Length byte announcing the three byte length form
const LONG_LENGTH: u8 = 0xFF;

/// One TLV block located in a memory buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlvBlock<'a> {
    /// TLV type byte
    pub tag: u8,
    /// Offset of the tag byte in the buffer
    pub offset: usize,
    /// Value bytes, exactly as long as the length field says
    pub value: &'a [u8],
}

/// Read a TLV length field at `pos`; returns (length, header bytes used).
fn length_at(data: &[u8], pos: usize) -> Result<(usize, usize)> {
    let first = byte_at(data, pos)?;
    if first == LONG_LENGTH {
        let hi = byte_at(data, pos + 1)? as usize;
        let lo = byte_at(data, pos + 2)? as usize;
        Ok(((hi << 8) | lo, 3))
    } else {
        Ok((first as usize, 1))
    }
}

/// Walk the TLV blocks and return the first NDEF message block.
///
/// NULL bytes are skipped one by one, other blocks by their declared length
/// and the terminator ends the walk. A block whose declared length runs past
/// the end of the buffer is an error, never a partial result.
pub fn find_ndef(data: &[u8]) -> Result<TlvBlock<'_>> {
    let mut pos = 0;
    while pos < data.len() {
        let tag = data[pos];
        match tag {
            TLV_NULL => {
                pos += 1;
            }
            TLV_TERMINATOR => {
                return Err(Error::Format(format!(
                    "terminator at offset {} before NDEF block",
                    pos
                )));
            }
            _ => {
                let (len, used) = length_at(data, pos + 1).map_err(|_| {
                    Error::Format(format!("TLV 0x{:02X} at offset {} has no length", tag, pos))
                })?;
                let start = pos + 1 + used;
                let value = slice_at(data, start, len).map_err(|_| {
                    Error::Format(format!(
                        "TLV 0x{:02X} declares {} bytes, only {} available",
                        tag,
                        len,
                        data.len().saturating_sub(start)
                    ))
                })?;
                if tag == TLV_NDEF {
                    return Ok(TlvBlock {
                        tag,
                        offset: pos,
                        value,
                    });
                }
                pos = start + len;
            }
        }
    }
    Err(Error::Format("no NDEF block".into()))
}

/// Wrap an NDEF message into `[0x03, len] message [0xFE]`.
pub fn wrap_ndef(message: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(message.len() + 5);
    out.push(TLV_NDEF);
    if message.len() < LONG_LENGTH as usize {
        out.push(message.len() as u8);
    } else {
        out.push(LONG_LENGTH);
        out.extend_from_slice(&(message.len() as u16).to_be_bytes());
    }
    out.extend_from_slice(message);
    out.push(TLV_TERMINATOR);
    out
}

/// True if `data` looks like usable tag content: at least two pages and a
/// complete, non-empty NDEF block.
pub fn has_complete_ndef(data: &[u8]) -> bool {
    data.len() >= 8 && find_ndef(data).is_ok_and(|block| !block.value.is_empty())
}
