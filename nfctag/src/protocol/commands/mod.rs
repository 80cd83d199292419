// nfctag/src/protocol/commands/mod.rs
//! Command set.

pub mod read;
pub mod write;

pub use read::encode_read_page;
pub use write::{encode_write_page, paginate};

use crate::constants::{ENABLE_NDEF, GET_UID, LOCK_TAG, PAGE_SIZE};

/// The fixed command set understood by the tag through the reader.
/// New commands should be added here and their encoder placed in
/// `protocol::commands::<name>.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Identity query (UID)
    GetUid,
    /// Read one 4-byte page
    ReadPage { page: u8 },
    /// Write one 4-byte page
    WritePage { page: u8, data: [u8; PAGE_SIZE] },
    /// Write the capability container so the NDEF area is usable
    EnableNdef,
    /// Lock the tag (irreversible)
    Lock,
}

impl Command {
    /// Encode the command into the APDU bytes sent to the reader.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::GetUid => GET_UID.to_vec(),
            Self::ReadPage { page } => encode_read_page(*page),
            Self::WritePage { page, data } => encode_write_page(*page, *data),
            Self::EnableNdef => ENABLE_NDEF.to_vec(),
            Self::Lock => LOCK_TAG.to_vec(),
        }
    }

    /// Short name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetUid => "GET_UID",
            Self::ReadPage { .. } => "READ_PAGE",
            Self::WritePage { .. } => "WRITE_PAGE",
            Self::EnableNdef => "ENABLE_NDEF",
            Self::Lock => "LOCK",
        }
    }
}
