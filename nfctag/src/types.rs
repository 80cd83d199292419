// nfctag/src/types.rs
//! Tag identity and memory layout types.

use crate::constants::{COMPACT_END_PAGE, EXTENDED_END_PAGE};
use crate::Error;
use derive_more::Display;
use std::convert::TryFrom;

/// Tag UID - Newtype Pattern
///
/// Only ever used as an equality key; the bytes are never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagUid(Vec<u8>);

impl TagUid {
    /// Wrap UID bytes as returned by the reader
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    /// Raw UID bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Fixed-width uppercase hex form, e.g. `04 A1 B2 C3`
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(&self.0).to_uppercase()
    }
}

impl std::fmt::Display for TagUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<&[u8]> for TagUid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.is_empty() {
            return Err(Error::InvalidLength {
                expected: 4,
                actual: 0,
            });
        }
        Ok(Self(bytes.to_vec()))
    }
}

/// Tag family, detected from the capability container size byte
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagFamily {
    /// 144 byte user area
    #[display(fmt = "NTAG213")]
    Ntag213,
    /// 504 byte user area
    #[display(fmt = "NTAG215")]
    Ntag215,
    /// 888 byte user area
    #[display(fmt = "NTAG216")]
    Ntag216,
    /// CC size byte not recognised
    #[default]
    #[display(fmt = "Unknown")]
    Unknown,
}

impl TagFamily {
    /// Classify from CC byte 2 (data area size / 8)
    pub fn from_cc_size(size: u8) -> Self {
        match size {
            0x12 => Self::Ntag213,
            0x3E => Self::Ntag215,
            0x6D => Self::Ntag216,
            _ => Self::Unknown,
        }
    }

    /// Exclusive end of the user memory area, if known
    pub fn end_page(&self) -> Option<u8> {
        match self {
            Self::Ntag213 => Some(40),
            Self::Ntag215 => Some(130),
            Self::Ntag216 => Some(226),
            Self::Unknown => None,
        }
    }
}

/// How much user memory a read should cover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReadExtent {
    /// NTAG213 sized read, pages 4..40
    Compact,
    /// Long read for larger tags, bounded by the reader profile
    Extended,
}

impl ReadExtent {
    /// Exclusive end page before any reader or family specific cap
    pub fn end_page(&self) -> u8 {
        match self {
            Self::Compact => COMPACT_END_PAGE,
            Self::Extended => EXTENDED_END_PAGE,
        }
    }
}

/// Link-layer protocol requested when connecting to a tag
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkProtocol {
    /// ISO 7816 T=1
    #[display(fmt = "T1")]
    T1,
    /// ISO 7816 T=0
    #[display(fmt = "T0")]
    T0,
    /// Let the reader driver pick
    #[display(fmt = "default")]
    Any,
}
