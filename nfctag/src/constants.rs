// nfctag/src/constants.rs
//! Common protocol constants used across the crate

/// GET DATA (UID): FF CA 00 00 00
pub const GET_UID: [u8; 5] = [0xFF, 0xCA, 0x00, 0x00, 0x00];

/// READ BINARY prefix: FF B0 00, followed by page and length
pub const READ_PAGE_PREFIX: [u8; 3] = [0xFF, 0xB0, 0x00];

/// UPDATE BINARY prefix: FF D6 00, followed by page, length and data
pub const UPDATE_PAGE_PREFIX: [u8; 3] = [0xFF, 0xD6, 0x00];

/// Lock command: fixed 4-byte payload written to page 2
pub const LOCK_TAG: [u8; 9] = [0xFF, 0xD6, 0x00, 0x02, 0x04, 0x00, 0x00, 0x00, 0x00];

/// Capability container written before the first NDEF write
/// (magic 0xE1, version 1.0, 48 byte data area, read/write access)
pub const ENABLE_NDEF: [u8; 9] = [0xFF, 0xD6, 0x00, 0x03, 0x04, 0xE1, 0x10, 0x06, 0x0F];

/// Status word reported on success
pub const SW_SUCCESS: (u8, u8) = (0x90, 0x00);

/// Size of one tag page in bytes
pub const PAGE_SIZE: usize = 4;

/// Page holding the lock bytes
pub const LOCK_PAGE: u8 = 2;

/// Page holding the capability container
pub const CC_PAGE: u8 = 3;

/// First user memory page
pub const BASE_PAGE: u8 = 4;

/// Exclusive end page for compact reads (pages 4..40, NTAG213 user area)
pub const COMPACT_END_PAGE: u8 = 40;

/// Exclusive end page for extended reads (NTAG215 user area)
pub const EXTENDED_END_PAGE: u8 = 130;

/// Exclusive end page for extended reads on readers that time out on long scans
pub const REDUCED_END_PAGE: u8 = 80;

/// Capability container magic number
pub const CC_MAGIC: u8 = 0xE1;

/// NULL TLV, padding without a length byte
pub const TLV_NULL: u8 = 0x00;
/// NDEF message TLV
pub const TLV_NDEF: u8 = 0x03;
/// Terminator TLV, ends the data area
pub const TLV_TERMINATOR: u8 = 0xFE;

/// Header of a single short well-known record (MB | ME | SR | TNF=1)
pub const NDEF_SHORT_WELL_KNOWN: u8 = 0xD1;

/// Well-known URI record type
pub const RTD_URI: u8 = b'U';
/// Well-known text record type
pub const RTD_TEXT: u8 = b'T';
