// nfctag/src/ndef/mod.rs
//! NDEF data model: TLV container, records and the address codec.

pub mod codec;
pub mod record;
pub mod tlv;
pub mod uri;

pub use codec::{decode, decode_record, encode, encode_record, has_complete_ndef_tlv, NdefContent};
pub use record::{Record, RecordFlags, Tnf};
