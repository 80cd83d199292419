// nfctag/src/ndef/record.rs
//! NDEF record header parsing and short-record encoding.

use derive_more::Display;

use crate::constants::{NDEF_SHORT_WELL_KNOWN, RTD_TEXT, RTD_URI};
use crate::protocol::parser::{byte_at, slice_at};
use crate::{Error, Result};

/// Type name format, low three bits of the record header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Tnf {
    /// 0: no type or payload
    #[display(fmt = "empty")]
    Empty,
    /// 1: NFC Forum well-known type
    #[display(fmt = "well-known")]
    WellKnown,
    /// 2: MIME media type
    #[display(fmt = "media")]
    Media,
    /// 3: absolute URI type
    #[display(fmt = "absolute URI")]
    AbsoluteUri,
    /// 4: NFC Forum external type
    #[display(fmt = "external")]
    External,
    /// 5: unknown payload type
    #[display(fmt = "unknown")]
    Unknown,
    /// 6: continuation chunk
    #[display(fmt = "unchanged")]
    Unchanged,
    /// 7: reserved
    #[display(fmt = "reserved")]
    Reserved,
}

impl Tnf {
    /// Decode the low three bits of a header byte
    pub fn from_bits(bits: u8) -> Self {
        match bits & RecordFlags::TNF_MASK {
            0 => Tnf::Empty,
            1 => Tnf::WellKnown,
            2 => Tnf::Media,
            3 => Tnf::AbsoluteUri,
            4 => Tnf::External,
            5 => Tnf::Unknown,
            6 => Tnf::Unchanged,
            _ => Tnf::Reserved,
        }
    }

    /// Values a standalone record may carry a type with
    fn carries_type(self) -> bool {
        !matches!(self, Tnf::Empty | Tnf::Unchanged | Tnf::Reserved)
    }
}

/// First byte of a record header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFlags(pub u8);

impl RecordFlags {
    /// Message begin
    pub const MB: u8 = 0x80;
    /// Message end
    pub const ME: u8 = 0x40;
    /// Chunk flag
    pub const CF: u8 = 0x20;
    /// Short record: one byte payload length
    pub const SR: u8 = 0x10;
    /// Id length present
    pub const IL: u8 = 0x08;
    /// Type name format bits
    pub const TNF_MASK: u8 = 0x07;

    /// Flags of a single short well-known record (0xD1)
    pub const fn single_well_known() -> Self {
        RecordFlags(NDEF_SHORT_WELL_KNOWN)
    }

    /// MB set
    pub fn message_begin(self) -> bool {
        self.0 & Self::MB != 0
    }

    /// ME set
    pub fn message_end(self) -> bool {
        self.0 & Self::ME != 0
    }

    /// CF set
    pub fn chunked(self) -> bool {
        self.0 & Self::CF != 0
    }

    /// SR set
    pub fn short_record(self) -> bool {
        self.0 & Self::SR != 0
    }

    /// IL set
    pub fn has_id(self) -> bool {
        self.0 & Self::IL != 0
    }

    /// Type name format of the record
    pub fn tnf(self) -> Tnf {
        Tnf::from_bits(self.0)
    }
}

/// A parsed short record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Header byte
    pub flags: RecordFlags,
    /// Record type, `U` or `T` for well-known URI and text
    pub record_type: Vec<u8>,
    /// Present only when the IL flag is set
    pub id: Option<Vec<u8>>,
    /// Record body
    pub payload: Vec<u8>,
}

impl Record {
    /// Well-known URI record: identifier code followed by the remainder.
    pub fn uri(code: u8, remainder: &[u8]) -> Self {
        let mut payload = Vec::with_capacity(remainder.len() + 1);
        payload.push(code);
        payload.extend_from_slice(remainder);
        Self::well_known(RTD_URI, payload)
    }

    /// Well-known text record with an empty language code.
    pub fn text(text: &str) -> Self {
        let mut payload = Vec::with_capacity(text.len() + 1);
        payload.push(0x00);
        payload.extend_from_slice(text.as_bytes());
        Self::well_known(RTD_TEXT, payload)
    }

    fn well_known(rtd: u8, payload: Vec<u8>) -> Self {
        Self {
            flags: RecordFlags::single_well_known(),
            record_type: vec![rtd],
            id: None,
            payload,
        }
    }

    /// Well-known `U` record
    pub fn is_uri(&self) -> bool {
        self.flags.tnf() == Tnf::WellKnown && self.record_type == [RTD_URI]
    }

    /// Well-known `T` record
    pub fn is_text(&self) -> bool {
        self.flags.tnf() == Tnf::WellKnown && self.record_type == [RTD_TEXT]
    }

    /// Parse one record from the start of `data`, returning it with the
    /// number of bytes it occupies.
    ///
    /// Only short, unchunked records are accepted. The type and the payload
    /// must both be non-empty.
    pub fn parse(data: &[u8]) -> Result<(Record, usize)> {
        let flags = RecordFlags(byte_at(data, 0).map_err(|_| truncated("header"))?);
        if flags.chunked() {
            return Err(Error::Format("chunked records are not supported".into()));
        }
        if !flags.short_record() {
            return Err(Error::Format("only short records are supported".into()));
        }
        let tnf = flags.tnf();
        if !tnf.carries_type() {
            return Err(Error::Format(format!("unexpected TNF: {}", tnf)));
        }

        let type_len = byte_at(data, 1).map_err(|_| truncated("type length"))? as usize;
        let payload_len = byte_at(data, 2).map_err(|_| truncated("payload length"))? as usize;
        let mut pos = 3;
        let id_len = if flags.has_id() {
            pos += 1;
            byte_at(data, 3).map_err(|_| truncated("id length"))? as usize
        } else {
            0
        };

        if type_len == 0 {
            return Err(Error::Format("empty record type".into()));
        }
        if payload_len == 0 {
            return Err(Error::Format("empty payload".into()));
        }

        let record_type = slice_at(data, pos, type_len).map_err(|_| truncated("type"))?;
        pos += type_len;
        let id = if flags.has_id() {
            let id = slice_at(data, pos, id_len).map_err(|_| truncated("id"))?;
            pos += id_len;
            Some(id.to_vec())
        } else {
            None
        };
        let payload = slice_at(data, pos, payload_len).map_err(|_| truncated("payload"))?;
        pos += payload_len;

        Ok((
            Record {
                flags,
                record_type: record_type.to_vec(),
                id,
                payload: payload.to_vec(),
            },
            pos,
        ))
    }

    /// Serialize as a short record.
    pub fn encode(&self) -> Result<Vec<u8>> {
        if self.payload.len() > u8::MAX as usize {
            return Err(Error::PayloadTooLarge {
                size: self.payload.len(),
            });
        }
        let mut flags = self.flags.0 | RecordFlags::SR;
        if self.id.is_some() {
            flags |= RecordFlags::IL;
        } else {
            flags &= !RecordFlags::IL;
        }
        let mut out = Vec::with_capacity(4 + self.record_type.len() + self.payload.len());
        out.push(flags);
        out.push(self.record_type.len() as u8);
        out.push(self.payload.len() as u8);
        if let Some(id) = &self.id {
            out.push(id.len() as u8);
        }
        out.extend_from_slice(&self.record_type);
        if let Some(id) = &self.id {
            out.extend_from_slice(id);
        }
        out.extend_from_slice(&self.payload);
        Ok(out)
    }
}

fn truncated(what: &str) -> Error {
    Error::Format(format!("record truncated in {}", what))
}
