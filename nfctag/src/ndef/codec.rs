// nfctag/src/ndef/codec.rs
//! Tag memory to address, address to tag memory.

use log::debug;

use crate::address::{looks_like_web_address, repair, repair_text};
use crate::ndef::record::{Record, RecordFlags};
use crate::ndef::tlv::{find_ndef, wrap_ndef};
use crate::ndef::uri::{prefix_for, split_scheme, CODE_HTTP, CODE_MAILTO, CODE_TEL};
use crate::{Error, Result};

/// Content recovered from a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NdefContent {
    /// URI record, prefix expanded and repaired
    Uri(String),
    /// Text record, language code skipped; web addresses are repaired
    Text(String),
}

impl NdefContent {
    /// The recovered string, whatever the record kind
    pub fn as_str(&self) -> &str {
        match self {
            NdefContent::Uri(s) | NdefContent::Text(s) => s,
        }
    }

    /// Take the recovered string
    pub fn into_string(self) -> String {
        match self {
            NdefContent::Uri(s) | NdefContent::Text(s) => s,
        }
    }

    /// True for a URI record
    pub fn is_uri(&self) -> bool {
        matches!(self, NdefContent::Uri(_))
    }

    /// Interpret a URI or text record.
    pub fn from_record(record: &Record) -> Result<Self> {
        if record.is_uri() {
            let (&code, rest) = record
                .payload
                .split_first()
                .ok_or_else(|| Error::Format("empty URI payload".into()))?;
            Ok(NdefContent::Uri(resolve_uri(code, rest)))
        } else if record.is_text() {
            let status = *record
                .payload
                .first()
                .ok_or_else(|| Error::Format("empty text payload".into()))?;
            let lang_len = (status & 0x3F) as usize;
            let text = record
                .payload
                .get(1 + lang_len..)
                .ok_or_else(|| Error::Format(format!("language code of {} bytes overruns payload", lang_len)))?;
            Ok(NdefContent::Text(repair_text(&clean(text))))
        } else {
            Err(Error::Format("record is neither URI nor text".into()))
        }
    }
}

impl std::fmt::Display for NdefContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lossy UTF-8 with control characters dropped and whitespace trimmed.
fn clean(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

fn resolve_uri(code: u8, rest: &[u8]) -> String {
    let content = clean(rest);
    let prefix = prefix_for(code).unwrap_or_else(|| {
        debug!("unknown URI identifier code 0x{:02X}", code);
        ""
    });
    // Some writers store web addresses behind tel: or mailto:.
    let misfiled = match code {
        CODE_TEL => content.contains('.') || content.contains('/'),
        CODE_MAILTO => !content.contains('@') && looks_like_web_address(&content),
        _ => false,
    };
    if misfiled {
        return repair(&content);
    }
    repair(&format!("{}{}", prefix, content))
}

/// Locate the first URI or text record inside the first NDEF block.
///
/// Records of other types are skipped. Any structural problem is an error.
pub fn decode_record(data: &[u8]) -> Result<Record> {
    let block = find_ndef(data)?;
    let mut offset = 0;
    while offset < block.value.len() {
        let (record, used) = Record::parse(&block.value[offset..])?;
        if record.is_uri() || record.is_text() {
            return Ok(record);
        }
        debug!(
            "skipping record of type {:02X?} at offset {}",
            record.record_type, offset
        );
        if record.flags.message_end() {
            break;
        }
        offset += used;
    }
    Err(Error::Format("no URI or text record".into()))
}

/// Recover the address stored in raw tag memory, or `None` if the memory
/// holds nothing usable.
pub fn decode(data: &[u8]) -> Option<NdefContent> {
    match decode_record(data).and_then(|r| NdefContent::from_record(&r)) {
        Ok(content) => Some(content),
        Err(e) => {
            debug!("no NDEF content: {}", e);
            None
        }
    }
}

/// Build the record `target` is stored as.
///
/// Addresses with an `http(s)://` scheme get the matching abbreviation;
/// schemeless strings that look like web addresses are stored with
/// `http://`; everything else becomes a text record.
pub fn record_for(target: &str) -> Record {
    if let Some((code, rest)) = split_scheme(target) {
        Record::uri(code, rest.as_bytes())
    } else if looks_like_web_address(target) {
        Record::uri(CODE_HTTP, target.as_bytes())
    } else {
        Record::text(target)
    }
}

/// Encode `target` as a complete TLV container ready to be paged onto a tag.
pub fn encode(target: &str) -> Result<Vec<u8>> {
    encode_record(&record_for(target))
}

/// Wrap `record` as the only record of a message in a TLV container.
///
/// Header flags are rewritten for a standalone short record and any id is
/// dropped; type and payload are kept byte for byte.
pub fn encode_record(record: &Record) -> Result<Vec<u8>> {
    let standalone = Record {
        flags: RecordFlags(
            RecordFlags::MB | RecordFlags::ME | RecordFlags::SR | (record.flags.0 & RecordFlags::TNF_MASK),
        ),
        record_type: record.record_type.clone(),
        id: None,
        payload: record.payload.clone(),
    };
    Ok(wrap_ndef(&standalone.encode()?))
}

/// True if `data` is worth copying: at least two pages and a complete,
/// non-empty NDEF block.
pub fn has_complete_ndef_tlv(data: &[u8]) -> bool {
    crate::ndef::tlv::has_complete_ndef(data)
}
