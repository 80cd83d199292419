// nfctag/src/tag/reader.rs
//! Page, capability and memory reads.

use log::debug;

use crate::constants::{BASE_PAGE, CC_MAGIC, CC_PAGE, PAGE_SIZE, TLV_TERMINATOR};
use crate::device::Channel;
use crate::protocol::Command;
use crate::types::{ReadExtent, TagFamily, TagUid};
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

/// Capability container stored in page 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapabilityContainer {
    /// 0xE1 once formatted for NDEF
    pub magic: u8,
    /// Mapping version
    pub version: u8,
    /// Data area size divided by 8
    pub size: u8,
    /// Read and write access bits
    pub access: u8,
}

impl CapabilityContainer {
    /// Parse page 3 as read from the tag
    pub fn from_page(page: [u8; PAGE_SIZE]) -> Self {
        Self {
            magic: page[0],
            version: page[1],
            size: page[2],
            access: page[3],
        }
    }

    /// True once the tag has been formatted for NDEF
    pub fn is_ndef_formatted(&self) -> bool {
        self.magic == CC_MAGIC
    }

    /// Tag family from the size byte
    pub fn family(&self) -> TagFamily {
        TagFamily::from_cc_size(self.size)
    }

    /// Declared data area in bytes
    pub fn data_area_bytes(&self) -> usize {
        self.size as usize * 8
    }
}

/// Everything a read pass learned about a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMemory {
    /// Answer to GET_UID
    pub uid: TagUid,
    /// Page 3
    pub capability: CapabilityContainer,
    /// Pages from [`BASE_PAGE`] on, concatenated
    pub data: Vec<u8>,
}

impl TagMemory {
    /// Tag family from the capability container
    pub fn family(&self) -> TagFamily {
        self.capability.family()
    }

    /// Number of whole pages in `data`
    pub fn pages_read(&self) -> usize {
        self.data.len() / PAGE_SIZE
    }
}

/// Read one page; a non-success status is reported as [`Error::Status`].
pub fn read_page(channel: &mut Channel, page: u8) -> Result<[u8; PAGE_SIZE]> {
    let resp = channel.execute(&Command::ReadPage { page })?.into_result()?;
    // some readers answer with four pages at once; keep the first
    let bytes = resp.data.get(..PAGE_SIZE).ok_or(Error::InvalidLength {
        expected: PAGE_SIZE,
        actual: resp.data.len(),
    })?;
    let mut out = [0u8; PAGE_SIZE];
    out.copy_from_slice(bytes);
    Ok(out)
}

/// Identity of the tag behind `channel`.
pub fn read_uid(channel: &mut Channel) -> Option<TagUid> {
    channel.uid()
}

/// Read and parse page 3, `None` if the read fails
pub fn read_capability(channel: &mut Channel) -> Option<CapabilityContainer> {
    match read_page(channel, CC_PAGE) {
        Ok(page) => Some(CapabilityContainer::from_page(page)),
        Err(e) => {
            debug!("capability container unreadable: {}", e);
            None
        }
    }
}

/// Read user memory from page 4 up to the ceiling for `extent`.
///
/// Returns `None` when the tag does not answer the identity query or its
/// capability container cannot be read. Otherwise the data covers every page
/// read before the first failing page, the terminator page or the ceiling.
pub fn read_tag(channel: &mut Channel, extent: ReadExtent) -> Option<TagMemory> {
    let uid = read_uid(channel)?;
    let capability = read_capability(channel)?;

    let mut end = channel.end_page(extent);
    if let Some(family_end) = capability.family().end_page() {
        end = end.min(family_end);
    }

    let mut data = Vec::with_capacity(end.saturating_sub(BASE_PAGE) as usize * PAGE_SIZE);
    for page in BASE_PAGE..end {
        match read_page(channel, page) {
            Ok(bytes) => {
                debug!("page {:3}: {}", page, bytes_to_hex_spaced(&bytes));
                data.extend_from_slice(&bytes);
                if bytes[0] == TLV_TERMINATOR {
                    break;
                }
            }
            Err(e) => {
                debug!("read stopped at page {}: {}", page, e);
                break;
            }
        }
    }

    Some(TagMemory {
        uid,
        capability,
        data,
    })
}

/// Raw user memory, empty if the tag could not be read at all.
pub fn read_memory(channel: &mut Channel, extent: ReadExtent) -> Vec<u8> {
    read_tag(channel, extent).map(|m| m.data).unwrap_or_default()
}
