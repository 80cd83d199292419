// nfctag/src/history.rs
//! Bounded list of recently written addresses.

use std::collections::VecDeque;

/// Number of addresses remembered by default
pub const DEFAULT_HISTORY_LEN: usize = 10;

/// Recently written addresses, most recent first, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecentAddresses {
    entries: VecDeque<String>,
    capacity: usize,
}

impl RecentAddresses {
    /// Empty list remembering at most `capacity` addresses
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Move `address` to the front, evicting the oldest entry when full.
    pub fn push(&mut self, address: &str) {
        if self.capacity == 0 {
            return;
        }
        self.entries.retain(|a| a != address);
        self.entries.push_front(address.to_string());
        self.entries.truncate(self.capacity);
    }

    /// Most recent first
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// The address pushed last
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Number of remembered addresses
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was pushed since the last clear
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every address
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for RecentAddresses {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LEN)
    }
}
