// nfctag/src/transport/mock.rs
//! In-memory reader and NTAG21x simulation.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::constants::{
    CC_PAGE, LOCK_PAGE, PAGE_SIZE, READ_PAGE_PREFIX, UPDATE_PAGE_PREFIX,
};
use crate::transport::traits::{ReaderBackend, Transport};
use crate::types::LinkProtocol;
use crate::{Error, Result};

const SW_OK: [u8; 2] = [0x90, 0x00];
const SW_WRITE_FAILED: [u8; 2] = [0x63, 0x00];
const SW_OUT_OF_RANGE: [u8; 2] = [0x6A, 0x82];
const SW_UNSUPPORTED: [u8; 2] = [0x6D, 0x00];

/// Reader name used by [`MockBackend::new`]
pub const MOCK_READER_NAME: &str = "ACS ACR1252 1S CL Reader [ACR1252U] 00 00";

/// In-memory NTAG21x tag.
#[derive(Debug, Clone)]
pub struct MockTag {
    /// Answer to GET_UID
    pub uid: Vec<u8>,
    /// Whole memory, page 0 on
    pub pages: Vec<[u8; PAGE_SIZE]>,
    /// Set by the lock command; later page writes fail
    pub locked: bool,
    /// Testing hook: remaining failures per page for UPDATE BINARY
    pub write_failures: HashMap<u8, u32>,
    /// Testing hook: number of GET_UID calls that report a bad status
    pub uid_failures: u32,
}

impl MockTag {
    fn blank(uid: &[u8], total_pages: usize, cc_size: u8) -> Self {
        let mut pages = vec![[0u8; PAGE_SIZE]; total_pages];
        pages[0][..3].copy_from_slice(&uid[..uid.len().min(3)]);
        pages[CC_PAGE as usize] = [0xE1, 0x10, cc_size, 0x00];
        // empty NDEF TLV as shipped from the factory
        pages[4] = [0x03, 0x00, 0xFE, 0x00];
        Self {
            uid: uid.to_vec(),
            pages,
            locked: false,
            write_failures: HashMap::new(),
            uid_failures: 0,
        }
    }

    /// 45 pages, 144 byte user area
    pub fn ntag213(uid: &[u8]) -> Self {
        Self::blank(uid, 45, 0x12)
    }

    /// 135 pages, 504 byte user area
    pub fn ntag215(uid: &[u8]) -> Self {
        Self::blank(uid, 135, 0x3E)
    }

    /// 231 pages, 888 byte user area
    pub fn ntag216(uid: &[u8]) -> Self {
        Self::blank(uid, 231, 0x6D)
    }

    /// Store `bytes` from page 4 onwards, zero-padding the last page.
    pub fn with_user_data(mut self, bytes: &[u8]) -> Self {
        for (i, chunk) in bytes.chunks(PAGE_SIZE).enumerate() {
            let mut page = [0u8; PAGE_SIZE];
            page[..chunk.len()].copy_from_slice(chunk);
            self.pages[4 + i] = page;
        }
        self
    }

    /// Refuse the next `times` writes to `page`
    pub fn with_write_failure(mut self, page: u8, times: u32) -> Self {
        self.write_failures.insert(page, times);
        self
    }

    /// Answer the next `times` GET_UID calls with an error status
    pub fn with_uid_failures(mut self, times: u32) -> Self {
        self.uid_failures = times;
        self
    }

    /// Start out locked
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    /// Flat copy of the user area starting at page 4
    pub fn user_data(&self) -> Vec<u8> {
        self.pages[4..].iter().flatten().copied().collect()
    }

    fn respond(&mut self, apdu: &[u8]) -> Vec<u8> {
        if apdu == crate::constants::GET_UID {
            if self.uid_failures > 0 {
                self.uid_failures -= 1;
                return SW_WRITE_FAILED.to_vec();
            }
            let mut r = self.uid.clone();
            r.extend_from_slice(&SW_OK);
            return r;
        }

        if apdu.len() == 5 && apdu[..3] == READ_PAGE_PREFIX {
            let page = apdu[3] as usize;
            return match self.pages.get(page) {
                Some(data) => {
                    let mut r = data.to_vec();
                    r.extend_from_slice(&SW_OK);
                    r
                }
                None => SW_OUT_OF_RANGE.to_vec(),
            };
        }

        if apdu.len() == 5 + PAGE_SIZE && apdu[..3] == UPDATE_PAGE_PREFIX {
            let page = apdu[3];
            if let Some(left) = self.write_failures.get_mut(&page) {
                if *left > 0 {
                    *left -= 1;
                    return SW_WRITE_FAILED.to_vec();
                }
            }
            if self.locked {
                return SW_WRITE_FAILED.to_vec();
            }
            if page == LOCK_PAGE {
                self.locked = true;
                return SW_OK.to_vec();
            }
            if page == CC_PAGE {
                // one-time programmable: bits can only be set
                for (slot, b) in self.pages[CC_PAGE as usize].iter_mut().zip(&apdu[5..]) {
                    *slot |= b;
                }
                return SW_OK.to_vec();
            }
            return match self.pages.get_mut(page as usize) {
                Some(slot) => {
                    slot.copy_from_slice(&apdu[5..]);
                    SW_OK.to_vec()
                }
                None => SW_OUT_OF_RANGE.to_vec(),
            };
        }

        SW_UNSUPPORTED.to_vec()
    }
}

/// Shared state behind a [`MockBackend`] and every transport it hands out.
#[derive(Debug, Default)]
pub struct MockState {
    /// Reader names returned by `list_readers`
    pub readers: Vec<String>,
    /// Tags known to the simulation, keyed by UID
    pub tags: HashMap<Vec<u8>, MockTag>,
    /// Upcoming presentations; `None` means the tag was taken away
    pub schedule: VecDeque<Option<Vec<u8>>>,
    /// Tag currently on the reader
    pub current: Option<Vec<u8>>,
    /// Every APDU transmitted, in order
    pub sent: Vec<Vec<u8>>,
    /// Protocols for which `connect` is refused
    pub refused_protocols: Vec<LinkProtocol>,
    /// Testing hook: number of upcoming `connect` calls that fail
    pub connect_failures: u32,
    /// Successful `connect` calls
    pub connects: usize,
    /// Transports disconnected
    pub disconnects: usize,
    /// Transports handed out and not yet disconnected
    pub open_channels: usize,
}

impl MockState {
    /// Number of page writes (UPDATE BINARY) issued so far
    pub fn write_count(&self) -> usize {
        self.sent
            .iter()
            .filter(|a| a.len() > 3 && a[..3] == UPDATE_PAGE_PREFIX)
            .count()
    }
}

/// Mock reader backend for unit tests. Each successful `connect` moves to
/// the next scheduled presentation; once the schedule is drained the last
/// tag stays on the reader.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    /// One reader named [`MOCK_READER_NAME`], no tags
    pub fn new() -> Self {
        Self::with_readers(&[MOCK_READER_NAME])
    }

    /// Backend listing exactly `names`
    pub fn with_readers(names: &[&str]) -> Self {
        let state = MockState {
            readers: names.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Lock the shared state for inspection or tweaking.
    pub fn state(&self) -> MutexGuard<'_, MockState> {
        // a panicking test thread must not hide state from the others
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Register `tag` (if new) and schedule it for presentation.
    pub fn present(&self, tag: MockTag) {
        let mut st = self.state();
        let uid = tag.uid.clone();
        st.tags.entry(uid.clone()).or_insert(tag);
        st.schedule.push_back(Some(uid));
    }

    /// Schedule an already registered tag again.
    pub fn present_uid(&self, uid: &[u8]) {
        self.state().schedule.push_back(Some(uid.to_vec()));
    }

    /// Schedule removal of whatever tag is on the reader.
    pub fn remove_tag(&self) {
        self.state().schedule.push_back(None);
    }

    /// Snapshot of a tag's current memory.
    pub fn tag(&self, uid: &[u8]) -> Option<MockTag> {
        self.state().tags.get(uid).cloned()
    }

    /// Fail every `connect` requesting `protocol`
    pub fn refuse_protocol(&self, protocol: LinkProtocol) {
        self.state().refused_protocols.push(protocol);
    }

    /// Fail the next `n` `connect` calls
    pub fn set_connect_failures(&self, n: u32) {
        self.state().connect_failures = n;
    }
}

impl ReaderBackend for MockBackend {
    fn list_readers(&mut self) -> Result<Vec<String>> {
        Ok(self.state().readers.clone())
    }

    fn connect(&mut self, reader: &str, protocol: LinkProtocol) -> Result<Box<dyn Transport>> {
        let mut st = self.state();
        if !st.readers.iter().any(|r| r == reader) {
            return Err(Error::DeviceNotFound);
        }
        if st.connect_failures > 0 {
            st.connect_failures -= 1;
            return Err(Error::Transport("sharing violation".into()));
        }
        if st.refused_protocols.contains(&protocol) {
            return Err(Error::Transport(format!("protocol {} not supported", protocol)));
        }
        // peek first: a failed connect must not consume a presentation
        let next = match st.schedule.front() {
            Some(next) => next.clone(),
            None => st.current.clone(),
        };
        let uid = match next {
            Some(uid) => uid,
            None => {
                st.schedule.pop_front();
                st.current = None;
                return Err(Error::Transport("No smart card inserted".into()));
            }
        };
        st.schedule.pop_front();
        st.current = Some(uid.clone());
        st.connects += 1;
        st.open_channels += 1;
        Ok(Box::new(MockTransport {
            state: self.state.clone(),
            uid,
            open: true,
        }))
    }
}

/// Connection to one simulated tag.
#[derive(Debug)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
    uid: Vec<u8>,
    open: bool,
}

impl Transport for MockTransport {
    fn transmit(&mut self, apdu: &[u8]) -> Result<Vec<u8>> {
        let mut st = self.state.lock().unwrap_or_else(|p| p.into_inner());
        if !self.open {
            return Err(Error::Transport("Card is not connected".into()));
        }
        st.sent.push(apdu.to_vec());
        if st.current.as_deref() != Some(self.uid.as_slice()) {
            return Err(Error::Transport("Card was removed".into()));
        }
        let uid = self.uid.clone();
        match st.tags.get_mut(&uid) {
            Some(tag) => Ok(tag.respond(apdu)),
            None => Err(Error::Transport("Card is unpowered".into())),
        }
    }

    fn disconnect(&mut self) -> Result<()> {
        if self.open {
            self.open = false;
            let mut st = self.state.lock().unwrap_or_else(|p| p.into_inner());
            st.disconnects += 1;
            st.open_channels -= 1;
        }
        Ok(())
    }
}
