// nfctag/src/prelude.rs
//! Common imports for applications.

pub use crate::address::{addresses_equivalent, normalize};
pub use crate::config::SessionConfig;
pub use crate::device::{Channel, DeviceSession, DeviceSessionBuilder, ReaderInfo, ReaderModel};
pub use crate::ndef::{decode, encode, NdefContent};
pub use crate::protocol::{Command, Response};
pub use crate::session::{
    Callbacks, Completion, Engine, Event, EventChannel, Outcome, SessionState, TagSession,
};
pub use crate::tag::{read_memory, write, WriteOptions};
pub use crate::{Error, ReadExtent, Result, TagFamily, TagUid};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex_spaced, format_pages, ms};
