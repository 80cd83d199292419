// nfctag/src/lib.rs

//! nfctag
//!
//! NTAG reading, writing and copying through PC/SC contactless readers.
//!
//! The layers, bottom up: [`transport`] talks to the OS, [`device`] picks a
//! reader and opens one [`device::Channel`] per polling tick, [`tag`] reads
//! and writes pages, [`ndef`] turns pages into addresses and back, and
//! [`session`] runs the polling loops.
#![warn(missing_docs)]

pub mod address;
pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod history;
pub mod ndef;
pub mod prelude;
pub mod protocol;
pub mod session;
pub mod tag;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;
