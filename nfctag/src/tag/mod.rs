// nfctag/src/tag/mod.rs
//! Reading and writing NTAG user memory through an open [`Channel`].
//!
//! [`Channel`]: crate::device::Channel

pub mod reader;
pub mod writer;

pub use reader::{
    read_capability, read_memory, read_page, read_tag, read_uid, CapabilityContainer, TagMemory,
};
pub use writer::{write, write_image, WriteOptions, WriteReport, DEFAULT_VERIFY_PAGES};
