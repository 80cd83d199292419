// nfctag/src/transport/mod.rs
//! Reader backends.

pub mod mock;
#[cfg(feature = "pcsc")]
pub mod pcsc;
pub mod traits;

pub use mock::{MockBackend, MockTag};
#[cfg(feature = "pcsc")]
pub use self::pcsc::PcscBackend;
pub use traits::{ReaderBackend, Transport};
