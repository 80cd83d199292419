// nfctag/src/transport/traits.rs
//! Backend and transport seams.

use crate::types::LinkProtocol;
use crate::Result;

/// Transport trait abstracts APDU I/O away from protocol/tag logic.
///
/// One `Transport` is one connection to one presented tag. It is owned by a
/// [`Channel`](crate::device::Channel) which disconnects it on drop.
pub trait Transport: Send {
    /// Send a raw APDU and return the raw response (data followed by the
    /// two status word bytes).
    fn transmit(&mut self, apdu: &[u8]) -> Result<Vec<u8>>;

    /// Release the connection. Called at most once.
    fn disconnect(&mut self) -> Result<()>;
}

/// Reader enumeration and connection, the OS-facing half of a device
/// session.
pub trait ReaderBackend: Send {
    /// Names of all readers currently attached
    fn list_readers(&mut self) -> Result<Vec<String>>;

    /// Connect to whatever tag is on `reader` using `protocol`
    fn connect(&mut self, reader: &str, protocol: LinkProtocol) -> Result<Box<dyn Transport>>;
}
