// nfctag/src/device/channel.rs
//! One open connection to a tag.

use log::{debug, trace};

use crate::protocol::{Command, Response};
use crate::transport::Transport;
use crate::constants::EXTENDED_END_PAGE;
use crate::types::{LinkProtocol, ReadExtent, TagUid};
use crate::utils::bytes_to_hex_spaced;
use crate::Result;

/// An open connection to the tag currently on the reader.
///
/// The underlying transport is disconnected when the channel is dropped, so
/// a channel can never outlive the polling iteration that opened it.
pub struct Channel {
    transport: Box<dyn Transport>,
    protocol: LinkProtocol,
    extended_end_page: u8,
    released: bool,
}

impl Channel {
    /// Wrap a connected transport
    pub fn new(transport: Box<dyn Transport>, protocol: LinkProtocol) -> Self {
        Self {
            transport,
            protocol,
            extended_end_page: EXTENDED_END_PAGE,
            released: false,
        }
    }

    /// Cap extended reads for readers that time out on long scans.
    pub fn with_extended_end_page(mut self, page: u8) -> Self {
        self.extended_end_page = page;
        self
    }

    /// Exclusive end page of a read of `extent` through this reader
    pub fn end_page(&self, extent: ReadExtent) -> u8 {
        match extent {
            ReadExtent::Compact => extent.end_page(),
            ReadExtent::Extended => self.extended_end_page.min(extent.end_page()),
        }
    }

    /// Execute a command and return the decoded response. A non-success
    /// status is not an error here; callers decide what it means.
    pub fn execute(&mut self, cmd: &Command) -> Result<Response> {
        let apdu = cmd.encode();
        trace!("> {} {}", cmd.name(), bytes_to_hex_spaced(&apdu));
        let raw = self.transport.transmit(&apdu)?;
        trace!("< {}", bytes_to_hex_spaced(&raw));
        Response::decode(&raw)
    }

    /// Identity query; `None` on a bad status or transport failure.
    pub fn uid(&mut self) -> Option<TagUid> {
        match self.execute(&Command::GetUid) {
            Ok(r) if r.is_success() && !r.data.is_empty() => Some(TagUid::from_bytes(&r.data)),
            Ok(r) => {
                debug!("GET_UID failed: SW1={:02X} SW2={:02X}", r.sw1, r.sw2);
                None
            }
            Err(e) => {
                debug!("GET_UID error: {}", e);
                None
            }
        }
    }

    /// Protocol the channel was negotiated with
    pub fn protocol(&self) -> LinkProtocol {
        self.protocol
    }

    /// Disconnect now instead of waiting for drop.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.transport.disconnect()
    }
}

impl Drop for Channel {
    fn drop(&mut self) {
        if !self.released {
            self.released = true;
            if let Err(e) = self.transport.disconnect() {
                debug!("disconnect failed: {}", e);
            }
        }
    }
}
