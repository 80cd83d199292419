// nfctag/src/transport/pcsc.rs
//! PC/SC reader backend.

#![cfg(feature = "pcsc")]

use std::ffi::CString;

use log::debug;
use ::pcsc::{Card, Context, Disposition, Protocols, Scope, ShareMode, MAX_BUFFER_SIZE};

use crate::transport::traits::{ReaderBackend, Transport};
use crate::types::LinkProtocol;
use crate::{Error, Result};

/// PC/SC backend. It establishes one user-scope context and connects in
/// shared mode so other applications can still see the reader.
pub struct PcscBackend {
    context: Context,
}

impl PcscBackend {
    /// Establish a PC/SC context
    pub fn open() -> Result<Self> {
        let context = Context::establish(Scope::User)?;
        Ok(Self { context })
    }
}

fn protocols_for(protocol: LinkProtocol) -> Protocols {
    match protocol {
        LinkProtocol::T0 => Protocols::T0,
        LinkProtocol::T1 => Protocols::T1,
        LinkProtocol::Any => Protocols::ANY,
    }
}

impl ReaderBackend for PcscBackend {
    fn list_readers(&mut self) -> Result<Vec<String>> {
        let names = match self.context.list_readers_owned() {
            Ok(names) => names,
            // no reader attached is not an error for enumeration
            Err(::pcsc::Error::NoReadersAvailable) => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(names
            .into_iter()
            .map(|n| n.to_string_lossy().into_owned())
            .collect())
    }

    fn connect(&mut self, reader: &str, protocol: LinkProtocol) -> Result<Box<dyn Transport>> {
        let name = CString::new(reader)
            .map_err(|_| Error::Transport(format!("invalid reader name: {}", reader)))?;
        let card = self
            .context
            .connect(&name, ShareMode::Shared, protocols_for(protocol))?;
        debug!("pcsc: connected to '{}' with {}", reader, protocol);
        Ok(Box::new(PcscTransport { card: Some(card) }))
    }
}

/// A connected PC/SC card handle.
pub struct PcscTransport {
    card: Option<Card>,
}

impl Transport for PcscTransport {
    fn transmit(&mut self, apdu: &[u8]) -> Result<Vec<u8>> {
        let card = self
            .card
            .as_ref()
            .ok_or_else(|| Error::Transport("Card is not connected".into()))?;
        let mut buf = [0u8; MAX_BUFFER_SIZE];
        let resp = card.transmit(apdu, &mut buf)?;
        Ok(resp.to_vec())
    }

    fn disconnect(&mut self) -> Result<()> {
        if let Some(card) = self.card.take() {
            card.disconnect(Disposition::LeaveCard)
                .map_err(|(_, e)| Error::from(e))?;
        }
        Ok(())
    }
}
