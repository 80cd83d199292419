// nfctag/src/protocol/response.rs
//! APDU response parsing.

use crate::constants::SW_SUCCESS;
use crate::protocol::parser::ensure_len;
use crate::{Error, Result};

/// APDU response: data bytes followed by a two byte status word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Response body without the status word
    pub data: Vec<u8>,
    /// Status byte 1, 0x90 on success
    pub sw1: u8,
    /// Status byte 2
    pub sw2: u8,
}

impl Response {
    /// Split the trailing status word off a raw reader response.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        ensure_len(raw, 2)?;
        let split = raw.len() - 2;
        Ok(Self {
            data: raw[..split].to_vec(),
            sw1: raw[split],
            sw2: raw[split + 1],
        })
    }

    /// Build a response from parts (used by transports that already
    /// separate data and status).
    pub fn new(data: Vec<u8>, sw1: u8, sw2: u8) -> Self {
        Self { data, sw1, sw2 }
    }

    /// Only SW1 is compared; some readers report warnings in SW2.
    pub fn is_success(&self) -> bool {
        self.sw1 == SW_SUCCESS.0
    }

    /// Status word as `(SW1, SW2)`
    pub fn status(&self) -> (u8, u8) {
        (self.sw1, self.sw2)
    }

    /// Convert a non-success status into `Error::Status`.
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::Status {
                sw1: self.sw1,
                sw2: self.sw2,
            })
        }
    }
}
