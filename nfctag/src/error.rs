// nfctag/src/error.rs
//! Error type shared by every layer.

use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum Error {
    /// No reader is attached, or none passed the deny list
    #[error("no NFC reader found")]
    DeviceNotFound,

    /// PC/SC service or driver failure
    #[cfg(feature = "pcsc")]
    #[error("pcsc error: {0}")]
    Pcsc(#[from] pcsc::Error),

    /// Transport failure reported as text
    #[error("transport error: {0}")]
    Transport(String),

    /// Nothing answered the identity query
    #[error("no tag present")]
    NoTag,

    /// Response shorter or longer than the command allows
    #[error("invalid response length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Command answered with a status word other than 90 00
    #[error("command failed: SW1={sw1:02X} SW2={sw2:02X}")]
    Status { sw1: u8, sw2: u8 },

    /// A page write was refused
    #[error("failed to write page {page}: SW1={sw1:02X} SW2={sw2:02X}")]
    PageWrite { page: u8, sw1: u8, sw2: u8 },

    /// The capability container could not be written
    #[error("NDEF initialization failed: SW1={sw1:02X} SW2={sw2:02X}")]
    NdefInit { sw1: u8, sw2: u8 },

    /// The lock bytes could not be written
    #[error("failed to lock tag: SW1={sw1:02X} SW2={sw2:02X}")]
    Lock { sw1: u8, sw2: u8 },

    /// Tag memory or record bytes are malformed
    #[error("malformed NDEF data: {0}")]
    Format(String),

    /// Payload longer than a short record can carry
    #[error("payload of {size} bytes does not fit in a short record")]
    PayloadTooLarge { size: usize },

    /// Read-back does not match what was written
    #[error("verification failed: {0}")]
    Verification(String),

    /// Address rejected by normalization
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Batch size below one
    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),

    /// The copy source was offered as a target
    #[error("source tag presented, please use a different tag")]
    SourceTagPresented,

    /// No source captured, or it holds no URI or text record
    #[error("no source tag content stored")]
    NoSourceContent,

    /// Deadline passed without a tag
    #[error("operation timed out")]
    Timeout,

    /// Stop was requested
    #[error("operation stopped")]
    Stopped,

    /// A worker operation is already running
    #[error("another operation is still running")]
    Busy,

    /// Worker thread could not be spawned
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Transport errors raised when a tag is simply taken off the reader.
    /// These happen on every removal and are not worth reporting.
    pub fn is_disconnect(&self) -> bool {
        const QUIET: [&str; 4] = [
            "card is not connected",
            "no smart card inserted",
            "card is unpowered",
            "removed",
        ];
        match self {
            Error::NoTag => true,
            Error::Transport(msg) => {
                let msg = msg.to_lowercase();
                QUIET.iter().any(|q| msg.contains(q))
            }
            #[cfg(feature = "pcsc")]
            Error::Pcsc(e) => matches!(
                e,
                pcsc::Error::NoSmartcard
                    | pcsc::Error::RemovedCard
                    | pcsc::Error::UnpoweredCard
                    | pcsc::Error::ResetCard
            ),
            _ => false,
        }
    }
}

/// Result alias over [`enum@Error`]
pub type Result<T> = std::result::Result<T, Error>;
