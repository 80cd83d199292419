// nfctag/src/protocol/mod.rs
//! APDU commands and responses spoken to NTAG tags through a PC/SC reader.

pub mod commands;
pub mod parser;
pub mod response;

pub use commands::*;
pub use response::Response;
