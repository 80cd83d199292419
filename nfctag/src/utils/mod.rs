//! Utilities for nfctag: hex formatting, timing defaults and the shared
//! retry combinator.

pub mod hex;
pub mod retry;
pub mod timeout;

pub use hex::*;
pub use retry::RetryPolicy;
pub use timeout::*;
