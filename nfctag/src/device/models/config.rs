//! Per-family timing and capacity parameters

use crate::types::LinkProtocol;

/// Minimum interval between two channel opens (ms)
pub const DEBOUNCE_MS: u64 = 100;

/// ACR122 drivers need a little longer between opens (ms)
pub const ACR122_DEBOUNCE_MS: u64 = 150;

/// Connect rounds over the protocol list
pub const CONNECT_ATTEMPTS: u32 = 5;
/// Connect rounds on ACR122 readers
pub const ACR122_CONNECT_ATTEMPTS: u32 = 6;

/// Backoff base between connect rounds (ms), multiplied by the round number
pub const CONNECT_BACKOFF_MS: u64 = 100;

/// Protocol order tried on most readers; `Any` always comes last
pub const DEFAULT_PROTOCOLS: &[LinkProtocol] = &[LinkProtocol::T1, LinkProtocol::T0];

/// The PN53x based ACR122 negotiates T0 more reliably
pub const ACR122_PROTOCOLS: &[LinkProtocol] = &[LinkProtocol::T0, LinkProtocol::T1];

/// Readers whose names contain one of these are identity or security-key
/// readers and never carry NFC tags.
pub const DENY_LIST: &[&str] = &[
    "Yubico",
    "YubiKey",
    "Smart Card Reader",
    "USB Smart Card Reader",
    "Common Access Card",
    "CAC Reader",
    "PIV Reader",
    "EMV Reader",
];
