// nfctag/src/device/models/mod.rs
//! Reader families and their timing profiles.

pub mod config;

use std::time::Duration;

use derive_more::Display;

use crate::constants::{EXTENDED_END_PAGE, REDUCED_END_PAGE};
use crate::types::LinkProtocol;
use crate::utils::retry::RetryPolicy;
use crate::utils::timeout::ms;

/// Reader model families recognised by name. Order of [`ReaderModel::ALL`]
/// is the match order: first substring hit wins.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ReaderModel {
    /// ACS ACR1252U
    #[display(fmt = "ACR1252U")]
    Acr1252,
    /// ACS ACR122U, slower to reconnect
    #[display(fmt = "ACR122U")]
    Acr122,
    /// Other ACS readers
    #[display(fmt = "ACS Reader")]
    Acs,
    /// SCM Microsystems readers
    #[display(fmt = "SCM Reader")]
    Scm,
    /// HID Omnikey readers
    #[display(fmt = "HID Omnikey")]
    Omnikey,
    /// Sony PaSoRi RC-S380
    #[display(fmt = "Sony RC-S380")]
    SonyRcs380,
    /// NXP PN53x based readers
    #[display(fmt = "PN532")]
    Pn53x,
}

impl ReaderModel {
    /// Every model, in match order
    pub const ALL: [ReaderModel; 7] = [
        Self::Acr1252,
        Self::Acr122,
        Self::Acs,
        Self::Scm,
        Self::Omnikey,
        Self::SonyRcs380,
        Self::Pn53x,
    ];

    /// Substring identifying the model in a PC/SC reader name
    pub fn name_pattern(&self) -> &'static str {
        match self {
            Self::Acr1252 => "ACR1252",
            Self::Acr122 => "ACR122",
            Self::Acs => "ACS ACR",
            Self::Scm => "SCM Microsystems",
            Self::Omnikey => "OMNIKEY",
            Self::SonyRcs380 => "Sony",
            Self::Pn53x => "PN53",
        }
    }

    /// Classify a reader name. Deny-listed names and unknown readers
    /// yield `None`.
    pub fn from_reader_name(name: &str) -> Option<Self> {
        if is_denied(name) {
            return None;
        }
        Self::ALL
            .iter()
            .copied()
            .find(|m| name.contains(m.name_pattern()))
    }

    /// Timing and capacity parameters for this family
    pub fn profile(&self) -> ReaderProfile {
        match self {
            Self::Acr122 => ReaderProfile {
                debounce: ms(config::ACR122_DEBOUNCE_MS),
                connect: RetryPolicy::new(
                    config::ACR122_CONNECT_ATTEMPTS,
                    ms(config::CONNECT_BACKOFF_MS),
                ),
                protocols: config::ACR122_PROTOCOLS.to_vec(),
                extended_end_page: REDUCED_END_PAGE,
            },
            _ => ReaderProfile::default(),
        }
    }
}

/// True if `name` belongs to a reader that must be ignored.
pub fn is_denied(name: &str) -> bool {
    config::DENY_LIST.iter().any(|d| name.contains(d))
}

/// Model-dependent parameters used by the device session and memory reader.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReaderProfile {
    /// Minimum interval between two channel opens
    pub debounce: Duration,
    /// Connect rounds and linear backoff between them
    pub connect: RetryPolicy,
    /// Protocol order tried each round, before `Any`
    pub protocols: Vec<LinkProtocol>,
    /// Exclusive end page for extended reads
    pub extended_end_page: u8,
}

impl ReaderProfile {
    /// Full connect order for one round: the model order then `Any`.
    pub fn protocol_order(&self) -> Vec<LinkProtocol> {
        let mut order: Vec<_> = self
            .protocols
            .iter()
            .copied()
            .filter(|p| *p != LinkProtocol::Any)
            .collect();
        order.push(LinkProtocol::Any);
        order
    }

    /// Profile with no debounce and no backoff, for tests and simulations.
    pub fn immediate() -> Self {
        Self {
            debounce: Duration::ZERO,
            connect: RetryPolicy::new(config::CONNECT_ATTEMPTS, Duration::ZERO),
            ..Self::default()
        }
    }
}

impl Default for ReaderProfile {
    fn default() -> Self {
        Self {
            debounce: ms(config::DEBOUNCE_MS),
            connect: RetryPolicy::new(config::CONNECT_ATTEMPTS, ms(config::CONNECT_BACKOFF_MS)),
            protocols: config::DEFAULT_PROTOCOLS.to_vec(),
            extended_end_page: EXTENDED_END_PAGE,
        }
    }
}
