// nfctag/src/device/session.rs
//! Reader discovery and channel negotiation.

use std::time::Instant;

use log::{debug, info};

use crate::device::channel::Channel;
use crate::device::models::{ReaderModel, ReaderProfile};
use crate::transport::ReaderBackend;
use crate::{Error, Result};

/// The reader selected by [`DeviceSession::find_device`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderInfo {
    /// Full PC/SC reader name
    pub name: String,
    /// Family recognised from the name
    pub model: ReaderModel,
}

impl ReaderInfo {
    /// First word of the PC/SC name, used as a short device id
    pub fn id(&self) -> &str {
        self.name.split(' ').next().unwrap_or(&self.name)
    }

    /// Human readable label, e.g. `ACR1252U connected (ACS)`
    pub fn label(&self) -> String {
        format!("{} connected ({})", self.model, self.id())
    }
}

/// Owns the reader backend and hands out one [`Channel`] per polling tick.
pub struct DeviceSession {
    backend: Box<dyn ReaderBackend>,
    reader: Option<ReaderInfo>,
    profile_override: Option<ReaderProfile>,
    last_open: Option<Instant>,
}

impl DeviceSession {
    /// Session over `backend`, no reader selected yet
    pub fn new(backend: Box<dyn ReaderBackend>) -> Self {
        Self {
            backend,
            reader: None,
            profile_override: None,
            last_open: None,
        }
    }

    /// Use `profile` regardless of the detected reader model.
    pub fn set_profile(&mut self, profile: ReaderProfile) {
        self.profile_override = Some(profile);
    }

    /// Profile in effect for the selected reader
    pub fn profile(&self) -> ReaderProfile {
        match (&self.profile_override, &self.reader) {
            (Some(p), _) => p.clone(),
            (None, Some(r)) => r.model.profile(),
            (None, None) => ReaderProfile::default(),
        }
    }

    /// Reader chosen by the last `find_device`
    pub fn reader(&self) -> Option<&ReaderInfo> {
        self.reader.as_ref()
    }

    /// Enumerate readers and select the first known NFC reader.
    pub fn find_device(&mut self) -> Result<ReaderInfo> {
        self.reader = None;
        let names = self.backend.list_readers()?;
        for name in names {
            match ReaderModel::from_reader_name(&name) {
                Some(model) => {
                    let found = ReaderInfo { name, model };
                    info!("reader selected: {}", found.name);
                    self.reader = Some(found.clone());
                    return Ok(found);
                }
                None => debug!("ignoring reader '{}'", name),
            }
        }
        Err(Error::DeviceNotFound)
    }

    /// Open a channel to the tag on the selected reader.
    ///
    /// Calls closer together than the profile's debounce interval return
    /// `None` without touching the driver. Otherwise every protocol in the
    /// profile order is tried each round, and a connection only counts once
    /// the tag answers the identity query. Never fails loudly: `None` after
    /// all rounds are exhausted.
    pub fn open_channel(&mut self) -> Option<Channel> {
        let reader = self.reader.as_ref()?.name.clone();
        let profile = self.profile();

        if let Some(last) = self.last_open {
            if last.elapsed() < profile.debounce {
                return None;
            }
        }
        self.last_open = Some(Instant::now());

        let order = profile.protocol_order();
        let attempts = profile.connect.attempts.max(1);
        let backend = &mut self.backend;
        let result = profile.connect.run(|attempt| {
            let mut last_err = Error::NoTag;
            for protocol in &order {
                match backend.connect(&reader, *protocol) {
                    Ok(transport) => {
                        let mut channel = Channel::new(transport, *protocol)
                            .with_extended_end_page(profile.extended_end_page);
                        if channel.uid().is_some() {
                            return Ok(channel);
                        }
                        // dropping the channel disconnects it
                        last_err = Error::NoTag;
                    }
                    Err(e) => {
                        if attempt == attempts {
                            debug!("connect with {} failed: {}", protocol, e);
                        }
                        last_err = e;
                    }
                }
            }
            Err(last_err)
        });

        match result {
            Ok(channel) => {
                debug!("connected with protocol {}", channel.protocol());
                Some(channel)
            }
            Err(e) => {
                debug!("all connection attempts failed: {}", e);
                None
            }
        }
    }
}
