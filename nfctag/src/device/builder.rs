// nfctag/src/device/builder.rs
//! Builder for [`DeviceSession`].

use crate::device::models::ReaderProfile;
use crate::device::session::DeviceSession;
use crate::transport::ReaderBackend;
use crate::{Error, Result};

/// Helper to construct a DeviceSession with optional configuration.
#[derive(Default)]
pub struct DeviceSessionBuilder {
    backend: Option<Box<dyn ReaderBackend>>,
    profile: Option<ReaderProfile>,
}

impl DeviceSessionBuilder {
    /// Empty builder; a backend is required
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide the reader backend (PC/SC, or a MockBackend in tests)
    pub fn with_backend(mut self, backend: Box<dyn ReaderBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Override the per-model profile
    pub fn with_profile(mut self, profile: ReaderProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Open the system PC/SC context as backend.
    #[cfg(feature = "pcsc")]
    pub fn with_pcsc(self) -> Result<Self> {
        let backend = crate::transport::PcscBackend::open()?;
        Ok(self.with_backend(Box::new(backend)))
    }

    /// Requires a backend; otherwise returns DeviceNotFound.
    pub fn build(self) -> Result<DeviceSession> {
        let backend = self.backend.ok_or(Error::DeviceNotFound)?;
        let mut session = DeviceSession::new(backend);
        if let Some(p) = self.profile {
            session.set_profile(p);
        }
        Ok(session)
    }
}
