// nfctag/src/session/mod.rs
//! Polling loops over a [`DeviceSession`].
//!
//! A [`TagSession`] owns the device, its configuration and the callbacks.
//! Its operations block until they finish, time out or are stopped; the
//! [`Engine`] runs them on a worker thread.

pub mod batch;
pub mod copy;
pub mod engine;
pub mod events;
pub mod scan;
pub mod stop;

pub use batch::BatchReport;
pub use copy::SourceTag;
pub use engine::{Completion, Engine};
pub use events::{
    Callbacks, DebugSink, Event, EventChannel, InfoSink, ProgressSink, StatusSink,
};
pub use stop::StopHandle;

use std::sync::{Arc, Mutex};

use derive_more::Display;
use log::{debug, warn};

use crate::config::SessionConfig;
use crate::device::DeviceSession;
use crate::history::RecentAddresses;
use crate::utils::timeout::{ms, sleep_unless};
use crate::{Error, Result};

/// Where a session is in its polling cycle.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionState {
    /// No loop running
    #[default]
    #[display(fmt = "idle")]
    Idle,
    /// Polling for a tag
    #[display(fmt = "scanning")]
    Scanning,
    /// A new tag answered
    #[display(fmt = "tag detected")]
    TagDetected,
    /// Reading or writing the tag
    #[display(fmt = "processing")]
    Processing,
    /// The last loop ended on its deadline
    #[display(fmt = "timed out")]
    TimedOut,
}

/// Read-only view of a session's state that stays usable while a worker
/// holds the session.
#[derive(Debug, Clone, Default)]
pub struct StateHandle(Arc<Mutex<SessionState>>);

impl StateHandle {
    /// Latest state
    pub fn get(&self) -> SessionState {
        *self.0.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn set(&self, state: SessionState) {
        *self.0.lock().unwrap_or_else(|p| p.into_inner()) = state;
    }
}

/// How a loop ended.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every requested tag was handled
    #[display(fmt = "completed")]
    Completed,
    /// Deadline passed
    #[display(fmt = "timed out")]
    TimedOut,
    /// Stop was requested
    #[display(fmt = "stopped")]
    Stopped,
}

/// Longest single sleep between two stop-flag checks
const STOP_CHECK_SLICE_MS: u64 = 50;

/// A reader plus everything the polling loops need around it.
pub struct TagSession {
    device: DeviceSession,
    config: SessionConfig,
    callbacks: Callbacks,
    stop: StopHandle,
    state: StateHandle,
    source: Option<SourceTag>,
    history: RecentAddresses,
}

impl TagSession {
    /// Session over `device`, idle, with no source captured
    pub fn new(device: DeviceSession, config: SessionConfig, callbacks: Callbacks) -> Self {
        Self {
            device,
            config,
            callbacks,
            stop: StopHandle::new(),
            state: StateHandle::default(),
            source: None,
            history: RecentAddresses::default(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Replace the configuration; applies from the next loop
    pub fn set_config(&mut self, config: SessionConfig) {
        self.config = config;
    }

    /// Replace every sink
    pub fn set_callbacks(&mut self, callbacks: Callbacks) {
        self.callbacks = callbacks;
    }

    /// The underlying reader session
    pub fn device(&self) -> &DeviceSession {
        &self.device
    }

    /// Mutable access, e.g. to override the reader profile
    pub fn device_mut(&mut self) -> &mut DeviceSession {
        &mut self.device
    }

    /// Handle that stops the running loop from another thread.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Shared view of the session state
    pub fn state_handle(&self) -> StateHandle {
        self.state.clone()
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    /// Source tag captured by the last successful `read_source`
    pub fn source(&self) -> Option<&SourceTag> {
        self.source.as_ref()
    }

    /// Forget the captured source tag.
    pub fn reset_source(&mut self) {
        self.source = None;
    }

    /// Addresses handed to `batch_write`, most recent first
    pub fn history(&self) -> &RecentAddresses {
        &self.history
    }

    fn set_state(&self, state: SessionState) {
        if self.state.get() != state {
            debug!("session state: {} -> {}", self.state.get(), state);
            self.state.set(state);
            self.callbacks.state(state);
        }
    }

    fn status(&self, text: &str) {
        self.callbacks.status(text);
    }

    fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    /// Sleep for `duration`, waking early on stop. True if stopped.
    fn pause(&self, duration: std::time::Duration) -> bool {
        let stop = &self.stop;
        sleep_unless(duration, ms(STOP_CHECK_SLICE_MS), || stop.is_stopped())
    }

    /// Wait one poll interval. True if stopped meanwhile.
    fn wait_tick(&self) -> bool {
        self.pause(self.config.poll_interval)
    }

    /// Select a reader unless one is already selected.
    fn ensure_device(&mut self) -> Result<()> {
        if self.device.reader().is_some() {
            return Ok(());
        }
        match self.device.find_device() {
            Ok(reader) => {
                self.status(&reader.label());
                Ok(())
            }
            Err(e) => {
                self.status("Reader not found - Please connect an NFC reader");
                Err(e)
            }
        }
    }

    /// Surface a per-tick failure. Tag removal noise is only logged.
    fn report_error(&self, e: &Error) {
        if e.is_disconnect() {
            debug!("tag went away: {}", e);
            return;
        }
        warn!("{}", e);
        self.callbacks.debug("Error", &e.to_string());
        self.status(&format!("Error: {}", e));
    }

    fn check_quantity(&self, quantity: u32) -> Result<()> {
        if quantity < 1 {
            self.status("Error: Quantity must be at least 1");
            return Err(Error::InvalidQuantity(quantity));
        }
        Ok(())
    }

    /// Leave a loop: `TimedOut` is kept so the shell can see it.
    fn finish(&self, outcome: Outcome) -> Outcome {
        match outcome {
            Outcome::TimedOut => self.set_state(SessionState::TimedOut),
            _ => self.set_state(SessionState::Idle),
        }
        outcome
    }
}

impl std::fmt::Debug for TagSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagSession")
            .field("reader", &self.device.reader())
            .field("config", &self.config)
            .field("state", &self.state.get())
            .field("source", &self.source)
            .finish()
    }
}
