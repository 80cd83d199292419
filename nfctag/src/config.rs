// nfctag/src/config.rs
//! Session tuning knobs.

use std::time::Duration;

use crate::tag::{WriteOptions, DEFAULT_VERIFY_PAGES};
use crate::utils::timeout::{
    ms, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SCAN_TIMEOUT_MS, DEFAULT_SOURCE_REJECT_PAUSE_MS,
    DEFAULT_SOURCE_TIMEOUT_MS,
};
use crate::utils::RetryPolicy;

/// Memory reads attempted when capturing a source tag
pub const DEFAULT_SOURCE_READ_ATTEMPTS: u32 = 3;

/// Timing and retry configuration for a [`TagSession`](crate::session::TagSession).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Delay between polling iterations
    pub poll_interval: Duration,
    /// A scan ends after this long without a new tag
    pub scan_timeout: Duration,
    /// Default bound for `read_source`
    pub source_timeout: Duration,
    /// Pause after the source tag shows up during a copy
    pub source_reject_pause: Duration,
    /// Retry policy of the write path
    pub retry: RetryPolicy,
    /// Re-read the first written pages after every write
    pub verify: bool,
    /// Pages covered by that re-read
    pub verify_pages: u8,
    /// Memory reads tried before a source tag is reported unreadable
    pub source_read_attempts: u32,
}

impl SessionConfig {
    /// Set the delay between polling iterations
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the idle timeout of a scan
    pub fn with_scan_timeout(mut self, timeout: Duration) -> Self {
        self.scan_timeout = timeout;
        self
    }

    /// Set the default `read_source` bound
    pub fn with_source_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout = timeout;
        self
    }

    /// Set the pause after the source tag is offered as a target
    pub fn with_source_reject_pause(mut self, pause: Duration) -> Self {
        self.source_reject_pause = pause;
        self
    }

    /// Set the write-path retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Enable or disable read-back verification
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Write options derived from this configuration.
    pub fn write_options(&self, lock: bool) -> WriteOptions {
        WriteOptions {
            lock,
            verify: self.verify,
            verify_pages: self.verify_pages,
            retry: self.retry,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval: ms(DEFAULT_POLL_INTERVAL_MS),
            scan_timeout: ms(DEFAULT_SCAN_TIMEOUT_MS),
            source_timeout: ms(DEFAULT_SOURCE_TIMEOUT_MS),
            source_reject_pause: ms(DEFAULT_SOURCE_REJECT_PAUSE_MS),
            retry: RetryPolicy::write_path(),
            verify: true,
            verify_pages: DEFAULT_VERIFY_PAGES,
            source_read_attempts: DEFAULT_SOURCE_READ_ATTEMPTS,
        }
    }
}
