//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize the mock reader setup so tests across the crate
//! and the tests/ directory build sessions the same way.
#![allow(dead_code)]

use std::time::Duration;

use crate::config::SessionConfig;
use crate::device::{DeviceSession, ReaderProfile};
use crate::session::{Callbacks, TagSession};
use crate::transport::mock::MockBackend;
use crate::utils::RetryPolicy;

/// Configuration with millisecond timings so loops finish quickly.
#[doc(hidden)]
pub fn quick_config() -> SessionConfig {
    SessionConfig::default()
        .with_poll_interval(Duration::from_millis(1))
        .with_scan_timeout(Duration::from_millis(100))
        .with_source_timeout(Duration::from_millis(500))
        .with_source_reject_pause(Duration::from_millis(1))
        .with_retry(RetryPolicy::new(3, Duration::ZERO))
}

/// Device session over `backend` with no debounce and no connect backoff.
#[doc(hidden)]
pub fn mock_device(backend: MockBackend) -> DeviceSession {
    let mut device = DeviceSession::new(Box::new(backend));
    device.set_profile(ReaderProfile::immediate());
    device
}

/// Complete tag session over `backend`.
#[doc(hidden)]
pub fn mock_session(backend: MockBackend, config: SessionConfig, callbacks: Callbacks) -> TagSession {
    TagSession::new(mock_device(backend), config, callbacks)
}
