//! Bounded retry with linear backoff.
//!
//! Every retrying call site in the crate (channel negotiation, write-path
//! commands, source reads) goes through [`RetryPolicy::run`] so the attempt
//! count and delay are configured in one place.

use std::time::Duration;

use log::debug;

use crate::utils::timeout::{ms, DEFAULT_BACKOFF_MS};

/// Retry parameters: `attempts` tries in total, sleeping `base_delay * n`
/// after the n-th failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetryPolicy {
    /// Total tries, at least one is always made
    pub attempts: u32,
    /// Sleep after the first failure; later sleeps grow linearly
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Policy with `attempts` tries and `base_delay` backoff
    pub const fn new(attempts: u32, base_delay: Duration) -> Self {
        Self {
            attempts,
            base_delay,
        }
    }

    /// Policy used by write-path commands: 3 attempts, 100 ms linear backoff
    pub fn write_path() -> Self {
        Self::new(3, ms(DEFAULT_BACKOFF_MS))
    }

    /// Single attempt, no sleeping
    pub const fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Delay after the given 1-based failed attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }

    /// Run `op` until it succeeds or attempts are exhausted, returning the
    /// last error. `op` receives the 1-based attempt number.
    pub fn run<T, E, F>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Result<T, E>,
        E: std::fmt::Display,
    {
        let attempts = self.attempts.max(1);
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(v) => return Ok(v),
                Err(e) if attempt >= attempts => return Err(e),
                Err(e) => {
                    debug!("attempt {}/{} failed: {}", attempt, attempts, e);
                    let delay = self.delay_for(attempt);
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::write_path()
    }
}
