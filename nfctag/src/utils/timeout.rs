//! Timing defaults shared by the reader, writer and session loops.

use std::time::Duration;

/// Delay between two polling iterations of a session loop
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 200;

/// Inactivity window after which a continuous scan gives up
pub const DEFAULT_SCAN_TIMEOUT_MS: u64 = 30_000;

/// Bound on how long `read_source` waits for a tag
pub const DEFAULT_SOURCE_TIMEOUT_MS: u64 = 30_000;

/// Pause after the source tag is re-presented during a copy
pub const DEFAULT_SOURCE_REJECT_PAUSE_MS: u64 = 1_000;

/// Base delay for linear backoff (`base * attempt`)
pub const DEFAULT_BACKOFF_MS: u64 = 100;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Sleep for `total`, waking every `slice` to check `cancelled`.
/// Returns `true` if the wait was cut short.
pub fn sleep_unless(total: Duration, slice: Duration, cancelled: impl Fn() -> bool) -> bool {
    let deadline = std::time::Instant::now() + total;
    loop {
        if cancelled() {
            return true;
        }
        let now = std::time::Instant::now();
        if now >= deadline {
            return false;
        }
        std::thread::sleep(slice.min(deadline - now));
    }
}
