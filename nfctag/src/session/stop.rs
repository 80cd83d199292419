// nfctag/src/session/stop.rs
//! Cooperative stop flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative stop flag shared between a worker and its owner.
///
/// Loops check it at the top of every iteration and after every sleep. A
/// command already in flight always completes first.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Flag in the running position
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop at its next check
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// True once `stop` was called and not reset
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear the flag before starting a new operation.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
