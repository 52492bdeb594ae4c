//! Cooperative stop signal
//!
//! The hardware stop button delivers a single falling-edge event; on a
//! host the CLI arms SIGINT instead. Either way the handler only flips an
//! atomic flag, and the guarded region checks the flag cooperatively and
//! returns a distinct cancelled outcome rather than unwinding.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cancellation flag for the guarded script run.
///
/// Clones share one flag. Tripping is one-way; there is no reset, matching
/// the single-run lifecycle of the launcher.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    flag: Arc<AtomicBool>,
}

impl StopToken {
    /// Create an untripped token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Safe to call from a signal context.
    pub fn trip(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_tripped(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// The raw flag, for handing to a signal registration.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}
