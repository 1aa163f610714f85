use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation signal. Tile workers poll it before taking each
/// tile; a tile already being rendered always finishes.
pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

/// Shareable flag: clones observe the same state, and once cancelled it stays
/// cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

impl CancelToken for CancellationFlag {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Token for runs that always go to the end.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Any `Fn() -> bool` works as a token, e.g. a deadline check.
impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_cancelled(&self) -> bool {
        self()
    }
}
