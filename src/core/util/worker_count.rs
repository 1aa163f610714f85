use std::num::NonZeroUsize;

/// Number of workers to use when the caller has no preference.
#[must_use]
pub fn default_worker_count() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

/// Caps `requested` so no worker is started without at least one unit of work.
#[must_use]
pub fn workers_for_units(requested: NonZeroUsize, units: usize) -> NonZeroUsize {
    NonZeroUsize::new(requested.get().min(units)).unwrap_or(NonZeroUsize::MIN)
}
