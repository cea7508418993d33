//! Request generations for last-issued-wins response handling.
//!
//! Every outgoing request takes a [`Generation`] from a shared
//! [`GenerationCounter`]. When its response arrives, the response is applied
//! only if no newer generation has been issued in the meantime.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Sequence number attached to one outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Raw sequence number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic generation source. Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
    latest: Arc<AtomicU64>,
}

impl GenerationCounter {
    /// Create a counter at generation zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next generation, superseding all earlier ones.
    pub fn next(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Most recently issued generation.
    #[must_use]
    pub fn latest(&self) -> Generation {
        Generation(self.latest.load(Ordering::Acquire))
    }

    /// Whether `generation` is still the most recent one.
    #[must_use]
    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest() == generation
    }
}
