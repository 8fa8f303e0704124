//! Generation counter for discarding stale async results.
//!
//! SYSTEM CONTEXT
//! ==============
//! Fetches are not cancelled at the network level, so any async task that
//! writes back into page state first checks that its ticket is still the
//! newest one. Tooltip lookups and the debounced variable-mapping save both
//! use this: a new term, a new edit, or an unmount bumps the generation and
//! every older in-flight result is dropped on arrival.

#[cfg(test)]
#[path = "generation_test.rs"]
mod generation_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Proof that a task was started at a particular generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Shared monotonically increasing generation.
///
/// Cloning shares the counter so a ticket taken from one clone is
/// invalidated by `begin`/`invalidate` on any other.
#[derive(Clone, Debug, Default)]
pub struct Generation {
    current: Arc<AtomicU64>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation and return its ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Make every outstanding ticket stale without issuing a new one.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }
}
