//! Bounded linear undo/redo history over an arbitrary value.
//!
//! DESIGN
//! ======
//! The history is a window of snapshots plus a cursor marking the present.
//! `undo`/`redo` only move the cursor; `set` truncates the redo tail before
//! appending, so the history never branches. When the window grows past its
//! limit the oldest snapshots fall off the front and the cursor shifts with
//! them, keeping the present value in place.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

/// Snapshot limit used when the caller does not supply one.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Linear undo/redo history.
///
/// Invariants: `cursor < snapshots.len()` and `1 <= snapshots.len() <= limit`.
#[derive(Clone, Debug, PartialEq)]
pub struct History<V> {
    snapshots: VecDeque<V>,
    cursor: usize,
    limit: usize,
}

impl<V> History<V> {
    /// Start a history with a single snapshot.
    ///
    /// A `limit` of zero is treated as one; the present value must always be
    /// retained.
    pub fn new(initial: V, limit: usize) -> Self {
        let mut snapshots = VecDeque::with_capacity(limit.clamp(1, DEFAULT_HISTORY_LIMIT));
        snapshots.push_back(initial);
        Self { snapshots, cursor: 0, limit: limit.max(1) }
    }

    /// Start a history bounded by [`DEFAULT_HISTORY_LIMIT`].
    pub fn with_default_limit(initial: V) -> Self {
        Self::new(initial, DEFAULT_HISTORY_LIMIT)
    }

    /// The snapshot under the cursor.
    #[must_use]
    pub fn present(&self) -> &V {
        &self.snapshots[self.cursor]
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of retained snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`; a history holds at least its present snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Retained snapshots, oldest first.
    pub fn snapshots(&self) -> impl Iterator<Item = &V> {
        self.snapshots.iter()
    }

    /// Step back one snapshot. Returns `false` at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one snapshot. Returns `false` at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Discard all history and start over from `value`.
    pub fn reset(&mut self, value: V) {
        self.snapshots.clear();
        self.snapshots.push_back(value);
        self.cursor = 0;
    }

    fn push(&mut self, next: V) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(next);
        let overflow = self.snapshots.len().saturating_sub(self.limit);
        self.snapshots.drain(..overflow);
        self.cursor = self.snapshots.len() - 1;
    }
}

impl<V: PartialEq> History<V> {
    /// Record `next` as the new present value.
    ///
    /// Returns `false` without touching the history when `next` equals the
    /// present value. Otherwise any redo-able future is abandoned.
    pub fn set(&mut self, next: V) -> bool {
        if next == *self.present() {
            return false;
        }
        self.push(next);
        true
    }

    /// Compute the next value from the present one and record it via [`History::set`].
    pub fn update(&mut self, f: impl FnOnce(&V) -> V) -> bool {
        let next = f(self.present());
        self.set(next)
    }
}
