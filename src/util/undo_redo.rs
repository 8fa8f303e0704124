//! Reactive undo/redo binding over [`History`].
//!
//! Wraps a `History` in an `RwSignal` so views re-render when the present
//! value or undo/redo availability changes, and exposes the undo/redo
//! shortcuts as ready-made key bindings.

#[cfg(test)]
#[path = "undo_redo_test.rs"]
mod undo_redo_test;

use leptos::prelude::*;

use super::keyboard::KeyBindings;
use super::shortcuts::chords;
use crate::state::history::History;

pub struct UndoRedo<V: Send + Sync + 'static> {
    history: RwSignal<History<V>>,
}

impl<V: Send + Sync + 'static> Clone for UndoRedo<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: Send + Sync + 'static> Copy for UndoRedo<V> {}

impl<V> UndoRedo<V>
where
    V: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(initial: V, limit: usize) -> Self {
        Self { history: RwSignal::new(History::new(initial, limit)) }
    }

    /// Tracked read of the present value.
    pub fn value(&self) -> V {
        self.history.with(|h| h.present().clone())
    }

    pub fn value_untracked(&self) -> V {
        self.history.with_untracked(|h| h.present().clone())
    }

    /// Present value, or `None` once the owning scope is disposed.
    pub fn try_value_untracked(&self) -> Option<V> {
        self.history.try_with_untracked(|h| h.present().clone())
    }

    pub fn can_undo(&self) -> bool {
        self.history.with(History::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.history.with(History::can_redo)
    }

    /// Record `next` as a new snapshot. Returns `false` if unchanged.
    pub fn set(&self, next: V) -> bool {
        self.history.try_update(|h| h.set(next)).unwrap_or(false)
    }

    pub fn update(&self, f: impl FnOnce(&V) -> V) -> bool {
        self.history.try_update(|h| h.update(f)).unwrap_or(false)
    }

    pub fn undo(&self) -> bool {
        self.history.try_update(History::undo).unwrap_or(false)
    }

    pub fn redo(&self) -> bool {
        self.history.try_update(History::redo).unwrap_or(false)
    }

    /// Replace the whole history with `value`, e.g. after a fresh load.
    pub fn reset(&self, value: V) {
        self.history.update(|h| h.reset(value));
    }

    /// Undo and redo chords bound to this history.
    pub fn bindings(self) -> KeyBindings {
        KeyBindings::new()
            .with(chords::UNDO, Callback::new(move |_| {
                self.undo();
            }))
            .with(chords::REDO, Callback::new(move |_| {
                self.redo();
            }))
            .with(chords::REDO_ALT, Callback::new(move |_| {
                self.redo();
            }))
    }
}
