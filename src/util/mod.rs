//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic to improve reuse and testability.

pub mod download;
pub mod draft_store;
pub mod generation;
pub mod keyboard;
pub mod markdown;
pub mod shortcuts;
pub mod task;
pub mod undo_redo;
pub mod upload;
