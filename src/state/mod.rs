//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by page (`datasets`, `dataset_profile`, `wizard`,
//! `protocol`) so components depend on small focused models. `history` is the
//! generic undo/redo buffer those models are wrapped in where edits can be
//! reverted.

pub mod dataset_profile;
pub mod datasets;
pub mod history;
pub mod protocol;
pub mod tooltip;
pub mod wizard;
