//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dataset, analysis and report surfaces. They take data
//! and callbacks as props; pages own fetching and state.

pub mod data_grid;
pub mod error_banner;
pub mod help_shortcuts_modal;
pub mod quality_panel;
pub mod report_export;
pub mod result_view;
pub mod term_tooltip;
pub mod undo_controls;
pub mod variable_mapping_panel;
