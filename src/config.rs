//! Client configuration.
//!
//! The API base path is fixed at build time from `ANALYSIS_API_BASE` so the
//! same bundle can be pointed at a proxied `/api/v1` or an absolute backend
//! URL. Everything else is a compiled-in default.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::state::history::DEFAULT_HISTORY_LIMIT;

/// Base path used when `ANALYSIS_API_BASE` is unset or blank.
pub const DEFAULT_API_BASE: &str = "/api/v1";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every API path.
    pub api_base: String,
    /// Undo/redo snapshot limit for editable pages.
    pub history_limit: usize,
    /// Quiet period before a variable-mapping edit is saved.
    pub mapping_save_debounce: Duration,
    /// Rows per dataset page.
    pub page_size: u32,
    /// Delay between protocol run status polls.
    pub run_poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            mapping_save_debounce: Duration::from_millis(600),
            page_size: 50,
            run_poll_interval: Duration::from_secs(2),
        }
    }
}

impl ClientConfig {
    /// Defaults with the API base taken from the build environment.
    pub fn from_build_env() -> Self {
        Self { api_base: api_base_from(option_env!("ANALYSIS_API_BASE")), ..Self::default() }
    }
}

fn api_base_from(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(base) if !base.is_empty() => base.trim_end_matches('/').to_owned(),
        _ => DEFAULT_API_BASE.to_owned(),
    }
}
