//! Term tooltip state.
//!
//! Only the most recent lookup may land: responses carry the
//! [`Ticket`] they were issued with and are dropped once it is stale.

#[cfg(test)]
#[path = "tooltip_test.rs"]
mod tooltip_test;

use crate::net::types::{ExplanationLevel, TermEntry};
use crate::util::generation::{Generation, Ticket};

#[derive(Clone, Debug, Default)]
pub struct TooltipState {
    pub term: Option<String>,
    pub level: ExplanationLevel,
    pub entry: Option<TermEntry>,
    pub loading: bool,
    pub error: Option<String>,
    generation: Generation,
}

impl TooltipState {
    /// Start a lookup for `term` at `level`, superseding any in flight.
    pub fn begin(&mut self, term: &str, level: ExplanationLevel) -> Ticket {
        self.term = Some(term.to_owned());
        self.level = level;
        self.entry = None;
        self.error = None;
        self.loading = true;
        self.generation.begin()
    }

    /// Apply a lookup result. Returns `false` when `ticket` is stale.
    pub fn resolve(&mut self, ticket: Ticket, result: Result<TermEntry, String>) -> bool {
        if !self.generation.is_current(ticket) {
            log::debug!("tooltip: dropped stale lookup");
            return false;
        }
        self.loading = false;
        match result {
            Ok(entry) => self.entry = Some(entry),
            Err(message) => self.error = Some(message),
        }
        true
    }

    /// Hide the tooltip and orphan any lookup in flight.
    pub fn close(&mut self) {
        self.generation.invalidate();
        self.term = None;
        self.entry = None;
        self.error = None;
        self.loading = false;
    }
}
