//! Protocol designer state: the designed protocol and its latest run.

#[cfg(test)]
#[path = "protocol_test.rs"]
mod protocol_test;

use crate::net::types::{AnalysisOutcome, Protocol, ProtocolRun, RunHandle, RunStatus};

#[derive(Clone, Debug, Default)]
pub struct ProtocolState {
    pub protocol: Option<Protocol>,
    /// Run id handed back by the backend, kept until a new run starts.
    pub run_id: Option<String>,
    pub run: Option<ProtocolRun>,
    pub designing: bool,
    pub running: bool,
    pub error: Option<String>,
}

impl ProtocolState {
    /// A new protocol discards any run of the previous one.
    pub fn set_protocol(&mut self, protocol: Protocol) {
        self.protocol = Some(protocol);
        self.run_id = None;
        self.run = None;
        self.running = false;
    }

    /// Stop tracking the in-flight run. Callers invalidate its poll ticket
    /// first, so the abandoned task never touches `running` again.
    pub fn abandon_run(&mut self) {
        self.running = false;
    }

    pub fn start_run(&mut self, handle: RunHandle) {
        self.running = !handle.status.is_terminal();
        self.run_id = Some(handle.run_id);
        self.run = None;
    }

    /// Record a polled run snapshot; ignores snapshots of other runs.
    pub fn apply_run(&mut self, run: ProtocolRun) -> bool {
        if self.run_id.as_deref() != Some(run.id.as_str()) {
            return false;
        }
        self.running = !run.status.is_terminal();
        if run.status == RunStatus::Failed {
            self.error = run.error.clone();
        }
        self.run = Some(run);
        true
    }

    #[must_use]
    pub fn status(&self) -> Option<RunStatus> {
        match (&self.run, &self.run_id) {
            (Some(run), _) => Some(run.status),
            (None, Some(_)) => Some(RunStatus::Pending),
            (None, None) => None,
        }
    }

    /// Poll while a run exists and has not finished.
    #[must_use]
    pub fn should_poll(&self) -> bool {
        self.run_id.is_some() && self.status().is_some_and(|s| !s.is_terminal())
    }

    /// Result for `step_id` from the latest run snapshot.
    #[must_use]
    pub fn step_outcome(&self, step_id: &str) -> Option<&AnalysisOutcome> {
        self.run
            .as_ref()?
            .results
            .iter()
            .find(|r| r.step_id == step_id)
            .map(|r| &r.outcome)
    }
}
