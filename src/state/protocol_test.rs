use super::*;
use crate::net::types::{AnalysisResult, DescriptiveResult, StepResult};

fn protocol() -> Protocol {
    Protocol { id: "p1".to_owned(), title: "Primary analysis".to_owned(), steps: vec![] }
}

fn run(id: &str, status: RunStatus) -> ProtocolRun {
    ProtocolRun { id: id.to_owned(), protocol_id: "p1".to_owned(), status, results: vec![], error: None }
}

fn started() -> ProtocolState {
    let mut state = ProtocolState::default();
    state.set_protocol(protocol());
    state.start_run(RunHandle { run_id: "r1".to_owned(), status: RunStatus::Pending });
    state
}

#[test]
fn idle_state_does_not_poll() {
    let state = ProtocolState::default();
    assert_eq!(state.status(), None);
    assert!(!state.should_poll());
}

#[test]
fn started_run_polls_until_terminal() {
    let mut state = started();
    assert!(state.running);
    assert!(state.should_poll());
    assert!(state.apply_run(run("r1", RunStatus::Running)));
    assert!(state.should_poll());
    assert!(state.apply_run(run("r1", RunStatus::Completed)));
    assert!(!state.should_poll());
    assert!(!state.running);
}

#[test]
fn snapshot_of_other_run_is_ignored() {
    let mut state = started();
    assert!(!state.apply_run(run("old", RunStatus::Completed)));
    assert!(state.run.is_none());
    assert!(state.should_poll());
}

#[test]
fn failed_run_surfaces_error() {
    let mut state = started();
    let mut failed = run("r1", RunStatus::Failed);
    failed.error = Some("Step 2 failed".to_owned());
    state.apply_run(failed);
    assert_eq!(state.error.as_deref(), Some("Step 2 failed"));
    assert!(!state.should_poll());
}

#[test]
fn new_protocol_discards_run() {
    let mut state = started();
    state.set_protocol(protocol());
    assert!(state.run_id.is_none());
    assert!(!state.running);
    assert!(!state.should_poll());
}

#[test]
fn abandoned_run_unblocks_next_start() {
    let mut state = ProtocolState::default();
    state.set_protocol(protocol());
    // A run request is in flight but its handle has not arrived yet.
    state.running = true;
    state.abandon_run();
    assert!(!state.running);
    assert!(state.protocol.is_some());
    state.start_run(RunHandle { run_id: "r2".to_owned(), status: RunStatus::Pending });
    assert!(state.running);
    assert_eq!(state.run_id.as_deref(), Some("r2"));
}

#[test]
fn step_outcome_finds_result() {
    let mut state = started();
    let mut snapshot = run("r1", RunStatus::Completed);
    snapshot.results.push(StepResult {
        step_id: "s1".to_owned(),
        outcome: AnalysisOutcome {
            id: None,
            method: "describe".to_owned(),
            interpretation: None,
            result: AnalysisResult::Descriptive(DescriptiveResult { variables: vec![] }),
        },
    });
    state.apply_run(snapshot);
    assert_eq!(state.step_outcome("s1").map(|o| o.method.as_str()), Some("describe"));
    assert!(state.step_outcome("s2").is_none());
}
