//! Protocol designer: generate a multi-step analysis plan, run it and poll
//! until it finishes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each run start takes a fresh poll ticket. The poll loop stops when its
//! ticket goes stale (redesign or unmount), the run reaches a terminal status,
//! or a poll fails. Redesign releases the `running` flag itself, since a
//! stale task may return after a newer run has started.

use std::time::Duration;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::error_banner::ErrorBanner;
use crate::components::report_export::ReportExport;
use crate::components::result_view::ResultView;
use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::types::{AnalysisGoal, DesignRequest, ProtocolStep, ReportFormat, RunStatus};
use crate::state::protocol::ProtocolState;
use crate::util::download;
use crate::util::generation::{Generation, Ticket};
use crate::util::keyboard::use_shortcuts;
use crate::util::shortcuts::{ShortcutMap, chords};
use crate::util::task;

#[cfg(test)]
#[path = "protocol_test.rs"]
mod protocol_test;

#[component]
pub fn ProtocolPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let config = expect_context::<ClientConfig>();
    let params = use_params_map();
    let dataset_id = Memo::new(move |_| params.read().get("id").unwrap_or_default());

    let state = RwSignal::new(ProtocolState::default());
    let goal = RwSignal::new(AnalysisGoal::CompareGroups);
    let notes = RwSignal::new(String::new());
    let exporting = RwSignal::new(false);
    let polls = Generation::new();
    let interval = config.run_poll_interval;

    let cleanup_polls = polls.clone();
    on_cleanup(move || cleanup_polls.invalidate());

    let design_api = api.clone();
    let design_polls = polls.clone();
    let on_design = move |_| {
        let id = dataset_id.get_untracked();
        let api = design_api.clone();
        design_polls.invalidate();
        state.update(|s| {
            s.abandon_run();
            s.designing = true;
            s.error = None;
        });
        let goal = goal.get_untracked();
        let notes = notes.get_untracked();
        task::spawn(async move {
            let result = match api.fetch_variable_mapping(&id).await {
                Ok(mapping) => {
                    let request = DesignRequest { dataset_id: id, goal, mapping, notes: design_notes(&notes) };
                    api.design_protocol(&request).await
                }
                Err(e) => Err(e),
            };
            state.update(|s| {
                s.designing = false;
                match result {
                    Ok(protocol) => {
                        log::info!("protocol: designed {} with {} steps", protocol.id, protocol.steps.len());
                        s.set_protocol(protocol);
                    }
                    Err(e) => s.error = Some(e.to_string()),
                }
            });
        });
    };

    let run_api = api.clone();
    let run = Callback::new(move |()| {
        let Some(protocol_id) = state.with_untracked(|s| {
            if s.running {
                return None;
            }
            s.protocol.as_ref().map(|p| p.id.clone())
        }) else {
            return;
        };
        let ticket = polls.begin();
        let generation = polls.clone();
        let api = run_api.clone();
        state.update(|s| {
            s.running = true;
            s.error = None;
        });
        task::spawn(async move {
            match api.run_protocol(&protocol_id).await {
                Ok(handle) => {
                    // Whoever invalidated the ticket already released `running`.
                    if !generation.is_current(ticket) {
                        return;
                    }
                    log::info!("protocol: run {} started", handle.run_id);
                    state.update(|s| s.start_run(handle));
                    poll_run(api, state, generation, ticket, interval).await;
                }
                Err(e) => state.update(|s| {
                    s.running = false;
                    s.error = Some(e.to_string());
                }),
            }
        });
    });

    use_shortcuts(
        ShortcutMap::new().with(chords::EXECUTE, Callback::new(move |_| run.run(()))),
        Signal::from(true),
    );

    let export_api = api;
    let on_export = Callback::new(move |format: ReportFormat| {
        let Some(protocol_id) = state.with_untracked(|s| s.protocol.as_ref().map(|p| p.id.clone())) else {
            return;
        };
        let api = export_api.clone();
        exporting.set(true);
        task::spawn(async move {
            let result = api.protocol_report(&protocol_id, format).await;
            exporting.set(false);
            if let Err(message) = result.map_err(|e| e.to_string()).and_then(|d| download::save(&d)) {
                state.update(|s| s.error = Some(message));
            }
        });
    });

    view! {
        <div class="protocol-page">
            <header class="protocol-page__header toolbar">
                <a class="toolbar__back" href=move || format!("/datasets/{}", dataset_id.get())>"← Dataset"</a>
                <span class="toolbar__title">"Analysis protocol"</span>
                <span class="toolbar__spacer"></span>
                <span class="protocol-page__status">{move || state.with(|s| s.status().map(status_label).unwrap_or_default())}</span>
            </header>

            <ErrorBanner
                message=Signal::derive(move || state.with(|s| s.error.clone()))
                on_dismiss=Callback::new(move |()| state.update(|s| s.error = None))
            />

            <section class="protocol-page__design">
                <label class="protocol-page__field">
                    "Goal"
                    <select
                        prop:value=move || goal_index(goal.get()).to_string()
                        on:change=move |ev| {
                            if let Some(g) = event_target_value(&ev).parse::<usize>().ok().and_then(|i| AnalysisGoal::ALL.get(i)) {
                                goal.set(*g);
                            }
                        }
                    >
                        {AnalysisGoal::ALL
                            .into_iter()
                            .enumerate()
                            .map(|(i, g)| view! { <option value=i.to_string()>{g.label()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <label class="protocol-page__field">
                    "Notes"
                    <textarea
                        class="protocol-page__notes"
                        placeholder="Hypotheses, subgroups, sensitivity analyses..."
                        prop:value=move || notes.get()
                        on:input=move |ev| notes.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <button class="btn btn--primary" disabled=move || state.with(|s| s.designing) on:click=on_design>
                    {move || if state.with(|s| s.designing) { "Designing..." } else { "Design protocol" }}
                </button>
            </section>

            {move || {
                state
                    .with(|s| s.protocol.clone())
                    .map(|protocol| {
                        view! {
                            <section class="protocol-page__protocol">
                                <header class="protocol-page__protocol-header">
                                    <h2>{protocol.title}</h2>
                                    <button
                                        class="btn btn--primary"
                                        title="Run protocol (Cmd/Ctrl+Enter)"
                                        disabled=move || state.with(|s| s.running)
                                        on:click=move |_| run.run(())
                                    >
                                        {move || if state.with(|s| s.running) { "Running..." } else { "Run" }}
                                    </button>
                                    <ReportExport busy=exporting on_export=on_export/>
                                </header>
                                <ol class="protocol-page__steps">
                                    {protocol
                                        .steps
                                        .into_iter()
                                        .map(|step| view! { <StepItem step=step state=state/> })
                                        .collect_view()}
                                </ol>
                            </section>
                        }
                    })
            }}
        </div>
    }
}

#[component]
fn StepItem(step: ProtocolStep, state: RwSignal<ProtocolState>) -> impl IntoView {
    let step_id = step.id.clone();
    view! {
        <li class="protocol-page__step">
            <div class="protocol-page__step-title">
                <strong>{step.title}</strong>
                <span class="protocol-page__step-method">{step.method}</span>
            </div>
            <p class="protocol-page__step-description">{step.description}</p>
            {(!step.depends_on.is_empty())
                .then(|| view! { <p class="protocol-page__step-deps">"After: " {step.depends_on.join(", ")}</p> })}
            {move || {
                state
                    .with(|s| s.step_outcome(&step_id).cloned())
                    .map(|outcome| view! { <ResultView outcome=outcome/> })
            }}
        </li>
    }
}

async fn poll_run(
    api: ApiClient,
    state: RwSignal<ProtocolState>,
    generation: Generation,
    ticket: Ticket,
    interval: Duration,
) {
    loop {
        task::sleep(interval).await;
        if !generation.is_current(ticket) {
            return;
        }
        let Some(Some(run_id)) = state.try_with_untracked(|s| s.run_id.clone()) else {
            return;
        };
        let result = api.fetch_run(&run_id).await;
        if !generation.is_current(ticket) {
            return;
        }
        match result {
            Ok(run) => {
                let status = run.status;
                state.update(|s| {
                    s.apply_run(run);
                });
                if status.is_terminal() {
                    log::info!("protocol: run {run_id} finished {}", status_label(status));
                    return;
                }
            }
            Err(e) => {
                log::warn!("protocol: polling run {run_id} failed: {e}");
                state.update(|s| {
                    s.running = false;
                    s.error = Some(e.to_string());
                });
                return;
            }
        }
    }
}

fn status_label(status: RunStatus) -> String {
    match status {
        RunStatus::Pending => "Queued",
        RunStatus::Running => "Running",
        RunStatus::Completed => "Completed",
        RunStatus::Failed => "Failed",
    }
    .to_owned()
}

fn goal_index(goal: AnalysisGoal) -> usize {
    AnalysisGoal::ALL.iter().position(|g| *g == goal).unwrap_or(0)
}

/// Free-text notes, or `None` when blank.
fn design_notes(notes: &str) -> Option<String> {
    let trimmed = notes.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
