//! Step-by-step analysis wizard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Choices live in an undo/redo history of [`WizardConfig`] and are cached
//! as a session draft per dataset, so a reload resumes where the user left
//! off. With no draft, variable choices are seeded from the saved mapping.
//! Recommendations are requested on entering the method step and dropped
//! whenever the selection changes.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::error_banner::ErrorBanner;
use crate::components::report_export::ReportExport;
use crate::components::result_view::ResultView;
use crate::components::term_tooltip::TermTooltip;
use crate::components::undo_controls::UndoControls;
use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::types::{AnalysisGoal, ExportRequest, ReportFormat};
use crate::state::wizard::{WizardConfig, WizardState, WizardStep};
use crate::util::download::{self, Download};
use crate::util::draft_store::WizardDrafts;
use crate::util::generation::Generation;
use crate::util::keyboard::use_shortcuts;
use crate::util::shortcuts::chords;
use crate::util::task;
use crate::util::undo_redo::UndoRedo;

#[cfg(test)]
#[path = "wizard_test.rs"]
mod wizard_test;

#[component]
pub fn WizardPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let config = expect_context::<ClientConfig>();
    let drafts = expect_context::<WizardDrafts>();
    let params = use_params_map();
    let dataset_id = Memo::new(move |_| params.read().get("id").unwrap_or_default());

    let choices = UndoRedo::new(WizardConfig::default(), config.history_limit);
    let wizard = RwSignal::new(WizardState::default());
    let columns = RwSignal::new(Vec::<String>::new());
    let loaded_for = RwSignal::new(None::<String>);
    let exporting = RwSignal::new(false);
    let recommend_gen = Generation::new();

    let step = Memo::new(move |_| choices.value().step);
    let method = Memo::new(move |_| choices.value().method);
    // Choices that recommendations depend on.
    let selection = Memo::new(move |_| WizardConfig { step: WizardStep::Goal, method: None, ..choices.value() });

    // Restore the draft, or seed from the mapping, once per dataset.
    let load_api = api.clone();
    let load_drafts = drafts.clone();
    Effect::new(move || {
        let id = dataset_id.get();
        if id.is_empty() {
            return;
        }
        loaded_for.set(None);
        wizard.set(WizardState::default());
        let api = load_api.clone();
        let draft = load_drafts.load::<WizardConfig>(&id);
        task::spawn(async move {
            match api.fetch_dataset(&id, 1, 1).await {
                Ok(page) => columns.set(page.columns.into_iter().map(|c| c.name).collect()),
                Err(e) => wizard.update(|w| w.error = Some(e.to_string())),
            }
            let initial = match draft {
                Some(draft) => {
                    log::debug!("wizard: restored draft for {id}");
                    draft
                }
                None => match api.fetch_variable_mapping(&id).await {
                    Ok(mapping) => WizardConfig::from_mapping(&mapping),
                    Err(e) => {
                        log::warn!("wizard: no mapping for {id}: {e}");
                        WizardConfig::default()
                    }
                },
            };
            choices.reset(initial);
            loaded_for.set(Some(id));
        });
    });

    // Persist every change as the session draft.
    let save_drafts = drafts.clone();
    Effect::new(move || {
        let current = choices.value();
        if let Some(id) = loaded_for.get() {
            save_drafts.save(&id, &current);
        }
    });

    // Recommendations follow the selection and are fetched on the method step.
    let recommend_api = api.clone();
    Effect::new(move |previous: Option<WizardConfig>| {
        let current = selection.get();
        if previous.as_ref() != Some(&current) {
            recommend_gen.invalidate();
            wizard.update(WizardState::reset_results);
        }
        let wanted = step.get() == WizardStep::Method
            && wizard.with_untracked(|w| w.recommendations.is_none() && !w.loading);
        if !wanted {
            return current;
        }
        let Some(request) = current.recommend_request(&dataset_id.get_untracked()) else {
            return current;
        };
        let ticket = recommend_gen.begin();
        let generation = recommend_gen.clone();
        let api = recommend_api.clone();
        wizard.update(|w| w.loading = true);
        task::spawn(async move {
            let result = api.recommend(&request).await;
            if !generation.is_current(ticket) {
                return;
            }
            wizard.update(|w| {
                w.loading = false;
                match result {
                    Ok(response) => w.recommendations = Some(response),
                    Err(e) => w.error = Some(e.to_string()),
                }
            });
        });
        current
    });

    // A different method makes the shown result stale.
    Effect::new(move || {
        method.track();
        wizard.update(|w| w.result = None);
    });

    let run_api = api.clone();
    let execute = Callback::new(move |()| {
        if step.get_untracked() != WizardStep::Review || wizard.with_untracked(|w| w.loading) {
            return;
        }
        let Some(request) = choices.value_untracked().apply_request(&dataset_id.get_untracked()) else {
            return;
        };
        let api = run_api.clone();
        wizard.update(|w| {
            w.loading = true;
            w.error = None;
        });
        task::spawn(async move {
            let result = api.apply_strategy(&request).await;
            wizard.update(|w| {
                w.loading = false;
                match result {
                    Ok(outcome) => w.result = Some(outcome),
                    Err(e) => w.error = Some(e.to_string()),
                }
            });
        });
    });

    use_shortcuts(
        choices.bindings().with(chords::EXECUTE, Callback::new(move |_| execute.run(()))),
        Signal::from(true),
    );

    let interpret_api = api.clone();
    let on_interpret = Callback::new(move |()| {
        let Some(outcome) = wizard.with_untracked(|w| w.result.clone()) else {
            return;
        };
        let api = interpret_api.clone();
        wizard.update(|w| w.loading = true);
        task::spawn(async move {
            let result = api.interpret(&outcome).await;
            wizard.update(|w| {
                w.loading = false;
                match result {
                    Ok(interpretation) => {
                        if let Some(current) = w.result.as_mut() {
                            current.interpretation = Some(interpretation.text);
                        }
                    }
                    Err(e) => w.error = Some(e.to_string()),
                }
            });
        });
    });

    let export_api = api;
    let on_export = Callback::new(move |format: ReportFormat| {
        let id = dataset_id.get_untracked();
        let analysis_id = wizard.with_untracked(|w| w.result.as_ref().and_then(|r| r.id.clone()));
        let Some(apply) = choices.value_untracked().apply_request(&id) else {
            return;
        };
        let api = export_api.clone();
        exporting.set(true);
        task::spawn(async move {
            let result = match analysis_id {
                Some(analysis_id) => api.analysis_report(&analysis_id, format).await,
                None => api.export_wizard_report(&ExportRequest { apply, format }).await,
            };
            exporting.set(false);
            if let Err(message) = result.map_err(|e| e.to_string()).and_then(|d: Download| download::save(&d)) {
                wizard.update(|w| w.error = Some(message));
            }
        });
    });

    let on_start_over = move |_| {
        drafts.clear(&dataset_id.get_untracked());
        choices.reset(WizardConfig::default());
        wizard.set(WizardState::default());
    };

    view! {
        <div class="wizard-page">
            <header class="wizard-page__header toolbar">
                <a class="toolbar__back" href=move || format!("/datasets/{}", dataset_id.get())>"← Dataset"</a>
                <span class="toolbar__title">"Analysis wizard"</span>
                <span class="toolbar__spacer"></span>
                <UndoControls history=choices/>
                <button class="btn" on:click=on_start_over>"Start over"</button>
            </header>

            <ol class="wizard-page__steps">
                {WizardStep::ALL
                    .into_iter()
                    .map(|s| {
                        view! {
                            <li class="wizard-page__step" class:wizard-page__step--active=move || step.get() == s>
                                {s.label()}
                            </li>
                        }
                    })
                    .collect_view()}
            </ol>

            <ErrorBanner
                message=Signal::derive(move || wizard.with(|w| w.error.clone()))
                on_dismiss=Callback::new(move |()| wizard.update(|w| w.error = None))
            />

            <Show when=move || loaded_for.get().is_some() fallback=|| view! { <p>"Loading..."</p> }>
                <section class="wizard-page__body">
                    {move || match step.get() {
                        WizardStep::Goal => view! { <GoalStep choices=choices/> }.into_any(),
                        WizardStep::Variables => view! { <VariablesStep choices=choices columns=columns/> }.into_any(),
                        WizardStep::Method => view! { <MethodStep choices=choices wizard=wizard/> }.into_any(),
                        WizardStep::Review => view! { <ReviewStep choices=choices/> }.into_any(),
                    }}
                </section>

                <nav class="wizard-page__nav">
                    <button
                        class="btn"
                        disabled=move || step.get().prev().is_none()
                        on:click=move |_| edit(choices, |c| {
                            c.back();
                        })
                    >
                        "Back"
                    </button>
                    <Show
                        when=move || step.get() == WizardStep::Review
                        fallback=move || {
                            view! {
                                <button
                                    class="btn btn--primary"
                                    disabled=move || !choices.value().can_advance(step.get())
                                    on:click=move |_| edit(choices, |c| {
                                        c.advance();
                                    })
                                >
                                    "Next"
                                </button>
                            }
                        }
                    >
                        <button
                            class="btn btn--primary"
                            title="Run analysis (Cmd/Ctrl+Enter)"
                            disabled=move || wizard.with(|w| w.loading)
                            on:click=move |_| execute.run(())
                        >
                            "Run analysis"
                        </button>
                    </Show>
                </nav>

                {move || {
                    wizard
                        .with(|w| w.result.clone())
                        .map(|outcome| {
                            view! {
                                <section class="wizard-page__result">
                                    <ResultView outcome=outcome/>
                                    <div class="wizard-page__result-actions">
                                        <button class="btn" disabled=move || wizard.with(|w| w.loading) on:click=move |_| on_interpret.run(())>
                                            "Interpret"
                                        </button>
                                        <ReportExport busy=exporting on_export=on_export/>
                                    </div>
                                </section>
                            }
                        })
                }}
            </Show>
        </div>
    }
}

#[component]
fn GoalStep(choices: UndoRedo<WizardConfig>) -> impl IntoView {
    view! {
        <fieldset class="wizard-step">
            <legend>"What do you want to learn?"</legend>
            {AnalysisGoal::ALL
                .into_iter()
                .map(|goal| {
                    view! {
                        <label class="wizard-step__choice">
                            <input
                                type="radio"
                                name="goal"
                                prop:checked=move || choices.value().goal == Some(goal)
                                on:change=move |_| edit(choices, |c| c.set_goal(goal))
                            />
                            {goal.label()}
                        </label>
                    }
                })
                .collect_view()}
        </fieldset>
    }
}

#[component]
fn VariablesStep(choices: UndoRedo<WizardConfig>, columns: RwSignal<Vec<String>>) -> impl IntoView {
    let goal = move || choices.value().goal;
    view! {
        <fieldset class="wizard-step">
            <legend>"Variables"</legend>
            <Show when=move || goal().is_some_and(AnalysisGoal::needs_outcome)>
                <label class="wizard-step__field">
                    <TermTooltip term="outcome variable">"Outcome"</TermTooltip>
                    <ColumnSelect
                        columns=columns
                        value=Signal::derive(move || choices.value().outcome)
                        on_pick=Callback::new(move |v: Option<String>| edit(choices, |c| c.outcome = v))
                    />
                </label>
            </Show>
            <Show when=move || matches!(goal(), Some(AnalysisGoal::CompareGroups | AnalysisGoal::Survival))>
                <label class="wizard-step__field">
                    <TermTooltip term="grouping variable">"Group"</TermTooltip>
                    <ColumnSelect
                        columns=columns
                        value=Signal::derive(move || choices.value().group)
                        on_pick=Callback::new(move |v: Option<String>| edit(choices, |c| c.group = v))
                    />
                </label>
                <label class="wizard-step__choice">
                    <input
                        type="checkbox"
                        prop:checked=move || choices.value().paired
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            edit(choices, |c| c.paired = checked);
                        }
                    />
                    <TermTooltip term="paired samples">"Paired measurements"</TermTooltip>
                </label>
            </Show>
            <Show when=move || matches!(goal(), Some(AnalysisGoal::Association | AnalysisGoal::Prediction))>
                <div class="wizard-step__field">
                    <TermTooltip term="predictor">"Predictors"</TermTooltip>
                    {move || {
                        columns
                            .get()
                            .into_iter()
                            .map(|column| {
                                let checked_column = column.clone();
                                let toggle_column = column.clone();
                                view! {
                                    <label class="wizard-step__choice">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || choices.value().predictors.contains(&checked_column)
                                            on:change=move |_| edit(choices, |c| c.toggle_predictor(&toggle_column))
                                        />
                                        {column}
                                    </label>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </Show>
        </fieldset>
    }
}

#[component]
fn ColumnSelect(
    columns: RwSignal<Vec<String>>,
    value: Signal<Option<String>>,
    on_pick: Callback<Option<String>>,
) -> impl IntoView {
    view! {
        <select
            prop:value=move || option_value(value.get())
            on:change=move |ev| on_pick.run(parse_option(&event_target_value(&ev)))
        >
            <option value="">"(none)"</option>
            {move || columns.get().into_iter().map(|c| {
                    let label = c.clone();
                    view! { <option value=c>{label}</option> }
                }).collect_view()}
        </select>
    }
}

#[component]
fn MethodStep(choices: UndoRedo<WizardConfig>, wizard: RwSignal<WizardState>) -> impl IntoView {
    view! {
        <fieldset class="wizard-step">
            <legend>"Recommended methods"</legend>
            <Show when=move || wizard.with(|w| w.loading)>
                <p>"Finding suitable methods..."</p>
            </Show>
            {move || {
                let response = wizard.with(|w| w.recommendations.clone()).unwrap_or_default();
                let warnings = response
                    .warnings
                    .into_iter()
                    .map(|w| view! { <p class="wizard-step__warning">{w}</p> })
                    .collect_view();
                let options = response
                    .recommendations
                    .into_iter()
                    .map(|rec| {
                        let method = rec.method.clone();
                        let checked_method = rec.method.clone();
                        view! {
                            <label class="wizard-step__choice wizard-step__method">
                                <input
                                    type="radio"
                                    name="method"
                                    prop:checked=move || choices.value().method.as_deref() == Some(checked_method.as_str())
                                    on:change=move |_| {
                                        let method = method.clone();
                                        edit(choices, |c| c.method = Some(method));
                                    }
                                />
                                <span class="wizard-step__method-label">{rec.label}</span>
                                <span class="wizard-step__rationale">{rec.rationale}</span>
                                {(!rec.assumptions.is_empty())
                                    .then(|| {
                                        view! {
                                            <ul class="wizard-step__assumptions">
                                                {rec.assumptions.into_iter().map(|a| view! { <li>{a}</li> }).collect_view()}
                                            </ul>
                                        }
                                    })}
                            </label>
                        }
                    })
                    .collect_view();
                view! { {warnings} {options} }
            }}
        </fieldset>
    }
}

#[component]
fn ReviewStep(choices: UndoRedo<WizardConfig>) -> impl IntoView {
    view! {
        <dl class="wizard-step wizard-step__summary">
            {move || {
                summary_rows(&choices.value())
                    .into_iter()
                    .map(|(label, value)| view! { <dt>{label}</dt> <dd>{value}</dd> })
                    .collect_view()
            }}
        </dl>
    }
}

/// Record an edit of the current choices as one undoable snapshot.
fn edit(choices: UndoRedo<WizardConfig>, f: impl FnOnce(&mut WizardConfig)) {
    choices.update(|current| {
        let mut next = current.clone();
        f(&mut next);
        next
    });
}

fn option_value(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn parse_option(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

/// Label/value pairs shown on the review step.
fn summary_rows(config: &WizardConfig) -> Vec<(&'static str, String)> {
    let or_dash = |v: Option<&str>| v.unwrap_or("—").to_owned();
    let mut rows = vec![("Goal", or_dash(config.goal.map(AnalysisGoal::label)))];
    if config.outcome.is_some() {
        rows.push(("Outcome", or_dash(config.outcome.as_deref())));
    }
    if config.group.is_some() {
        rows.push(("Group", or_dash(config.group.as_deref())));
        rows.push(("Paired", if config.paired { "yes" } else { "no" }.to_owned()));
    }
    if !config.predictors.is_empty() {
        rows.push(("Predictors", config.predictors.join(", ")));
    }
    rows.push(("Method", or_dash(config.method.as_deref())));
    rows
}
