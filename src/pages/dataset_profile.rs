//! Dataset profile page: paged rows, schema edits, cleaning, quality scan and
//! variable-role mapping.
//!
//! SYSTEM CONTEXT
//! ==============
//! Row pages are fetched whenever the route id, page number or a reload
//! counter changes; every successful schema change bumps the counter.
//! Mapping edits go through an undo/redo history and are saved after a quiet
//! period. Each edit takes a new save ticket, so only the latest edit's save
//! may write its outcome back.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::data_grid::DataGrid;
use crate::components::error_banner::ErrorBanner;
use crate::components::quality_panel::QualityPanel;
use crate::components::undo_controls::UndoControls;
use crate::components::variable_mapping_panel::VariableMappingPanel;
use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{
    CleanColumnRequest, CleanOperation, DatasetSummary, ReparseOptions, SchemaAction, VariableMapping, VariableRole,
};
use crate::state::dataset_profile::{DatasetProfileState, SaveStatus};
use crate::state::datasets::DatasetsState;
use crate::util::generation::{Generation, Ticket};
use crate::util::keyboard::use_shortcuts;
use crate::util::shortcuts::chords;
use crate::util::task;
use crate::util::undo_redo::UndoRedo;

#[cfg(test)]
#[path = "dataset_profile_test.rs"]
mod dataset_profile_test;

#[component]
pub fn DatasetProfilePage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let config = expect_context::<ClientConfig>();
    let datasets = expect_context::<RwSignal<DatasetsState>>();
    let params = use_params_map();
    let dataset_id = Memo::new(move |_| params.read().get("id").unwrap_or_default());

    let profile = RwSignal::new(DatasetProfileState::new(config.page_size));
    let mapping = UndoRedo::new(VariableMapping::default(), config.history_limit);
    let reload = RwSignal::new(0_u64);
    let page = Memo::new(move |_| profile.with(|p| p.page));
    let columns = Memo::new(move |_| profile.with(DatasetProfileState::column_names));
    let saves = Generation::new();

    // Rows for the current page.
    let rows_api = api.clone();
    Effect::new(move || {
        let id = dataset_id.get();
        let page = page.get();
        reload.track();
        if id.is_empty() {
            return;
        }
        let limit = profile.with_untracked(|p| p.page_size);
        profile.update(|p| {
            p.loading = true;
            p.error = None;
        });
        let api = rows_api.clone();
        task::spawn(async move {
            let result = api.fetch_dataset(&id, page, limit).await;
            profile.update(|p| {
                p.loading = false;
                match result {
                    Ok(data) => {
                        p.data = Some(data);
                        p.page = p.clamp_page(p.page);
                    }
                    Err(e) => p.error = Some(e.to_string()),
                }
            });
        });
    });

    // Mapping and quality scan, once per dataset.
    let meta_api = api.clone();
    let meta_saves = saves.clone();
    Effect::new(move || {
        let id = dataset_id.get();
        if id.is_empty() {
            return;
        }
        meta_saves.invalidate();
        profile.update(|p| p.scanning = true);
        let api = meta_api.clone();
        task::spawn(async move {
            match api.fetch_variable_mapping(&id).await {
                Ok(loaded) => {
                    profile.update(|p| {
                        p.mapping = loaded.clone();
                        p.save_status = SaveStatus::Idle;
                    });
                    mapping.reset(loaded);
                }
                Err(e) => profile.update(|p| p.error = Some(e.to_string())),
            }
            let report = api.scan_quality(&id).await;
            profile.update(|p| {
                p.scanning = false;
                match report {
                    Ok(report) => p.quality = Some(report),
                    Err(e) => p.error = Some(e.to_string()),
                }
            });
        });
    });

    // Debounced mapping save.
    let save_api = api.clone();
    let save_gen = saves.clone();
    let debounce = config.mapping_save_debounce;
    Effect::new(move || {
        let current = mapping.value();
        if profile.with_untracked(|p| p.mapping == current) {
            // Back to the saved value: nothing to write.
            save_gen.invalidate();
            profile.update(|p| {
                if p.save_status == SaveStatus::Pending {
                    p.save_status = SaveStatus::Idle;
                }
            });
            return;
        }
        let ticket = save_gen.begin();
        profile.update(|p| p.save_status = SaveStatus::Pending);
        let api = save_api.clone();
        let generation = save_gen.clone();
        let id = dataset_id.get_untracked();
        task::spawn(async move {
            task::sleep(debounce).await;
            if !generation.is_current(ticket) {
                return;
            }
            save_mapping(api, id, current, profile, generation, ticket).await;
        });
    });

    let now_api = api.clone();
    let now_gen = saves.clone();
    let save_now = Callback::new(move |_| {
        let current = mapping.value_untracked();
        if profile.with_untracked(|p| p.mapping == current) {
            return;
        }
        let ticket = now_gen.begin();
        task::spawn(save_mapping(
            now_api.clone(),
            dataset_id.get_untracked(),
            current,
            profile,
            now_gen.clone(),
            ticket,
        ));
    });

    // Leaving with an unsaved edit saves it without waiting for the debounce.
    let flush_api = api.clone();
    let flush_gen = saves;
    on_cleanup(move || {
        flush_gen.invalidate();
        let pending = profile
            .try_with_untracked(|p| matches!(p.save_status, SaveStatus::Pending))
            .unwrap_or(false);
        let (Some(id), Some(current)) = (dataset_id.try_get_untracked(), mapping.try_value_untracked()) else {
            return;
        };
        if !pending {
            return;
        }
        let api = flush_api.clone();
        task::spawn(async move {
            if let Err(e) = api.save_variable_mapping(&id, &current).await {
                log::warn!("profile: unsaved mapping for {id} lost: {e}");
            }
        });
    });

    use_shortcuts(mapping.bindings().with(chords::SAVE, save_now), Signal::from(true));

    let on_role_change = Callback::new(move |(column, role): (String, VariableRole)| {
        mapping.update(|m| m.with_role(&column, role));
    });

    let scan_api = api.clone();
    let on_scan = Callback::new(move |()| {
        let api = scan_api.clone();
        let id = dataset_id.get_untracked();
        profile.update(|p| p.scanning = true);
        task::spawn(async move {
            let report = api.scan_quality(&id).await;
            profile.update(|p| {
                p.scanning = false;
                match report {
                    Ok(report) => p.quality = Some(report),
                    Err(e) => p.error = Some(e.to_string()),
                }
            });
        });
    });

    let fix_api = api.clone();
    let on_fix = Callback::new(move |issue_ids: Vec<String>| {
        let api = fix_api.clone();
        let id = dataset_id.get_untracked();
        profile.update(|p| p.scanning = true);
        task::spawn(async move {
            let report = api.auto_fix(&id, issue_ids).await;
            profile.update(|p| {
                p.scanning = false;
                match report {
                    Ok(report) => p.quality = Some(report),
                    Err(e) => p.error = Some(e.to_string()),
                }
            });
            reload.update(|n| *n += 1);
        });
    });

    let modify_api = api.clone();
    let on_schema = Callback::new(move |action: SchemaAction| {
        let api = modify_api.clone();
        let id = dataset_id.get_untracked();
        task::spawn(async move {
            let result = api.modify_dataset(&id, &action).await;
            finish_change(result, profile, datasets, reload);
        });
    });

    let clean_api = api.clone();
    let on_clean = Callback::new(move |request: CleanColumnRequest| {
        let api = clean_api.clone();
        let id = dataset_id.get_untracked();
        task::spawn(async move {
            let result = api.clean_column(&id, &request).await;
            finish_change(result, profile, datasets, reload);
        });
    });

    let reparse_api = api;
    let on_reparse = Callback::new(move |options: ReparseOptions| {
        let api = reparse_api.clone();
        let id = dataset_id.get_untracked();
        task::spawn(async move {
            let result = api.reparse_dataset(&id, &options).await;
            finish_change(result, profile, datasets, reload);
        });
    });

    let title = move || {
        profile
            .with(|p| p.data.as_ref().map(|d| d.name.clone()))
            .unwrap_or_else(|| dataset_id.get())
    };

    view! {
        <div class="profile-page">
            <header class="profile-page__header toolbar">
                <a class="toolbar__back" href="/">"← Datasets"</a>
                <span class="toolbar__title">{title}</span>
                <span class="toolbar__spacer"></span>
                <UndoControls history=mapping/>
                <a class="btn" href=move || format!("/datasets/{}/wizard", dataset_id.get())>"Analysis wizard"</a>
                <a class="btn" href=move || format!("/datasets/{}/protocol", dataset_id.get())>"Protocol"</a>
            </header>

            <ErrorBanner
                message=Signal::derive(move || profile.with(|p| p.error.clone()))
                on_dismiss=Callback::new(move |()| profile.update(|p| p.error = None))
            />

            <div class="profile-page__body">
                <main class="profile-page__grid">
                    {move || {
                        profile
                            .with(|p| p.data.clone())
                            .map(|data| view! { <DataGrid page=data on_edit=on_schema/> })
                    }}
                    <Show when=move || profile.with(|p| p.loading)>
                        <p class="profile-page__loading">"Loading rows..."</p>
                    </Show>
                    <nav class="profile-page__pager">
                        <button
                            class="btn"
                            disabled=move || !profile.with(DatasetProfileState::has_prev)
                            on:click=move |_| profile.update(|p| p.page = p.clamp_page(p.page.saturating_sub(1)))
                        >
                            "‹ Prev"
                        </button>
                        <span class="profile-page__page">
                            {move || profile.with(|p| format!("Page {} of {}", p.page, p.page_count()))}
                        </span>
                        <button
                            class="btn"
                            disabled=move || !profile.with(DatasetProfileState::has_next)
                            on:click=move |_| profile.update(|p| p.page = p.clamp_page(p.page.saturating_add(1)))
                        >
                            "Next ›"
                        </button>
                    </nav>
                </main>

                <aside class="profile-page__side">
                    {move || {
                        view! {
                            <VariableMappingPanel
                                columns=columns.get()
                                mapping=Signal::derive(move || mapping.value())
                                status=Signal::derive(move || profile.with(|p| p.save_status.clone()))
                                on_change=on_role_change
                            />
                        }
                    }}
                    <QualityPanel
                        report=Signal::derive(move || profile.with(|p| p.quality.clone()))
                        busy=Signal::derive(move || profile.with(|p| p.scanning))
                        on_scan=on_scan
                        on_fix=on_fix
                    />
                    <ColumnTools columns=columns on_schema=on_schema on_clean=on_clean on_reparse=on_reparse/>
                </aside>
            </div>
        </div>
    }
}

/// Schema, cleaning and parser controls for one selected column.
#[component]
fn ColumnTools(
    columns: Memo<Vec<String>>,
    on_schema: Callback<SchemaAction>,
    on_clean: Callback<CleanColumnRequest>,
    on_reparse: Callback<ReparseOptions>,
) -> impl IntoView {
    let selected = RwSignal::new(String::new());
    let new_name = RwSignal::new(String::new());
    let dtype = RwSignal::new("numeric".to_owned());
    let operation = RwSignal::new(0_usize);
    let delimiter = RwSignal::new(String::new());
    let header_row = RwSignal::new(String::new());

    // Keep the selection valid as columns change.
    Effect::new(move || {
        let names = columns.get();
        if !names.contains(&selected.get_untracked()) {
            selected.set(names.first().cloned().unwrap_or_default());
        }
    });

    let column = move || {
        let name = selected.get_untracked();
        (!name.is_empty()).then_some(name)
    };

    view! {
        <section class="column-tools">
            <h3>"Columns"</h3>
            <select class="column-tools__column" prop:value=move || selected.get() on:change=move |ev| selected.set(event_target_value(&ev))>
                {move || columns.get().into_iter().map(|c| {
                    let label = c.clone();
                    view! { <option value=c>{label}</option> }
                }).collect_view()}
            </select>

            <div class="column-tools__row">
                <input
                    class="column-tools__input"
                    type="text"
                    placeholder="New name"
                    prop:value=move || new_name.get()
                    on:input=move |ev| new_name.set(event_target_value(&ev))
                />
                <button
                    class="btn"
                    on:click=move |_| {
                        if let Some(action) = column().and_then(|c| rename_action(&c, &new_name.get_untracked())) {
                            on_schema.run(action);
                            new_name.set(String::new());
                        }
                    }
                >
                    "Rename"
                </button>
                <button
                    class="btn btn--danger"
                    on:click=move |_| {
                        if let Some(column) = column() {
                            on_schema.run(SchemaAction::DropColumn { column });
                        }
                    }
                >
                    "Drop"
                </button>
            </div>

            <div class="column-tools__row">
                <select prop:value=move || dtype.get() on:change=move |ev| dtype.set(event_target_value(&ev))>
                    {DTYPES.iter().map(|t| view! { <option value=*t>{*t}</option> }).collect_view()}
                </select>
                <button
                    class="btn"
                    on:click=move |_| {
                        if let Some(column) = column() {
                            on_schema.run(SchemaAction::ChangeType { column, dtype: dtype.get_untracked() });
                        }
                    }
                >
                    "Change type"
                </button>
            </div>

            <div class="column-tools__row">
                <select on:change=move |ev| operation.set(event_target_value(&ev).parse().unwrap_or(0))>
                    {CleanOperation::SIMPLE
                        .iter()
                        .enumerate()
                        .map(|(i, op)| view! { <option value=i.to_string()>{op.label()}</option> })
                        .collect_view()}
                </select>
                <button
                    class="btn"
                    on:click=move |_| {
                        let op = CleanOperation::SIMPLE.get(operation.get_untracked()).cloned();
                        if let (Some(column), Some(operation)) = (column(), op) {
                            on_clean.run(CleanColumnRequest { column, operation });
                        }
                    }
                >
                    "Clean"
                </button>
            </div>

            <h3>"Parsing"</h3>
            <div class="column-tools__row">
                <input
                    class="column-tools__input"
                    type="text"
                    placeholder="Delimiter"
                    prop:value=move || delimiter.get()
                    on:input=move |ev| delimiter.set(event_target_value(&ev))
                />
                <input
                    class="column-tools__input"
                    type="number"
                    min="0"
                    placeholder="Header row"
                    prop:value=move || header_row.get()
                    on:input=move |ev| header_row.set(event_target_value(&ev))
                />
                <button
                    class="btn"
                    on:click=move |_| on_reparse.run(reparse_options(&delimiter.get_untracked(), &header_row.get_untracked()))
                >
                    "Reparse"
                </button>
            </div>
        </section>
    }
}

const DTYPES: &[&str] = &["numeric", "categorical", "datetime", "boolean", "text"];

async fn save_mapping(
    api: ApiClient,
    dataset_id: String,
    mapping: VariableMapping,
    profile: RwSignal<DatasetProfileState>,
    generation: Generation,
    ticket: Ticket,
) {
    profile.update(|p| p.save_status = SaveStatus::Saving);
    let result = api.save_variable_mapping(&dataset_id, &mapping).await;
    if !generation.is_current(ticket) {
        log::debug!("profile: dropped superseded mapping save for {dataset_id}");
        return;
    }
    profile.try_update(|p| match result {
        Ok(saved) => {
            p.mapping = saved;
            p.save_status = SaveStatus::Saved;
        }
        Err(e) => p.save_status = SaveStatus::Failed(e.to_string()),
    });
}

fn finish_change(
    result: Result<DatasetSummary, ApiError>,
    profile: RwSignal<DatasetProfileState>,
    datasets: RwSignal<DatasetsState>,
    reload: RwSignal<u64>,
) {
    match result {
        Ok(summary) => {
            datasets.update(|s| s.upsert(summary));
            reload.update(|n| *n += 1);
        }
        Err(e) => profile.update(|p| p.error = Some(e.to_string())),
    }
}

/// Rename action, unless the new name is blank or unchanged.
fn rename_action(column: &str, new_name: &str) -> Option<SchemaAction> {
    let new_name = new_name.trim();
    if new_name.is_empty() || new_name == column {
        return None;
    }
    Some(SchemaAction::RenameColumn { column: column.to_owned(), new_name: new_name.to_owned() })
}

/// Parser overrides from the form; blank fields keep the backend's guess.
fn reparse_options(delimiter: &str, header_row: &str) -> ReparseOptions {
    let delimiter = match delimiter {
        "" => None,
        "\\t" | "tab" => Some("\t".to_owned()),
        other => Some(other.to_owned()),
    };
    ReparseOptions { delimiter, header_row: header_row.trim().parse().ok(), ..ReparseOptions::default() }
}
