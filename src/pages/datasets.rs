//! Dataset list page with upload and delete.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the landing route. It loads the dataset inventory once on mount,
//! uploads picked files as multipart, and confirms before deleting.

use leptos::prelude::*;

use crate::components::error_banner::ErrorBanner;
use crate::net::api::ApiClient;
use crate::net::types::DatasetSummary;
use crate::state::datasets::DatasetsState;
use crate::util::keyboard::{KeyBindings, use_shortcuts};
use crate::util::shortcuts::chords;
use crate::util::{task, upload};

#[cfg(test)]
#[path = "datasets_test.rs"]
mod datasets_test;

/// Datasets page: list, upload and delete.
#[component]
pub fn DatasetsPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let datasets = expect_context::<RwSignal<DatasetsState>>();
    let file_input = NodeRef::<leptos::html::Input>::new();
    let delete_id = RwSignal::new(None::<String>);

    let load_api = api.clone();
    let reload = Callback::new(move |()| {
        datasets.update(|s| {
            s.loading = true;
            s.error = None;
        });
        let api = load_api.clone();
        task::spawn(async move {
            let result = api.list_datasets().await;
            datasets.update(|s| {
                s.loading = false;
                match result {
                    Ok(items) => s.items = items,
                    Err(e) => s.error = Some(e.to_string()),
                }
            });
        });
    });
    reload.run(());

    let upload_api = api.clone();
    let on_file = move |ev: leptos::ev::Event| {
        let api = upload_api.clone();
        datasets.update(|s| {
            s.uploading = true;
            s.error = None;
        });
        task::spawn(async move {
            let result = match upload::read_selected_file(&ev).await {
                Ok(file) => {
                    log::info!("datasets: uploading {} ({} bytes)", file.filename, file.bytes.len());
                    api.upload_dataset(file).await.map_err(|e| e.to_string())
                }
                Err(message) => Err(message),
            };
            datasets.update(|s| {
                s.uploading = false;
                match result {
                    Ok(dataset) => s.upsert(dataset),
                    Err(message) => s.error = Some(message),
                }
            });
        });
    };

    let pick_file = move || {
        #[cfg(feature = "hydrate")]
        {
            if let Some(input) = file_input.get_untracked() {
                input.click();
            }
        }
    };

    use_shortcuts(
        KeyBindings::new().with(chords::OPEN, Callback::new(move |_| pick_file())),
        Signal::from(true),
    );
    use_shortcuts(
        KeyBindings::new().with(chords::ESCAPE, Callback::new(move |_| delete_id.set(None))),
        Signal::derive(move || delete_id.get().is_some()),
    );

    let on_delete_request = Callback::new(move |id: String| delete_id.set(Some(id)));
    let on_delete_cancel = Callback::new(move |()| delete_id.set(None));

    view! {
        <div class="datasets-page">
            <header class="datasets-page__header toolbar">
                <span class="toolbar__title">"Datasets"</span>
                <span class="toolbar__spacer"></span>
                <input
                    class="datasets-page__file"
                    type="file"
                    accept=".csv,.tsv,.txt,.json,.xlsx,.xls,.sav,.dta"
                    node_ref=file_input
                    on:change=on_file
                    hidden=true
                />
                <button
                    class="btn btn--primary"
                    disabled=move || datasets.get().uploading
                    on:click=move |_| pick_file()
                >
                    {move || if datasets.get().uploading { "Uploading..." } else { "Upload dataset" }}
                </button>
                <button class="btn" on:click=move |_| reload.run(())>
                    "Refresh"
                </button>
            </header>

            <ErrorBanner
                message=Signal::derive(move || datasets.get().error)
                on_dismiss=Callback::new(move |()| datasets.update(|s| s.error = None))
            />

            <Show
                when=move || !datasets.get().loading
                fallback=move || view! { <p>"Loading datasets..."</p> }
            >
                <Show
                    when=move || !datasets.get().items.is_empty()
                    fallback=move || view! { <p class="datasets-page__empty">"No datasets yet. Upload a file to begin."</p> }
                >
                    <table class="datasets-page__table">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Rows"</th>
                                <th>"Columns"</th>
                                <th>"Uploaded"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                datasets
                                    .get()
                                    .items
                                    .into_iter()
                                    .map(|d| view! { <DatasetRow dataset=d on_delete=on_delete_request/> })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </Show>
            </Show>

            <Show when=move || delete_id.get().is_some()>
                <DeleteDatasetDialog dataset_id=delete_id on_cancel=on_delete_cancel api=api.clone()/>
            </Show>
        </div>
    }
}

#[component]
fn DatasetRow(dataset: DatasetSummary, on_delete: Callback<String>) -> impl IntoView {
    let href = format!("/datasets/{}", dataset.id);
    let delete_id = dataset.id.clone();
    view! {
        <tr class="datasets-page__row">
            <td>
                <a class="datasets-page__open" href=href>
                    {dataset.name}
                </a>
            </td>
            <td>{dataset.row_count}</td>
            <td>{dataset.column_count}</td>
            <td>{dataset.created_at.map(|ts| format_timestamp(&ts)).unwrap_or_default()}</td>
            <td>
                <button class="btn btn--danger" title="Delete dataset" on:click=move |_| on_delete.run(delete_id.clone())>
                    "Delete"
                </button>
            </td>
        </tr>
    }
}

/// Confirmation dialog for deleting a dataset.
#[component]
fn DeleteDatasetDialog(dataset_id: RwSignal<Option<String>>, on_cancel: Callback<()>, api: ApiClient) -> impl IntoView {
    let datasets = expect_context::<RwSignal<DatasetsState>>();
    let name = move || {
        let id = dataset_id.get().unwrap_or_default();
        datasets.with(|s| s.get(&id).map(|d| d.name.clone())).unwrap_or(id)
    };

    let confirm = move |_| {
        let Some(id) = dataset_id.get_untracked() else {
            return;
        };
        let api = api.clone();
        on_cancel.run(());
        task::spawn(async move {
            match api.delete_dataset(&id).await {
                Ok(()) => {
                    log::info!("datasets: deleted {id}");
                    datasets.update(|s| {
                        s.remove(&id);
                    });
                }
                Err(e) => datasets.update(|s| s.error = Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Delete dataset"</h2>
                <p>"Delete " <strong>{name}</strong> "? This cannot be undone."</p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--danger" on:click=confirm>
                        "Delete"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// `YYYY-MM-DD HH:MM` from an ISO-8601 timestamp; other text passes through.
pub(crate) fn format_timestamp(iso: &str) -> String {
    match iso.split_once('T') {
        Some((date, time)) if date.len() == 10 => match time.get(..5) {
            Some(hhmm) => format!("{date} {hhmm}"),
            None => iso.to_owned(),
        },
        _ => iso.to_owned(),
    }
}
