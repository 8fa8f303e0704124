//! Report download buttons, one per format.

use leptos::prelude::*;

use crate::net::types::ReportFormat;

/// `on_export` receives the chosen format; the caller fetches and saves.
#[component]
pub fn ReportExport(#[prop(into)] busy: Signal<bool>, on_export: Callback<ReportFormat>) -> impl IntoView {
    view! {
        <div class="report-export">
            <span class="report-export__label">"Export report"</span>
            {ReportFormat::ALL
                .into_iter()
                .map(|format| {
                    view! {
                        <button
                            class="btn report-export__button"
                            disabled=move || busy.get()
                            on:click=move |_| on_export.run(format)
                        >
                            {format.to_string()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
