//! Data quality findings with per-issue and bulk auto-fix.

use leptos::prelude::*;

use crate::net::types::{QualityIssue, QualityReport, Severity};

#[cfg(test)]
#[path = "quality_panel_test.rs"]
mod quality_panel_test;

#[component]
pub fn QualityPanel(
    #[prop(into)] report: Signal<Option<QualityReport>>,
    #[prop(into)] busy: Signal<bool>,
    on_scan: Callback<()>,
    on_fix: Callback<Vec<String>>,
) -> impl IntoView {
    let fix_all = move |_| {
        let ids = report.with(|r| r.as_ref().map(fixable_ids).unwrap_or_default());
        if !ids.is_empty() {
            on_fix.run(ids);
        }
    };

    view! {
        <section class="quality-panel">
            <header class="quality-panel__header">
                <h3>"Data quality"</h3>
                {move || {
                    report
                        .get()
                        .and_then(|r| r.score)
                        .map(|score| view! { <span class="quality-panel__score">{format!("{score:.0}/100")}</span> })
                }}
                <button class="btn" disabled=move || busy.get() on:click=move |_| on_scan.run(())>
                    {move || if busy.get() { "Scanning..." } else { "Scan" }}
                </button>
                <button
                    class="btn"
                    disabled=move || busy.get() || report.with(|r| r.as_ref().is_none_or(|r| fixable_ids(r).is_empty()))
                    on:click=fix_all
                >
                    "Fix all"
                </button>
            </header>
            {move || match report.get() {
                None => view! { <p class="quality-panel__empty">"Not scanned yet."</p> }.into_any(),
                Some(r) if r.issues.is_empty() => {
                    view! { <p class="quality-panel__empty">"No issues found."</p> }.into_any()
                }
                Some(r) => {
                    view! {
                        <ul class="quality-panel__issues">
                            {r.by_severity().into_iter().cloned().map(|issue| issue_row(issue, busy, on_fix)).collect_view()}
                        </ul>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}

fn issue_row(issue: QualityIssue, busy: Signal<bool>, on_fix: Callback<Vec<String>>) -> impl IntoView {
    let id = issue.id.clone();
    let fixable = issue.fixable;
    view! {
        <li class=format!("quality-panel__issue quality-panel__issue--{}", severity_class(issue.severity))>
            <span class="quality-panel__column">{issue.column.unwrap_or_default()}</span>
            <span class="quality-panel__message">{issue.message}</span>
            <Show when=move || fixable>
                {
                    let id = id.clone();
                    view! {
                        <button class="btn quality-panel__fix" disabled=move || busy.get() on:click=move |_| on_fix.run(vec![id.clone()])>
                            "Fix"
                        </button>
                    }
                }
            </Show>
        </li>
    }
}

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Warning => "warning",
        Severity::Error => "error",
    }
}

/// Ids of issues the backend can fix automatically.
pub fn fixable_ids(report: &QualityReport) -> Vec<String> {
    report.issues.iter().filter(|i| i.fixable).map(|i| i.id.clone()).collect()
}
