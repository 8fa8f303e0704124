//! Paged table of dataset rows with inline cell editing.

use leptos::prelude::*;

use crate::net::types::{ColumnInfo, DatasetPage, SchemaAction};

#[cfg(test)]
#[path = "data_grid_test.rs"]
mod data_grid_test;

/// Renders one page of rows. Committing a changed cell emits an
/// [`SchemaAction::UpdateCell`] addressed by absolute row index.
#[component]
pub fn DataGrid(page: DatasetPage, on_edit: Callback<SchemaAction>) -> impl IntoView {
    let offset = row_offset(page.page, page.limit);
    let columns = page.columns.clone();

    view! {
        <div class="data-grid">
            <table class="data-grid__table">
                <thead>
                    <tr>
                        <th class="data-grid__index">"#"</th>
                        {columns
                            .iter()
                            .map(|c| {
                                view! {
                                    <th title=c.dtype.clone()>
                                        <span class="data-grid__column">{c.name.clone()}</span>
                                        <span class="data-grid__dtype">{c.dtype.clone()}</span>
                                    </th>
                                }
                            })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {page
                        .rows
                        .into_iter()
                        .enumerate()
                        .map(|(i, row)| {
                            let index = offset + i as u64;
                            let cells = columns
                                .iter()
                                .map(|column| {
                                    let original = row.get(&column.name).map(cell_text).unwrap_or_default();
                                    editable_cell(index, column.clone(), original, on_edit)
                                })
                                .collect_view();
                            view! {
                                <tr>
                                    <td class="data-grid__index">{index + 1}</td>
                                    {cells}
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}

fn editable_cell(row: u64, column: ColumnInfo, original: String, on_edit: Callback<SchemaAction>) -> impl IntoView {
    let shown = original.clone();
    let commit = move |ev: leptos::ev::FocusEvent| {
        let text = event_target_value(&ev);
        if text == original {
            return;
        }
        on_edit.run(SchemaAction::UpdateCell {
            row,
            column: column.name.clone(),
            value: parse_cell(&text, &column.dtype),
        });
    };

    view! {
        <td class="data-grid__cell">
            <input class="data-grid__input" prop:value=shown on:blur=commit/>
        </td>
    }
}

/// Absolute index of the first row on 1-based `page`.
fn row_offset(page: u32, limit: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(limit)
}

/// Display text for a JSON cell; `null` shows as empty.
fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Convert edited text back into a JSON value for a column of `dtype`.
///
/// Blank text becomes `null`. Numeric columns keep text that does not parse
/// so the backend can reject it with a useful message.
fn parse_cell(text: &str, dtype: &str) -> serde_json::Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return serde_json::Value::Null;
    }
    if dtype == "numeric" {
        if let Ok(n) = trimmed.parse::<i64>() {
            return serde_json::Value::from(n);
        }
        if let Some(n) = trimmed.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
            return serde_json::Value::Number(n);
        }
    }
    if dtype == "boolean" {
        match trimmed.to_ascii_lowercase().as_str() {
            "true" => return serde_json::Value::Bool(true),
            "false" => return serde_json::Value::Bool(false),
            _ => {}
        }
    }
    serde_json::Value::String(text.to_owned())
}
