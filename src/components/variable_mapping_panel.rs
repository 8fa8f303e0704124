//! Role assignment table for dataset columns.

use leptos::prelude::*;

use crate::net::types::{VariableMapping, VariableRole};
use crate::state::dataset_profile::SaveStatus;

/// One role dropdown per column. Changes are reported through `on_change`;
/// saving is the caller's concern.
#[component]
pub fn VariableMappingPanel(
    columns: Vec<String>,
    #[prop(into)] mapping: Signal<VariableMapping>,
    #[prop(into)] status: Signal<SaveStatus>,
    on_change: Callback<(String, VariableRole)>,
) -> impl IntoView {
    view! {
        <section class="mapping-panel">
            <header class="mapping-panel__header">
                <h3>"Variable roles"</h3>
                <span class="mapping-panel__status" class:mapping-panel__status--error=move || {
                    matches!(status.get(), SaveStatus::Failed(_))
                }>{move || status.get().label().to_owned()}</span>
            </header>
            <table class="mapping-panel__table">
                <tbody>
                    {columns
                        .into_iter()
                        .map(|column| {
                            let select_column = column.clone();
                            let current_column = column.clone();
                            view! {
                                <tr>
                                    <td class="mapping-panel__column">{column}</td>
                                    <td>
                                        <select
                                            class="mapping-panel__role"
                                            prop:value=move || mapping.get().role(&current_column).as_str()
                                            on:change=move |ev| {
                                                if let Some(role) = VariableRole::parse(&event_target_value(&ev)) {
                                                    on_change.run((select_column.clone(), role));
                                                }
                                            }
                                        >
                                            {VariableRole::ALL
                                                .into_iter()
                                                .map(|role| view! { <option value=role.as_str()>{role.as_str()}</option> })
                                                .collect_view()}
                                        </select>
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </section>
    }
}
