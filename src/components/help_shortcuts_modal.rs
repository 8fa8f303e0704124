//! Modal listing the client's keyboard shortcuts.

use leptos::prelude::*;

use crate::util::shortcuts::SHORTCUT_HELP;

/// Fullscreen modal with shortcut table.
#[component]
pub fn HelpShortcutsModal(on_close: Callback<()>) -> impl IntoView {
    let on_backdrop = move |_| on_close.run(());
    let on_close_click = move |_| on_close.run(());

    view! {
        <div class="help-shortcuts-modal__backdrop" on:click=on_backdrop>
            <div class="help-shortcuts-modal" on:click=move |ev| ev.stop_propagation() role="dialog" aria-modal="true">
                <div class="help-shortcuts-modal__header">
                    <h2>"Keyboard shortcuts"</h2>
                    <button class="help-shortcuts-modal__close" on:click=on_close_click title="Close help">
                        "✕"
                    </button>
                </div>
                <div class="help-shortcuts-modal__subtitle">
                    "Shortcuts other than Esc are ignored while typing in a field."
                </div>
                <div class="help-shortcuts-modal__table-wrap">
                    <table class="help-shortcuts-modal__table">
                        <thead>
                            <tr>
                                <th>"Action"</th>
                                <th>"Shortcut"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {SHORTCUT_HELP
                                .iter()
                                .map(|row| {
                                    view! {
                                        <tr>
                                            <td>{row.action}</td>
                                            <td class="help-shortcuts-modal__keys">{row.keys}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
