//! Undo/redo toolbar buttons.

use leptos::prelude::*;

use crate::util::undo_redo::UndoRedo;

#[component]
pub fn UndoControls<V>(history: UndoRedo<V>) -> impl IntoView
where
    V: Clone + PartialEq + Send + Sync + 'static,
{
    view! {
        <div class="undo-controls">
            <button
                class="btn undo-controls__undo"
                title="Undo (Cmd/Ctrl+Z)"
                disabled=move || !history.can_undo()
                on:click=move |_| {
                    history.undo();
                }
            >
                "↶ Undo"
            </button>
            <button
                class="btn undo-controls__redo"
                title="Redo (Shift+Cmd/Ctrl+Z)"
                disabled=move || !history.can_redo()
                on:click=move |_| {
                    history.redo();
                }
            >
                "↷ Redo"
            </button>
        </div>
    }
}
