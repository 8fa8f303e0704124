//! Hoverable definition for a statistical term.
//!
//! SYSTEM CONTEXT
//! ==============
//! Definitions come from the knowledge base at the chosen explanation level.
//! Switching level or closing the tooltip supersedes any lookup still in
//! flight, so a slow response for an older level never overwrites a newer one.

use leptos::prelude::*;

use crate::net::api::ApiClient;
use crate::net::types::ExplanationLevel;
use crate::state::tooltip::TooltipState;
use crate::util::task;

const LEVELS: [ExplanationLevel; 3] =
    [ExplanationLevel::Basic, ExplanationLevel::Intermediate, ExplanationLevel::Advanced];

#[component]
pub fn TermTooltip(#[prop(into)] term: String, children: Children) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let state = RwSignal::new(TooltipState::default());
    let open = RwSignal::new(false);
    let level = RwSignal::new(ExplanationLevel::default());

    let lookup_term = term.clone();
    Effect::new(move || {
        let level = level.get();
        if !open.get() {
            state.try_update(TooltipState::close);
            return;
        }
        let Some(ticket) = state.try_update(|s| s.begin(&lookup_term, level)) else {
            return;
        };
        let api = api.clone();
        let term = lookup_term.clone();
        task::spawn(async move {
            let result = api.lookup_term(&term, level).await.map_err(|e| e.to_string());
            state.try_update(|s| s.resolve(ticket, result));
        });
    });

    on_cleanup(move || {
        state.try_update(TooltipState::close);
    });

    view! {
        <span
            class="term-tooltip"
            on:mouseenter=move |_| open.set(true)
            on:mouseleave=move |_| open.set(false)
            on:focusin=move |_| open.set(true)
            on:focusout=move |_| open.set(false)
            tabindex="0"
        >
            <span class="term-tooltip__term">{children()}</span>
            <Show when=move || open.get()>
                <div class="term-tooltip__popup" role="tooltip">
                    <div class="term-tooltip__levels">
                        {LEVELS
                            .into_iter()
                            .map(|l| {
                                view! {
                                    <button
                                        class="term-tooltip__level"
                                        class:term-tooltip__level--active=move || level.get() == l
                                        on:click=move |_| level.set(l)
                                    >
                                        {l.as_str()}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                    {move || {
                        let s = state.get();
                        if s.loading {
                            view! { <p class="term-tooltip__loading">"Loading..."</p> }.into_any()
                        } else if let Some(error) = s.error {
                            view! { <p class="term-tooltip__error">{error}</p> }.into_any()
                        } else if let Some(entry) = s.entry {
                            view! {
                                <div class="term-tooltip__entry">
                                    <p class="term-tooltip__definition">{entry.definition}</p>
                                    {entry.example.map(|ex| view! { <p class="term-tooltip__example">{ex}</p> })}
                                </div>
                            }
                                .into_any()
                        } else {
                            ().into_any()
                        }
                    }}
                </div>
            </Show>
        </span>
    }
}
