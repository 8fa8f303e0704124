//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    NavigateOptions, ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
    hooks::{use_location, use_navigate},
};

use crate::components::help_shortcuts_modal::HelpShortcutsModal;
use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::pages::{
    dataset_profile::DatasetProfilePage, datasets::DatasetsPage, protocol::ProtocolPage, wizard::WizardPage,
};
use crate::state::datasets::DatasetsState;
use crate::util::draft_store::{SessionStorage, WizardDrafts};
use crate::util::keyboard::{KeyBindings, use_shortcuts};
use crate::util::shortcuts::chords;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides configuration, the API client, draft storage and the dataset
/// list as contexts, then sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    log::debug!("app: api base {}", config.api_base);
    provide_context(ApiClient::http(&config.api_base));
    provide_context(config);
    provide_context(WizardDrafts::new(SessionStorage));
    provide_context(RwSignal::new(DatasetsState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/analysis-client.css"/>
        <Title text="Analysis"/>

        <Router>
            <GlobalShortcuts/>
            <main class="app">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=DatasetsPage/>
                    <Route path=(StaticSegment("datasets"), ParamSegment("id")) view=DatasetProfilePage/>
                    <Route
                        path=(StaticSegment("datasets"), ParamSegment("id"), StaticSegment("wizard"))
                        view=WizardPage
                    />
                    <Route
                        path=(StaticSegment("datasets"), ParamSegment("id"), StaticSegment("protocol"))
                        view=ProtocolPage
                    />
                </Routes>
            </main>
        </Router>
    }
}

/// App-wide chords: help overlay, and open-datasets away from the list page.
#[component]
fn GlobalShortcuts() -> impl IntoView {
    let show_help = RwSignal::new(false);
    let open_requested = RwSignal::new(false);
    let location = use_location();
    let navigate = use_navigate();

    Effect::new(move || {
        if open_requested.get() {
            open_requested.set(false);
            navigate("/", NavigateOptions::default());
        }
    });

    use_shortcuts(
        KeyBindings::new().with(chords::HELP, Callback::new(move |_| show_help.update(|v| *v = !*v))),
        Signal::from(true),
    );
    use_shortcuts(
        KeyBindings::new().with(chords::OPEN, Callback::new(move |_| open_requested.set(true))),
        Signal::derive(move || location.pathname.get() != "/"),
    );
    use_shortcuts(
        KeyBindings::new().with(chords::ESCAPE, Callback::new(move |_| show_help.set(false))),
        Signal::derive(move || show_help.get()),
    );

    view! {
        <Show when=move || show_help.get()>
            <HelpShortcutsModal on_close=Callback::new(move |()| show_help.set(false))/>
        </Show>
    }
}
