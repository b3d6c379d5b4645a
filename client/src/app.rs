//! Root application component with routing and the pipeline context provider.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::pipeline::PipelinePage;
use crate::state::pipeline::PipelineState;

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
/// Provides the page-lifetime `PipelineState` and sets up routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let pipeline = RwSignal::new(PipelineState::new());
    provide_context(pipeline);

    view! {
        <Stylesheet id="leptos" href="/pkg/fabricflow.css"/>
        <Title text="Fabric Process Pipeline"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=PipelinePage/>
            </Routes>
        </Router>
    }
}
