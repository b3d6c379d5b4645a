//! The single-page process pipeline: tab bar, one panel per stage, history,
//! and the loading overlay.

use leptos::prelude::*;

use super::pipeline_actions::load_schemas;
use crate::components::history_table::HistoryPanel;
use crate::components::loader::Loader;
use crate::components::stage_panel::StagePanel;
use crate::components::tab_bar::TabBar;
use crate::state::pipeline::PipelineState;
use crate::state::stage::PIPELINE;

/// Pipeline page. Kicks off the schema request when it mounts in the browser.
#[component]
pub fn PipelinePage() -> impl IntoView {
    let state = expect_context::<RwSignal<PipelineState>>();
    load_schemas(state);

    view! {
        <div class="pipeline-page">
            <header class="pipeline-page__header">
                <h1>"Fabric Process Pipeline"</h1>
            </header>
            <TabBar/>
            <main class="pipeline-page__panels">
                {PIPELINE.into_iter().map(|stage| view! { <StagePanel stage=stage/> }).collect::<Vec<_>>()}
                <HistoryPanel/>
            </main>
            <Loader/>
        </div>
    }
}
