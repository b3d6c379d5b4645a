//! Full-page loading overlay shown while a backend call is in flight.

use leptos::prelude::*;

use crate::state::pipeline::PipelineState;

#[component]
pub fn Loader() -> impl IntoView {
    let state = expect_context::<RwSignal<PipelineState>>();
    let display = move || if state.with(PipelineState::busy) { "flex" } else { "none" };

    view! {
        <div id="loader" class="loader" style:display=display>
            <div class="loader__spinner"></div>
        </div>
    }
}
