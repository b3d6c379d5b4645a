//! Top navigation: one button per pipeline stage plus history.

use leptos::prelude::*;

use crate::pages::pipeline_actions::show_tab;
use crate::state::pipeline::PipelineState;
use crate::state::stage::Tab;

#[component]
pub fn TabBar() -> impl IntoView {
    let state = expect_context::<RwSignal<PipelineState>>();

    view! {
        <nav class="tab-bar">
            {Tab::all()
                .into_iter()
                .map(|tab| {
                    view! {
                        <button
                            class="tab-button"
                            type="button"
                            class:active=move || state.with(|s| s.tabs.is_active(tab))
                            on:click=move |_| show_tab(state, tab)
                        >
                            {tab.label()}
                        </button>
                    }
                })
                .collect::<Vec<_>>()}
        </nav>
    }
}
