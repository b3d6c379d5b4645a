//! Event handlers that pair a `PipelineState` transition with a backend call.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components call these from click handlers. Each one applies the synchronous
//! transition on the shared signal, spawns the network call (browser build
//! only), and applies the completion transition when it resolves. Nothing is
//! de-duplicated or cancelled; a later response simply overwrites an earlier
//! one.

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::state::pipeline::CONNECTIVITY_ALERT;
use crate::state::pipeline::PipelineState;
use crate::state::stage::{Stage, Tab};
use crate::util::alert;

/// Fetch the model schemas once at startup and build the dynamic forms.
pub fn load_schemas(state: RwSignal<PipelineState>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_model_schemas().await {
            Ok(schemas) => {
                log::info!("loaded {} model schemas", schemas.len());
                state.update(|s| s.install_schemas(&schemas));
            }
            Err(e) => {
                log::error!("failed to load model schemas: {e}");
                state.update(PipelineState::schema_load_failed);
                alert::show(CONNECTIVITY_ALERT);
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = state;
    }
}

/// Validate `stage`, request its predictions, and chain/log on success.
pub fn run_prediction(state: RwSignal<PipelineState>, stage: Stage) {
    let Some(begun) = state.try_update(|s| s.begin_prediction(stage)) else {
        return;
    };
    let payload = match begun {
        Ok(payload) => payload,
        Err(err) => {
            alert::show(&err.to_string());
            return;
        }
    };

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = crate::net::api::predict(stage, &payload).await;
        match state.try_update(|s| s.finish_prediction(stage, result)) {
            Some(Ok(outcome)) => {
                log::debug!(
                    "{} prediction applied; {} chain rules copied, {} skipped",
                    stage.as_str(),
                    outcome.applied,
                    outcome.skipped.len()
                );
                log_state(state).await;
            }
            Some(Err(err)) => alert::show(&err.to_string()),
            None => {}
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = payload;
        state.update(PipelineState::end_request);
    }
}

/// Post the flattened snapshot of every mounted control. Failures are only
/// logged.
#[cfg(feature = "hydrate")]
async fn log_state(state: RwSignal<PipelineState>) {
    let payload = state.with_untracked(PipelineState::log_payload);
    if let Err(e) = crate::net::api::post_log(&payload).await {
        log::warn!("state log failed: {e}");
    }
}

/// Log the final snapshot, confirm, and switch to the history tab.
pub fn submit_feedback(state: RwSignal<PipelineState>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        log_state(state).await;
        let message = state.with_untracked(PipelineState::feedback_saved_message);
        alert::show(&message);
        show_tab(state, Tab::History);
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = state;
    }
}

/// Activate `tab`, reloading history when it becomes visible.
pub fn show_tab(state: RwSignal<PipelineState>, tab: Tab) {
    if state.try_update(|s| s.show_tab(tab)) == Some(true) {
        load_history(state);
    }
}

/// Move from `stage` to the next pipeline stage.
pub fn advance(state: RwSignal<PipelineState>, stage: Stage) {
    state.update(|s| s.advance(stage));
}

/// Refetch the history table.
pub fn load_history(state: RwSignal<PipelineState>) {
    state.update(PipelineState::begin_history_load);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = crate::net::api::fetch_history().await;
        if let Some(Err(e)) = state.try_update(|s| s.finish_history_load(result)) {
            log::error!("history load failed: {e}");
            alert::show(&format!("Error: {e}"));
        }
    });
}
