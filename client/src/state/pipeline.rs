//! Page-lifetime application state for the process pipeline.
//!
//! DESIGN
//! ======
//! One `PipelineState` is created when the page mounts and provided through
//! Leptos context. It owns the schema load status, the mounted forms and
//! their values, tab navigation, the in-flight request count behind the
//! loading overlay,
//! and the history view. Network calls live in `pages::pipeline`; the
//! transitions here are synchronous so they can be unit-tested without a
//! browser.

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;

use std::collections::BTreeSet;

use super::chain::{ChainOutcome, chain_forward};
use super::forms::{FieldRef, FieldRegistry, FormSpec, InvalidInputs, SCHEMA_LOADING_MESSAGE, model_not_loaded_message};
use super::history::HistoryView;
use super::stage::{PIPELINE, Stage, Tab};
use super::tabs::TabState;
use crate::net::api::ApiError;
use crate::net::types::{HistoryRow, Payload, PredictResponse, SchemaMap};
use crate::util::field_ids::log_key;

/// Alert shown when the schema request fails.
pub const CONNECTIVITY_ALERT: &str = "Could not connect to the backend server. Please ensure it's running.";

/// Alert shown when a stage's inputs fail validation.
pub const MISSING_INPUTS_ALERT: &str = "Please fill in all required input fields for this stage.";

/// Progress of the startup schema request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SchemaStatus {
    #[default]
    Loading,
    Loaded,
    Unavailable,
}

/// A prediction that ended without populating outputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictionError {
    #[error("Please fill in all required input fields for this stage.")]
    MissingInputs(InvalidInputs),
    #[error("Error: {0}")]
    Api(#[from] ApiError),
}

/// Root state object shared by every pipeline component.
#[derive(Clone, Debug)]
pub struct PipelineState {
    pub schema_status: SchemaStatus,
    pub registry: FieldRegistry,
    pub tabs: TabState,
    /// Predict calls still in flight; the loading overlay shows while nonzero.
    in_flight: usize,
    /// Stages whose "Next" button has been revealed.
    pub next_revealed: BTreeSet<Stage>,
    pub history: HistoryView,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineState {
    /// Fresh state: built-in forms mounted, model-backed stages waiting for
    /// their schema.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = FieldRegistry::default();
        for stage in PIPELINE {
            match FormSpec::builtin(stage) {
                Some(form) => registry.mount(form),
                None => registry.mount_placeholder(stage, SCHEMA_LOADING_MESSAGE),
            }
        }
        Self {
            schema_status: SchemaStatus::Loading,
            registry,
            tabs: TabState::default(),
            in_flight: 0,
            next_revealed: BTreeSet::new(),
            history: HistoryView::NotLoaded,
        }
    }

    /// Build every model-backed stage from `schemas` and show the first stage.
    /// Stages missing from the map get a "not loaded" placeholder.
    pub fn install_schemas(&mut self, schemas: &SchemaMap) {
        for stage in PIPELINE.into_iter().filter(|s| s.is_dynamic()) {
            match schemas.get(stage.as_str()) {
                Some(schema) => self.registry.mount(FormSpec::from_schema(stage, schema)),
                None => self.registry.mount_placeholder(stage, model_not_loaded_message(stage)),
            }
        }
        self.schema_status = SchemaStatus::Loaded;
        self.tabs.show(Tab::Stage(Stage::Order));
    }

    /// Disable every model-backed stage after a failed schema request.
    pub fn schema_load_failed(&mut self) {
        for stage in PIPELINE.into_iter().filter(|s| s.is_dynamic()) {
            self.registry.mount_placeholder(stage, model_not_loaded_message(stage));
        }
        self.schema_status = SchemaStatus::Unavailable;
    }

    /// Record a user edit. Edits to unmounted controls are dropped.
    pub fn set_field(&mut self, field: &FieldRef, value: String) {
        if !self.registry.set(field, value) {
            log::warn!("edit to unmounted control {}", field.dom_id());
        }
    }

    /// Validate `stage` and, when valid, count one request in flight and
    /// return the payload to send.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::MissingInputs`] without counting a request
    /// when any input is blank or malformed.
    pub fn begin_prediction(&mut self, stage: Stage) -> Result<Payload, PredictionError> {
        self.registry.validate(stage).map_err(PredictionError::MissingInputs)?;
        self.in_flight += 1;
        Ok(self.registry.payload(stage))
    }

    /// Apply the outcome of a predict call: populate outputs, run the chain
    /// rules, and reveal the stage's "Next" button.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::Api`] when the call failed; the request is
    /// counted as finished either way.
    pub fn finish_prediction(
        &mut self,
        stage: Stage,
        result: Result<PredictResponse, ApiError>,
    ) -> Result<ChainOutcome, PredictionError> {
        self.end_request();
        let response = result?;
        self.registry.populate_outputs(stage, &response.predictions);
        let outcome = chain_forward(&mut self.registry);
        self.next_revealed.insert(stage);
        Ok(outcome)
    }

    /// Whether any predict call is still in flight.
    #[must_use]
    pub fn busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Mark one predict call as finished.
    pub fn end_request(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    #[must_use]
    pub fn next_visible(&self, stage: Stage) -> bool {
        self.next_revealed.contains(&stage)
    }

    /// Activate `tab`. Returns `true` when the history view must reload.
    pub fn show_tab(&mut self, tab: Tab) -> bool {
        self.tabs.show(tab)
    }

    /// Go to the stage after `from`; no-op at the final stage.
    pub fn advance(&mut self, from: Stage) {
        self.tabs.advance(from);
    }

    /// Flattened snapshot of every mounted control for `POST /api/log`.
    ///
    /// `batch_no` comes first from the order form, then every control in
    /// pipeline order keyed by its id minus the stage segment; later controls
    /// overwrite earlier ones that flatten to the same key.
    #[must_use]
    pub fn log_payload(&self) -> Payload {
        let mut payload = Payload::new();
        if let Some(batch_no) = self.order_batch_no() {
            payload.insert("batch_no".to_owned(), batch_no.into());
        }
        for (field, value) in self.registry.snapshot() {
            payload.insert(log_key(&field.dom_id()), value.into());
        }
        payload
    }

    /// The batch number typed into the order form.
    #[must_use]
    pub fn order_batch_no(&self) -> Option<&str> {
        self.registry.get(&FieldRef::input(Stage::Order, "batch_no"))
    }

    /// Alert text after a feedback submission.
    #[must_use]
    pub fn feedback_saved_message(&self) -> String {
        format!("Feedback for Batch No. {} saved!", self.order_batch_no().unwrap_or_default())
    }

    pub fn begin_history_load(&mut self) {
        self.history = HistoryView::Loading;
    }

    /// Store the result of a history fetch.
    ///
    /// # Errors
    ///
    /// Passes the fetch error back so the caller can alert it.
    pub fn finish_history_load(&mut self, result: Result<Vec<HistoryRow>, ApiError>) -> Result<(), ApiError> {
        match result {
            Ok(rows) => {
                self.history = HistoryView::from_rows(&rows);
                Ok(())
            }
            Err(err) => {
                self.history = HistoryView::Failed(err.to_string());
                Err(err)
            }
        }
    }
}
