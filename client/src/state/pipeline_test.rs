use super::*;
use crate::state::forms::Panel;
use serde_json::json;

fn schemas() -> SchemaMap {
    serde_json::from_value(json!({
        "knitting": {
            "inputs": ["target_gsm", "target_dia", "construction"],
            "outputs": ["mc_dia", "stitch_length"],
            "categorical_options": { "construction": ["Single Jersey", "Rib"] }
        },
        "stenter": {
            "inputs": ["dyed_gsm", "dyed_dia", "target_gsm", "target_dia"],
            "outputs": ["stenter_speed"],
            "categorical_options": {}
        },
        "order": { "inputs": ["ignored"], "outputs": [], "categorical_options": {} }
    }))
    .unwrap()
}

fn fill_order(state: &mut PipelineState) {
    state.set_field(&FieldRef::input(Stage::Order, "batch_no"), "B-17".to_owned());
    state.set_field(&FieldRef::input(Stage::Order, "req_gsm"), "180".to_owned());
    state.set_field(&FieldRef::input(Stage::Order, "req_dia"), "72".to_owned());
}

fn ok_response(predictions: serde_json::Value) -> Result<PredictResponse, ApiError> {
    Ok(PredictResponse { status: Some("success".to_owned()), predictions: predictions.as_object().unwrap().clone() })
}

// =============================================================
// Startup
// =============================================================

#[test]
fn new_state_mounts_builtin_forms_and_loading_placeholders() {
    let state = PipelineState::new();
    assert_eq!(state.schema_status, SchemaStatus::Loading);
    assert!(state.registry.form(Stage::Order).is_some());
    assert!(state.registry.form(Stage::Dyeing).is_some());
    assert!(state.registry.form(Stage::Feedback).is_some());
    assert_eq!(
        state.registry.panel(Stage::Knitting),
        Some(&Panel::Placeholder(SCHEMA_LOADING_MESSAGE.to_owned()))
    );
    assert!(!state.busy());
    assert_eq!(state.tabs.active(), Tab::Stage(Stage::Order));
}

#[test]
fn install_schemas_builds_dynamic_forms_and_placeholders() {
    let mut state = PipelineState::new();
    state.install_schemas(&schemas());
    assert_eq!(state.schema_status, SchemaStatus::Loaded);
    assert_eq!(state.registry.form(Stage::Knitting).unwrap().inputs.len(), 3);
    assert_eq!(state.registry.form(Stage::Stenter).unwrap().outputs.len(), 1);
    assert_eq!(
        state.registry.panel(Stage::Compactor),
        Some(&Panel::Placeholder("Model for 'compactor' is not loaded.".to_owned()))
    );
}

#[test]
fn install_schemas_never_replaces_builtin_forms() {
    let mut state = PipelineState::new();
    state.install_schemas(&schemas());
    let order = state.registry.form(Stage::Order).unwrap();
    assert_eq!(order.inputs[0].field, "batch_no");
}

#[test]
fn install_schemas_shows_order_tab() {
    let mut state = PipelineState::new();
    state.show_tab(Tab::Stage(Stage::Dyeing));
    state.install_schemas(&schemas());
    assert_eq!(state.tabs.active(), Tab::Stage(Stage::Order));
}

#[test]
fn schema_load_failure_disables_dynamic_forms_only() {
    let mut state = PipelineState::new();
    state.schema_load_failed();
    assert_eq!(state.schema_status, SchemaStatus::Unavailable);
    for stage in PIPELINE {
        assert_eq!(state.registry.form(stage).is_some(), !stage.is_dynamic());
    }
}

// =============================================================
// Prediction
// =============================================================

#[test]
fn begin_prediction_with_missing_input_does_not_go_busy() {
    let mut state = PipelineState::new();
    let err = state.begin_prediction(Stage::Order).unwrap_err();
    assert!(matches!(err, PredictionError::MissingInputs(_)));
    assert_eq!(err.to_string(), MISSING_INPUTS_ALERT);
    assert!(!state.busy());
}

#[test]
fn begin_prediction_for_unloaded_stage_fails_validation() {
    let mut state = PipelineState::new();
    state.schema_load_failed();
    assert!(matches!(state.begin_prediction(Stage::Knitting), Err(PredictionError::MissingInputs(_))));
}

#[test]
fn begin_prediction_returns_payload_and_goes_busy() {
    let mut state = PipelineState::new();
    fill_order(&mut state);
    let payload = state.begin_prediction(Stage::Order).unwrap();
    assert!(state.busy());
    assert_eq!(payload.get("req_gsm"), Some(&json!(180.0)));
    assert_eq!(payload.get("batch_no"), Some(&json!("B-17")));
}

#[test]
fn finish_prediction_populates_chains_and_reveals_next() {
    let mut state = PipelineState::new();
    state.install_schemas(&schemas());
    fill_order(&mut state);
    state.begin_prediction(Stage::Order).unwrap();

    let outcome = state
        .finish_prediction(Stage::Order, ok_response(json!({ "gray_gsm": 156.52, "gray_dia": 90.0 })))
        .unwrap();

    assert!(!state.busy());
    assert!(state.next_visible(Stage::Order));
    assert!(!state.next_visible(Stage::Knitting));
    assert_eq!(state.registry.get(&FieldRef::output(Stage::Order, "gray_gsm")), Some("156.52"));
    assert_eq!(state.registry.get(&FieldRef::input(Stage::Knitting, "target_gsm")), Some("156.52"));
    assert_eq!(state.registry.get(&FieldRef::input(Stage::Knitting, "target_dia")), Some("90"));
    assert_eq!(state.registry.get(&FieldRef::input(Stage::Stenter, "target_gsm")), Some("180"));
    assert_eq!(state.registry.get(&FieldRef::input(Stage::Feedback, "batch_no")), Some("B-17"));
    // Compactor has no schema, so its two rules are skipped.
    assert_eq!(outcome.skipped.len(), 2);
}

#[test]
fn chain_runs_after_any_stage_prediction() {
    let mut state = PipelineState::new();
    state.install_schemas(&schemas());
    state.set_field(&FieldRef::output(Stage::Order, "gray_gsm"), "180".to_owned());
    state.finish_prediction(Stage::Dyeing, ok_response(json!({ "dyed_gsm": 175.0 }))).unwrap();
    assert_eq!(state.registry.get(&FieldRef::input(Stage::Knitting, "target_gsm")), Some("180"));
    assert_eq!(state.registry.get(&FieldRef::input(Stage::Stenter, "dyed_gsm")), Some("175"));
}

#[test]
fn overlay_stays_until_last_overlapping_prediction_finishes() {
    let mut state = PipelineState::new();
    fill_order(&mut state);
    state.begin_prediction(Stage::Order).unwrap();
    state.begin_prediction(Stage::Order).unwrap();

    state.finish_prediction(Stage::Order, ok_response(json!({ "gray_gsm": 150.0 }))).unwrap();
    assert!(state.busy());

    state.finish_prediction(Stage::Order, ok_response(json!({ "gray_gsm": 151.0 }))).unwrap();
    assert!(!state.busy());
    assert_eq!(state.registry.get(&FieldRef::output(Stage::Order, "gray_gsm")), Some("151"));
}

#[test]
fn end_request_never_underflows() {
    let mut state = PipelineState::new();
    state.end_request();
    assert!(!state.busy());
}

#[test]
fn finish_prediction_error_clears_busy_and_keeps_outputs() {
    let mut state = PipelineState::new();
    fill_order(&mut state);
    state.begin_prediction(Stage::Order).unwrap();

    let err = state
        .finish_prediction(
            Stage::Order,
            Err(ApiError::Server { status: 400, message: "could not convert string to float: 'x'".to_owned() }),
        )
        .unwrap_err();

    assert!(!state.busy());
    assert_eq!(err.to_string(), "Error: could not convert string to float: 'x'");
    assert!(!state.next_visible(Stage::Order));
    assert_eq!(state.registry.get(&FieldRef::output(Stage::Order, "gray_gsm")), Some(""));
}

// =============================================================
// Navigation
// =============================================================

#[test]
fn advance_moves_through_pipeline() {
    let mut state = PipelineState::new();
    state.advance(Stage::Order);
    assert_eq!(state.tabs.active(), Tab::Stage(Stage::Knitting));
    state.show_tab(Tab::Stage(Stage::Feedback));
    state.advance(Stage::Feedback);
    assert_eq!(state.tabs.active(), Tab::Stage(Stage::Feedback));
}

#[test]
fn show_tab_history_requests_reload() {
    let mut state = PipelineState::new();
    assert!(state.show_tab(Tab::History));
    assert!(!state.show_tab(Tab::Stage(Stage::Order)));
}

// =============================================================
// State logging
// =============================================================

#[test]
fn log_payload_flattens_every_mounted_control() {
    let mut state = PipelineState::new();
    state.install_schemas(&schemas());
    fill_order(&mut state);
    state.set_field(&FieldRef::output(Stage::Order, "gray_gsm"), "156.52".to_owned());
    state.set_field(&FieldRef::input(Stage::Knitting, "construction"), "Rib".to_owned());

    let payload = state.log_payload();
    assert_eq!(payload.get("batch_no"), Some(&json!("B-17")));
    assert_eq!(payload.get("req_gsm"), Some(&json!("180")));
    assert_eq!(payload.get("sugg_gray_gsm"), Some(&json!("156.52")));
    assert_eq!(payload.get("construction"), Some(&json!("Rib")));
    assert_eq!(payload.get("weight_increase"), Some(&json!("15")));
    assert_eq!(payload.get("sugg_stenter_speed"), Some(&json!("")));
    assert!(payload.values().all(serde_json::Value::is_string));
}

#[test]
fn log_payload_later_stages_overwrite_shared_keys() {
    let mut state = PipelineState::new();
    state.install_schemas(&schemas());
    state.set_field(&FieldRef::input(Stage::Knitting, "target_gsm"), "150".to_owned());
    state.set_field(&FieldRef::input(Stage::Stenter, "target_gsm"), "180".to_owned());
    state.set_field(&FieldRef::input(Stage::Feedback, "batch_no"), "B-late".to_owned());
    state.set_field(&FieldRef::input(Stage::Order, "batch_no"), "B-early".to_owned());

    let payload = state.log_payload();
    assert_eq!(payload.get("target_gsm"), Some(&json!("180")));
    assert_eq!(payload.get("batch_no"), Some(&json!("B-late")));
    assert_eq!(payload.keys().next().map(String::as_str), Some("batch_no"));
}

#[test]
fn feedback_saved_message_uses_order_batch() {
    let mut state = PipelineState::new();
    fill_order(&mut state);
    assert_eq!(state.feedback_saved_message(), "Feedback for Batch No. B-17 saved!");
}

// =============================================================
// History
// =============================================================

#[test]
fn history_load_success_and_failure() {
    let mut state = PipelineState::new();
    state.begin_history_load();
    assert_eq!(state.history, HistoryView::Loading);

    assert!(state.finish_history_load(Ok(Vec::new())).is_ok());
    assert_eq!(state.history, HistoryView::Empty);

    let err = state
        .finish_history_load(Err(ApiError::Transport("offline".to_owned())))
        .unwrap_err();
    assert_eq!(err, ApiError::Transport("offline".to_owned()));
    assert_eq!(state.history, HistoryView::Failed("offline".to_owned()));
}
