//! DOM element ids for pipeline forms.
//!
//! DESIGN
//! ======
//! Field values are addressed through typed `FieldRef`s; ids are derived here
//! only for markup and for the flattened keys the state logger sends. The id
//! grammar is `{stage}-{field}` for inputs and `{stage}-sugg-{field}` for
//! outputs, with underscores in field names written as dashes.

#[cfg(test)]
#[path = "field_ids_test.rs"]
mod field_ids_test;

use crate::state::stage::Stage;

/// Id of an editable input control.
pub fn input_id(stage: Stage, field: &str) -> String {
    format!("{}-{}", stage.as_str(), field.replace('_', "-"))
}

/// Id of a read-only suggestion control.
pub fn output_id(stage: Stage, field: &str) -> String {
    format!("{}-sugg-{}", stage.as_str(), field.replace('_', "-"))
}

/// Id of a stage's `<form>` element.
pub fn form_id(stage: Stage) -> String {
    format!("{}-form", stage.as_str())
}

/// Id of a stage's "Next" button.
pub fn next_button_id(stage: Stage) -> String {
    format!("{}-next-btn", stage.as_str())
}

/// Flatten an element id into a log key: dashes become underscores and the
/// leading stage segment is dropped (`order-sugg-gray-gsm` -> `sugg_gray_gsm`).
pub fn log_key(id: &str) -> String {
    let underscored = id.replace('-', "_");
    match underscored.split_once('_') {
        Some((_, rest)) => rest.to_owned(),
        None => String::new(),
    }
}
