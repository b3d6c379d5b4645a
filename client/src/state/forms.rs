//! Stage form descriptors and the typed field registry.
//!
//! DESIGN
//! ======
//! A `FormSpec` describes which controls a stage renders; the `FieldRegistry`
//! holds the mounted forms and their current values keyed by `FieldRef`
//! (stage, role, field). Components render from the registry and write user
//! edits back into it, so prediction, chaining, and logging never look values
//! up by constructed DOM id strings.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use super::stage::{PIPELINE, Stage};
use crate::net::types::{ModelSchema, Payload};
use crate::util::field_ids;
use crate::util::labels::{display_value, title_case};

/// Shown in a dynamic stage's panel before the schema request completes.
pub const SCHEMA_LOADING_MESSAGE: &str = "Loading model schema...";

/// Placeholder text for a dynamic stage whose model is not loaded.
pub fn model_not_loaded_message(stage: Stage) -> String {
    format!("Model for '{}' is not loaded.", stage.as_str())
}

/// Whether a field is user-editable or a read-only suggestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldRole {
    Input,
    Output,
}

/// Typed address of one control.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldRef {
    pub stage: Stage,
    pub role: FieldRole,
    pub field: String,
}

impl FieldRef {
    pub fn input(stage: Stage, field: impl Into<String>) -> Self {
        Self { stage, role: FieldRole::Input, field: field.into() }
    }

    pub fn output(stage: Stage, field: impl Into<String>) -> Self {
        Self { stage, role: FieldRole::Output, field: field.into() }
    }

    /// DOM id of the control this reference addresses.
    #[must_use]
    pub fn dom_id(&self) -> String {
        match self.role {
            FieldRole::Input => field_ids::input_id(self.stage, &self.field),
            FieldRole::Output => field_ids::output_id(self.stage, &self.field),
        }
    }
}

/// Kind of editable control rendered for an input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlKind {
    /// `<input type="number" step="any">`; sent as a JSON number.
    Number,
    /// Free text; sent as a string.
    Text,
    /// `<select>` over the given choices; sent as a string.
    Select(Vec<String>),
}

/// One editable control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputSpec {
    pub field: String,
    pub label: String,
    pub kind: ControlKind,
    /// Value the control starts with when mounted.
    pub default: Option<String>,
}

impl InputSpec {
    fn new(field: &str, kind: ControlKind) -> Self {
        Self { field: field.to_owned(), label: title_case(field), kind, default: None }
    }

    fn number(field: &str) -> Self {
        Self::new(field, ControlKind::Number)
    }

    fn text(field: &str) -> Self {
        Self::new(field, ControlKind::Text)
    }

    fn with_default(mut self, value: &str) -> Self {
        self.default = Some(value.to_owned());
        self
    }
}

/// One read-only suggestion control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputSpec {
    pub field: String,
    pub label: String,
}

impl OutputSpec {
    fn new(field: &str) -> Self {
        Self { field: field.to_owned(), label: title_case(field) }
    }
}

/// Everything a stage panel renders: inputs, then suggestions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormSpec {
    pub stage: Stage,
    pub inputs: Vec<InputSpec>,
    pub outputs: Vec<OutputSpec>,
}

impl FormSpec {
    /// Build a form from a backend model schema. Inputs with a declared option
    /// list become selections; all others are numeric.
    #[must_use]
    pub fn from_schema(stage: Stage, schema: &ModelSchema) -> Self {
        let inputs = schema
            .inputs
            .iter()
            .map(|field| match schema.options_for(field) {
                Some(options) => InputSpec::new(field, ControlKind::Select(options.to_vec())),
                None => InputSpec::number(field),
            })
            .collect();
        let outputs = schema.outputs.iter().map(|field| OutputSpec::new(field)).collect();
        Self { stage, inputs, outputs }
    }

    /// Fixed form for a stage that is not model-backed.
    #[must_use]
    pub fn builtin(stage: Stage) -> Option<Self> {
        let (inputs, outputs) = match stage {
            Stage::Order => (
                vec![
                    InputSpec::text("batch_no"),
                    InputSpec::number("req_gsm"),
                    InputSpec::number("req_dia"),
                    InputSpec::number("weight_increase").with_default("15"),
                    InputSpec::number("length_increase").with_default("-20"),
                ],
                vec![OutputSpec::new("gray_gsm"), OutputSpec::new("gray_dia")],
            ),
            Stage::Dyeing => (
                vec![
                    InputSpec::number("produced_gray_gsm"),
                    InputSpec::number("produced_gray_dia"),
                    InputSpec::number("shade_percent"),
                    InputSpec::number("enzyme_percent"),
                ],
                vec![OutputSpec::new("dyed_gsm"), OutputSpec::new("dyed_dia")],
            ),
            Stage::Feedback => (
                vec![
                    InputSpec::text("batch_no"),
                    InputSpec::number("finished_gsm"),
                    InputSpec::number("finished_dia"),
                ],
                Vec::new(),
            ),
            Stage::Knitting | Stage::Stenter | Stage::Compactor => return None,
        };
        Some(Self { stage, inputs, outputs })
    }

    /// Every control reference in document order (inputs, then outputs).
    #[must_use]
    pub fn field_refs(&self) -> Vec<FieldRef> {
        self.inputs
            .iter()
            .map(|i| FieldRef::input(self.stage, &i.field))
            .chain(self.outputs.iter().map(|o| FieldRef::output(self.stage, &o.field)))
            .collect()
    }
}

/// Contents of a stage's tab panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Panel {
    Form(FormSpec),
    Placeholder(String),
}

/// Client-side validation failure: the listed inputs are empty or invalid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidInputs {
    pub stage: Stage,
    /// Fields that failed; empty when the stage has no form at all.
    pub fields: Vec<String>,
}

/// Mounted stage panels and the current value of every control.
#[derive(Clone, Debug, Default)]
pub struct FieldRegistry {
    panels: BTreeMap<Stage, Panel>,
    values: HashMap<FieldRef, String>,
}

impl FieldRegistry {
    /// Replace a stage's panel with `form`, resetting its controls to their
    /// defaults.
    pub fn mount(&mut self, form: FormSpec) {
        let stage = form.stage;
        self.clear_values(stage);
        for input in &form.inputs {
            let value = input.default.clone().unwrap_or_default();
            self.values.insert(FieldRef::input(stage, &input.field), value);
        }
        for output in &form.outputs {
            self.values.insert(FieldRef::output(stage, &output.field), String::new());
        }
        self.panels.insert(stage, Panel::Form(form));
    }

    /// Replace a stage's panel with a message; its controls disappear.
    pub fn mount_placeholder(&mut self, stage: Stage, message: impl Into<String>) {
        self.clear_values(stage);
        self.panels.insert(stage, Panel::Placeholder(message.into()));
    }

    fn clear_values(&mut self, stage: Stage) {
        self.values.retain(|key, _| key.stage != stage);
    }

    #[must_use]
    pub fn panel(&self, stage: Stage) -> Option<&Panel> {
        self.panels.get(&stage)
    }

    /// The stage's form, if one is mounted.
    #[must_use]
    pub fn form(&self, stage: Stage) -> Option<&FormSpec> {
        match self.panels.get(&stage) {
            Some(Panel::Form(form)) => Some(form),
            _ => None,
        }
    }

    #[must_use]
    pub fn contains(&self, field: &FieldRef) -> bool {
        self.values.contains_key(field)
    }

    #[must_use]
    pub fn get(&self, field: &FieldRef) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Write a control's value. Returns `false` (and writes nothing) when the
    /// control is not mounted.
    pub fn set(&mut self, field: &FieldRef, value: impl Into<String>) -> bool {
        match self.values.get_mut(field) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Check that every input of `stage` carries a usable value.
    ///
    /// # Errors
    ///
    /// Returns the offending fields when a value is blank or a numeric input
    /// does not parse; a stage without a mounted form is always invalid.
    pub fn validate(&self, stage: Stage) -> Result<(), InvalidInputs> {
        let Some(form) = self.form(stage) else {
            return Err(InvalidInputs { stage, fields: Vec::new() });
        };
        let fields: Vec<String> = form
            .inputs
            .iter()
            .filter(|input| {
                let value = self.get(&FieldRef::input(stage, &input.field)).unwrap_or_default();
                !input_is_valid(&input.kind, value)
            })
            .map(|input| input.field.clone())
            .collect();
        if fields.is_empty() { Ok(()) } else { Err(InvalidInputs { stage, fields }) }
    }

    /// Predict payload for `stage`: every input keyed by field name, numeric
    /// inputs as JSON numbers.
    #[must_use]
    pub fn payload(&self, stage: Stage) -> Payload {
        let mut payload = Payload::new();
        let Some(form) = self.form(stage) else {
            return payload;
        };
        for input in &form.inputs {
            let raw = self.get(&FieldRef::input(stage, &input.field)).unwrap_or_default();
            let value = match input.kind {
                ControlKind::Number => parse_number(raw)
                    .and_then(serde_json::Number::from_f64)
                    .map_or(Value::Null, Value::Number),
                ControlKind::Text | ControlKind::Select(_) => Value::String(raw.to_owned()),
            };
            payload.insert(input.field.clone(), value);
        }
        payload
    }

    /// Write predicted values into `stage`'s suggestion controls. Keys without
    /// a matching output are ignored. Returns how many controls were written.
    pub fn populate_outputs(&mut self, stage: Stage, predictions: &Payload) -> usize {
        let mut written = 0;
        for (field, value) in predictions {
            if self.set(&FieldRef::output(stage, field.as_str()), display_value(value)) {
                written += 1;
            }
        }
        written
    }

    /// Every mounted control with its value, in pipeline then document order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(FieldRef, String)> {
        PIPELINE
            .iter()
            .filter_map(|stage| self.form(*stage))
            .flat_map(FormSpec::field_refs)
            .map(|field| {
                let value = self.get(&field).unwrap_or_default().to_owned();
                (field, value)
            })
            .collect()
    }
}

/// Value to commit for the raw text of a numeric control, or `None` while
/// the text is a partial number (`-`, `1e`) that must not replace the stored
/// value. A cleared control commits as empty.
#[must_use]
pub fn numeric_commit(raw: &str) -> Option<String> {
    if raw.trim().is_empty() || parse_number(raw).is_some() { Some(raw.to_owned()) } else { None }
}

/// Whether a numeric control's draft text must be replaced by the stored
/// value, i.e. the draft does not already commit to it.
#[must_use]
pub fn draft_out_of_sync(draft: &str, stored: &str) -> bool {
    numeric_commit(draft).as_deref() != Some(stored)
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn input_is_valid(kind: &ControlKind, value: &str) -> bool {
    if value.trim().is_empty() {
        return false;
    }
    match kind {
        ControlKind::Number => parse_number(value).is_some(),
        ControlKind::Text | ControlKind::Select(_) => true,
    }
}
