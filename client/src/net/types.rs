//! Wire-protocol DTOs for the prediction backend.
//!
//! DESIGN
//! ======
//! The backend is loosely typed (pandas/sklearn output), so these types accept
//! what it actually sends: categorical choices may be numbers, prediction
//! values may be strings or floats, and history rows are open-ended maps.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::util::labels::display_value;

/// Flat key/value body sent to the predict and log endpoints.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// One row of `GET /api/history`. Key order follows the server's column order.
pub type HistoryRow = serde_json::Map<String, serde_json::Value>;

/// Stage name -> schema, as returned by `GET /api/models/info`.
pub type SchemaMap = HashMap<String, ModelSchema>;

/// Input/output description of one model-backed stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Input field names, in display order.
    pub inputs: Vec<String>,
    /// Output (suggestion) field names, in display order.
    pub outputs: Vec<String>,
    /// Allowed values for categorical inputs, keyed by input field name.
    #[serde(default, deserialize_with = "deserialize_categorical_options")]
    pub categorical_options: Option<HashMap<String, Vec<String>>>,
}

impl ModelSchema {
    /// Option list declared for `field`, if it is categorical.
    #[must_use]
    pub fn options_for(&self, field: &str) -> Option<&[String]> {
        self.categorical_options
            .as_ref()
            .and_then(|opts| opts.get(field))
            .map(Vec::as_slice)
    }
}

/// Successful body of `POST /api/predict/{stage}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub status: Option<String>,
    /// Output field name -> predicted value.
    #[serde(default)]
    pub predictions: Payload,
}

/// Error body the backend attaches to non-success responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

fn deserialize_categorical_options<'de, D>(deserializer: D) -> Result<Option<HashMap<String, Vec<String>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<HashMap<String, Vec<serde_json::Value>>>::deserialize(deserializer)?;
    Ok(raw.map(|options| {
        options
            .into_iter()
            .map(|(field, values)| (field, values.iter().map(display_value).collect()))
            .collect()
    }))
}
