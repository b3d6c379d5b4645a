//! Human-readable text for field labels, table headers, and field values.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend speaks in snake_case field names and loosely typed JSON
//! values. Form labels, history headers, and read-only suggestion boxes all
//! go through these helpers so the same name renders the same way everywhere.

#[cfg(test)]
#[path = "labels_test.rs"]
mod labels_test;

use serde_json::Value;

/// Title-case a snake_case field name: underscores become spaces and every
/// word character that follows a non-word character is upper-cased.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_is_word = false;
    for ch in name.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        let is_word = ch.is_ascii_alphanumeric();
        if is_word && !prev_is_word {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
        prev_is_word = is_word;
    }
    out
}

/// Render a JSON value the way a text box would display it.
///
/// Strings are shown verbatim, `null` as empty, and integral floats without a
/// trailing `.0` so `180.0` from the backend reads as `180`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(number) => {
            if number.is_f64() {
                if let Some(float) = number.as_f64() {
                    return format_float(float);
                }
            }
            number.to_string()
        }
        other => other.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        return format!("{}", value as i64);
    }
    value.to_string()
}
