//! History tab state and the table derived from backend log rows.
//!
//! DESIGN
//! ======
//! Columns come from the first row's keys; later rows are read by those keys
//! without checking that they share the same shape.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::net::types::HistoryRow;
use crate::util::labels::{display_value, title_case};

/// Body text when the backend has no rows.
pub const EMPTY_HISTORY_MESSAGE: &str = "No history.";

/// Rendered history table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryTable {
    /// Title-cased column captions.
    pub headers: Vec<String>,
    /// One entry per row, one cell per header, in input order.
    pub rows: Vec<Vec<String>>,
}

impl HistoryTable {
    /// Build a table from backend rows; `None` when there are none.
    #[must_use]
    pub fn from_rows(rows: &[HistoryRow]) -> Option<Self> {
        let first = rows.first()?;
        let keys: Vec<&String> = first.keys().collect();
        let headers = keys.iter().map(|k| title_case(k)).collect();
        let rows = rows
            .iter()
            .map(|row| {
                keys.iter()
                    .map(|key| row.get(key.as_str()).map(display_value).unwrap_or_default())
                    .collect()
            })
            .collect();
        Some(Self { headers, rows })
    }
}

/// What the history panel currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HistoryView {
    #[default]
    NotLoaded,
    Loading,
    Empty,
    Table(HistoryTable),
    Failed(String),
}

impl HistoryView {
    /// View for a freshly fetched row list.
    #[must_use]
    pub fn from_rows(rows: &[HistoryRow]) -> Self {
        HistoryTable::from_rows(rows).map_or(Self::Empty, Self::Table)
    }
}
