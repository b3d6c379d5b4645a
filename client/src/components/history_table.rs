//! History tab: a table of past pipeline runs.
//!
//! Column headers come from the first row; the body is either the rows or a
//! single full-width status row (loading, empty, or the fetch error).

#[cfg(test)]
#[path = "history_table_test.rs"]
mod history_table_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::state::history::{EMPTY_HISTORY_MESSAGE, HistoryView};
use crate::state::pipeline::PipelineState;
use crate::state::stage::Tab;

/// Text of the single status row shown instead of table rows, if any.
fn status_message(view: &HistoryView) -> Option<String> {
    match view {
        HistoryView::NotLoaded | HistoryView::Table(_) => None,
        HistoryView::Loading => Some("Loading history...".to_owned()),
        HistoryView::Empty => Some(EMPTY_HISTORY_MESSAGE.to_owned()),
        HistoryView::Failed(message) => Some(message.clone()),
    }
}

/// Header captions for the current view; empty unless a table is loaded.
fn header_cells(view: &HistoryView) -> Vec<String> {
    match view {
        HistoryView::Table(table) => table.headers.clone(),
        _ => Vec::new(),
    }
}

#[component]
pub fn HistoryPanel() -> impl IntoView {
    let state = expect_context::<RwSignal<PipelineState>>();
    let history = Memo::new(move |_| state.with(|s| s.history.clone()));
    let is_active = move || state.with(|s| s.tabs.is_active(Tab::History));

    let head = move || {
        let headers = history.with(header_cells);
        (!headers.is_empty()).then(|| {
            view! {
                <tr>{headers.into_iter().map(|h| view! { <th>{h}</th> }).collect::<Vec<_>>()}</tr>
            }
        })
    };

    let body = move || {
        let current = history.get();
        if let Some(message) = status_message(&current) {
            return view! {
                <tr>
                    <td colspan="100%">{message}</td>
                </tr>
            }
            .into_any();
        }
        let rows = match current {
            HistoryView::Table(table) => table.rows,
            _ => Vec::new(),
        };
        rows.into_iter()
            .map(|cells| {
                view! { <tr>{cells.into_iter().map(|c| view! { <td>{c}</td> }).collect::<Vec<_>>()}</tr> }
            })
            .collect::<Vec<_>>()
            .into_any()
    };

    view! {
        <section id="history" class="tab-content" class:active=is_active>
            <table id="history-table" class="history-table">
                <thead>{head}</thead>
                <tbody>{body}</tbody>
            </table>
        </section>
    }
}
