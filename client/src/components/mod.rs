//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the pipeline chrome and stage forms while reading/writing
//! the shared `PipelineState` from Leptos context.

pub mod history_table;
pub mod loader;
pub mod stage_panel;
pub mod tab_bar;
