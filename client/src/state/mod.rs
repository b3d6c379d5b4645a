//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`forms`, `chain`, `tabs`, `history`) and
//! composed into a single `pipeline::PipelineState` provided via context.

pub mod chain;
pub mod forms;
pub mod history;
pub mod pipeline;
pub mod stage;
pub mod tabs;
