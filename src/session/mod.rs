//! Session context and user-facing action flows.
//!
//! Sessions are owned by the caller (CLI invocation or HTTP session)
//! and passed by reference into the core, so independent policies and
//! histories can coexist.

mod actions;
mod context;
mod history;

pub use actions::{ActionError, GenerateRequest, GenerationReport, InspectionReport};
pub use context::{Session, SessionSummary};
pub use history::History;
