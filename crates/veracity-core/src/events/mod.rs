//! Diagnostics events emitted by the inference engine.
//! Replaces ad-hoc printing with an opt-in handler hook.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::{DiagnosticsHandler, TracingDiagnostics};
pub use types::*;
