//! # veracity-core
//!
//! Core errors, configuration, diagnostics events, and tracing setup shared by
//! the Veracity crowd-label inference crates.

pub mod config;
pub mod errors;
pub mod events;
pub mod tracing;

pub use config::{DiagnosticsConfig, ElboVariant, InferenceConfig, VeracityConfig};
pub use errors::{ConfigError, InferenceError, InferenceResult, VeracityErrorCode};
pub use events::{DiagnosticsHandler, EventDispatcher, TracingDiagnostics};
