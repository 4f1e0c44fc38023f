//! Configuration system for Veracity.
//! TOML-based, layered resolution: env > project > user > defaults.

pub mod diagnostics_config;
pub mod inference_config;
pub mod veracity_config;

pub use diagnostics_config::DiagnosticsConfig;
pub use inference_config::{ElboVariant, InferenceConfig};
pub use veracity_config::VeracityConfig;
