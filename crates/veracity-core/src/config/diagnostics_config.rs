//! Diagnostics configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the optional diagnostics hook.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Emit diagnostics events from the inference engine. Default: false.
    pub enabled: Option<bool>,
    /// Wrap each engine call in a `tracing` span. Default: true.
    pub log_spans: Option<bool>,
}

impl DiagnosticsConfig {
    /// Returns whether diagnostics are enabled, defaulting to false.
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    /// Returns whether engine calls are wrapped in spans, defaulting to true.
    pub fn effective_log_spans(&self) -> bool {
        self.log_spans.unwrap_or(true)
    }
}
