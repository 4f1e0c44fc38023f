//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "VERACITY_LOG";

/// Filter used when `VERACITY_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "veracity=info";

/// Initialize the Veracity tracing/logging system.
///
/// Reads `VERACITY_LOG` for per-module log levels.
/// Format: `VERACITY_LOG=veracity_inference=debug,veracity_core=warn`
///
/// Falls back to `veracity=info` if `VERACITY_LOG` is not set or is invalid.
/// Idempotent. If another global subscriber is already installed, that one
/// is kept.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
