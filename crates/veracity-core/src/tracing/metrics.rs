//! Structured field names used in Veracity tracing spans and events.
//!
//! `tracing` macros need literal field names, so the engine spans and
//! `TracingDiagnostics` spell these out inline. This module is the naming
//! contract those literals must follow, and [`ALL`] is what log consumers
//! and tests match against.

/// Number of items (rows of the label matrix).
pub const N_ITEMS: &str = "n_items";

/// Number of experts (columns of the label matrix).
pub const N_EXPERTS: &str = "n_experts";

/// Mean posterior probability of label 1 over items.
pub const MEAN_POSITIVE: &str = "mean_positive";

/// Responsibilities clamped into the epsilon interior during one E-step.
pub const CLAMPED_RESPONSIBILITIES: &str = "clamped_responsibilities";

/// Clamp bound applied to responsibilities.
pub const EPSILON: &str = "epsilon";

/// Euclidean norm of the ability gradient.
pub const ALPHA_GRAD_NORM: &str = "alpha_grad_norm";

/// Euclidean norm of the log-difficulty gradient.
pub const LOG_BETA_GRAD_NORM: &str = "log_beta_grad_norm";

/// Evidence lower bound value.
pub const LOWER_BOUND: &str = "lower_bound";

/// ELBO variant (`masked` or `full`).
pub const ELBO_VARIANT: &str = "elbo_variant";

/// Whether the computation ran on the rayon pool.
pub const PARALLEL: &str = "parallel";

/// Wall time of one primitive in microseconds.
pub const COMPUTE_TIME_US: &str = "compute_time_us";

/// Every field name above.
pub const ALL: &[&str] = &[
    N_ITEMS,
    N_EXPERTS,
    MEAN_POSITIVE,
    CLAMPED_RESPONSIBILITIES,
    EPSILON,
    ALPHA_GRAD_NORM,
    LOG_BETA_GRAD_NORM,
    LOWER_BOUND,
    ELBO_VARIANT,
    PARALLEL,
    COMPUTE_TIME_US,
];
