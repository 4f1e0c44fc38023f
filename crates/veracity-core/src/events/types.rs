//! Event payload types for diagnostics.

use crate::config::ElboVariant;

/// Payload for `on_posterior_computed`.
#[derive(Debug, Clone)]
pub struct PosteriorComputedEvent {
    pub n_items: usize,
    pub n_experts: usize,
    /// Mean of `q[1, j]` over items.
    pub mean_positive: f64,
    pub parallel: bool,
}

/// Payload for `on_responsibilities_clamped`.
#[derive(Debug, Clone)]
pub struct ResponsibilitiesClampedEvent {
    /// Number of items whose responsibilities hit the epsilon bound.
    pub clamped: usize,
    pub epsilon: f64,
}

/// Payload for `on_gradients_computed`.
#[derive(Debug, Clone)]
pub struct GradientsComputedEvent {
    pub alpha_grad_norm: f64,
    pub log_beta_grad_norm: f64,
    pub parallel: bool,
}

/// Payload for `on_lower_bound_evaluated`.
#[derive(Debug, Clone)]
pub struct LowerBoundEvaluatedEvent {
    pub value: f64,
    pub variant: ElboVariant,
}
