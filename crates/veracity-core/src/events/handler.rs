//! DiagnosticsHandler trait with no-op defaults.

use super::types::*;

/// Trait for receiving diagnostics from the inference engine.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about. `Send + Sync` so one handler can
/// serve engines used from several threads.
pub trait DiagnosticsHandler: Send + Sync {
    fn on_posterior_computed(&self, _event: &PosteriorComputedEvent) {}
    fn on_responsibilities_clamped(&self, _event: &ResponsibilitiesClampedEvent) {}
    fn on_gradients_computed(&self, _event: &GradientsComputedEvent) {}
    fn on_lower_bound_evaluated(&self, _event: &LowerBoundEvaluatedEvent) {}
}

/// Handler that forwards every event to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsHandler for TracingDiagnostics {
    fn on_posterior_computed(&self, event: &PosteriorComputedEvent) {
        ::tracing::debug!(
            n_items = event.n_items,
            n_experts = event.n_experts,
            mean_positive = event.mean_positive,
            parallel = event.parallel,
            "posterior computed"
        );
    }

    fn on_responsibilities_clamped(&self, event: &ResponsibilitiesClampedEvent) {
        ::tracing::debug!(
            clamped_responsibilities = event.clamped,
            epsilon = event.epsilon,
            "responsibilities clamped"
        );
    }

    fn on_gradients_computed(&self, event: &GradientsComputedEvent) {
        ::tracing::debug!(
            alpha_grad_norm = event.alpha_grad_norm,
            log_beta_grad_norm = event.log_beta_grad_norm,
            parallel = event.parallel,
            "gradients computed"
        );
    }

    fn on_lower_bound_evaluated(&self, event: &LowerBoundEvaluatedEvent) {
        ::tracing::debug!(
            lower_bound = event.value,
            elbo_variant = %event.variant,
            "lower bound evaluated"
        );
    }
}
