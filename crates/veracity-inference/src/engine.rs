use std::sync::Arc;
use std::time::Instant;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use tracing::debug_span;
use veracity_core::config::{ElboVariant, InferenceConfig, VeracityConfig};
use veracity_core::errors::InferenceResult;
use veracity_core::events::{
    DiagnosticsHandler, EventDispatcher, GradientsComputedEvent, LowerBoundEvaluatedEvent,
    PosteriorComputedEvent, ResponsibilitiesClampedEvent,
};

use crate::gradient::{self, Gradients};
use crate::likelihood;
use crate::lower_bound;
use crate::posterior::{self, Prior};
use crate::validation;

/// Inference engine carrying the prior, the responsibility epsilon, the
/// reported ELBO variant and the parallelism threshold, with an opt-in
/// diagnostics hook.
///
/// The engine holds no model state. Abilities and difficulties belong to the
/// caller's optimizer and are passed into every call.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    prior: Prior,
    epsilon: f64,
    elbo_variant: ElboVariant,
    parallel_min_items: usize,
    diagnostics_enabled: bool,
    log_spans: bool,
    dispatcher: EventDispatcher,
}

impl InferenceEngine {
    /// Create an engine with compiled defaults and diagnostics disabled.
    pub fn new() -> Self {
        let defaults = InferenceConfig::default();
        Self {
            prior: Prior::default(),
            epsilon: defaults.effective_responsibility_epsilon(),
            elbo_variant: defaults.effective_elbo_variant(),
            parallel_min_items: defaults.effective_parallel_min_items(),
            diagnostics_enabled: false,
            log_spans: false,
            dispatcher: EventDispatcher::new(),
        }
    }

    /// Create an engine from a resolved configuration. The prior and the
    /// responsibility epsilon are checked here, so a hand-built config cannot
    /// reach the primitives with an empty clamp interval.
    pub fn from_config(config: &VeracityConfig) -> InferenceResult<Self> {
        let inference = &config.inference;
        Ok(Self {
            prior: Prior::new(inference.effective_prior())?,
            epsilon: validation::check_epsilon(inference.effective_responsibility_epsilon())?,
            elbo_variant: inference.effective_elbo_variant(),
            parallel_min_items: inference.effective_parallel_min_items().max(1),
            diagnostics_enabled: config.diagnostics.effective_enabled(),
            log_spans: config.diagnostics.effective_log_spans(),
            dispatcher: EventDispatcher::new(),
        })
    }

    pub fn with_prior(mut self, prior: Prior) -> Self {
        self.prior = prior;
        self
    }

    pub fn with_elbo_variant(mut self, variant: ElboVariant) -> Self {
        self.elbo_variant = variant;
        self
    }

    pub fn with_parallel_min_items(mut self, min_items: usize) -> Self {
        self.parallel_min_items = min_items.max(1);
        self
    }

    /// Turn diagnostics on or off. Handlers only fire while enabled.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics_enabled = enabled;
        self
    }

    /// Register a diagnostics handler.
    pub fn register_handler(&mut self, handler: Arc<dyn DiagnosticsHandler>) {
        self.dispatcher.register(handler);
    }

    pub fn prior(&self) -> Prior {
        self.prior
    }

    pub fn responsibility_epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn elbo_variant(&self) -> ElboVariant {
        self.elbo_variant
    }

    pub fn diagnostics_enabled(&self) -> bool {
        self.diagnostics_enabled
    }

    /// Per-(item, expert) log-likelihood under hypothesis `z`.
    pub fn log_likelihood(
        &self,
        alpha: ArrayView1<'_, f64>,
        beta: ArrayView1<'_, f64>,
        labels: ArrayView2<'_, u8>,
        z: ArrayView1<'_, u8>,
    ) -> InferenceResult<Array2<f64>> {
        likelihood::log_likelihood(alpha, beta, labels, z)
    }

    /// E-step under the engine's prior and epsilon.
    pub fn posterior(
        &self,
        alpha: ArrayView1<'_, f64>,
        beta: ArrayView1<'_, f64>,
        labels: ArrayView2<'_, u8>,
    ) -> InferenceResult<Array2<f64>> {
        let parallel = self.use_parallel(beta.len());
        let _span = self.span_enabled().then(|| {
            debug_span!("posterior", n_items = beta.len(), n_experts = alpha.len(), parallel)
                .entered()
        });
        let start = self.emitting().then(Instant::now);
        let step =
            posterior::posterior_with(alpha, beta, labels, self.prior, self.epsilon, parallel)?;

        if let Some(start) = start {
            let n_items = step.q.ncols();
            let mean_positive = if n_items == 0 {
                0.0
            } else {
                step.q.row(1).sum() / n_items as f64
            };
            if step.clamped > 0 {
                self.dispatcher
                    .emit_responsibilities_clamped(&ResponsibilitiesClampedEvent {
                        clamped: step.clamped,
                        epsilon: self.epsilon,
                    });
            }
            self.dispatcher.emit_posterior_computed(&PosteriorComputedEvent {
                n_items,
                n_experts: alpha.len(),
                mean_positive,
                parallel,
            });
            tracing::trace!(compute_time_us = start.elapsed().as_micros() as u64, "e-step done");
        }
        Ok(step.q)
    }

    /// Both M-step gradients.
    pub fn gradients(
        &self,
        alpha: ArrayView1<'_, f64>,
        beta: ArrayView1<'_, f64>,
        labels: ArrayView2<'_, u8>,
        q: ArrayView2<'_, f64>,
    ) -> InferenceResult<Gradients> {
        let parallel = self.use_parallel(beta.len());
        let _span = self.span_enabled().then(|| {
            debug_span!("gradients", n_items = beta.len(), n_experts = alpha.len(), parallel)
                .entered()
        });
        let grads = gradient::gradients_with(alpha, beta, labels, q, parallel)?;

        if self.emitting() {
            self.dispatcher.emit_gradients_computed(&GradientsComputedEvent {
                alpha_grad_norm: grads.alpha_norm(),
                log_beta_grad_norm: grads.log_beta_norm(),
                parallel,
            });
        }
        Ok(grads)
    }

    /// Gradient with respect to abilities only. Emits no gradient event;
    /// use [`Self::gradients`] for the combined pass with both norms.
    pub fn alpha_grad(
        &self,
        alpha: ArrayView1<'_, f64>,
        beta: ArrayView1<'_, f64>,
        labels: ArrayView2<'_, u8>,
        q: ArrayView2<'_, f64>,
    ) -> InferenceResult<Array1<f64>> {
        let parallel = self.use_parallel(beta.len());
        let _span = self.span_enabled().then(|| {
            debug_span!("alpha_grad", n_items = beta.len(), n_experts = alpha.len(), parallel)
                .entered()
        });
        gradient::alpha_grad_with(alpha, beta, labels, q, parallel)
    }

    /// Gradient with respect to log difficulties only. Emits no gradient event.
    pub fn logbeta_grad(
        &self,
        alpha: ArrayView1<'_, f64>,
        beta: ArrayView1<'_, f64>,
        labels: ArrayView2<'_, u8>,
        q: ArrayView2<'_, f64>,
    ) -> InferenceResult<Array1<f64>> {
        let parallel = self.use_parallel(beta.len());
        let _span = self.span_enabled().then(|| {
            debug_span!("logbeta_grad", n_items = beta.len(), n_experts = alpha.len(), parallel)
                .entered()
        });
        gradient::logbeta_grad_with(alpha, beta, labels, q, parallel)
    }

    /// Lower bound of the configured variant.
    pub fn lower_bound(
        &self,
        alpha: ArrayView1<'_, f64>,
        beta: ArrayView1<'_, f64>,
        labels: ArrayView2<'_, u8>,
        q: ArrayView2<'_, f64>,
    ) -> InferenceResult<f64> {
        let parallel = self.use_parallel(beta.len());
        let _span = self.span_enabled().then(|| {
            debug_span!("lower_bound", elbo_variant = %self.elbo_variant, parallel).entered()
        });
        let value = lower_bound::lower_bound_with(
            alpha,
            beta,
            labels,
            q,
            self.elbo_variant,
            self.prior,
            self.epsilon,
            parallel,
        )?;

        if self.emitting() {
            self.dispatcher
                .emit_lower_bound_evaluated(&LowerBoundEvaluatedEvent {
                    value,
                    variant: self.elbo_variant,
                });
        }
        Ok(value)
    }

    fn use_parallel(&self, n_items: usize) -> bool {
        n_items >= self.parallel_min_items
    }

    fn emitting(&self) -> bool {
        self.diagnostics_enabled && !self.dispatcher.is_empty()
    }

    fn span_enabled(&self) -> bool {
        self.diagnostics_enabled && self.log_spans
    }
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new()
    }
}
