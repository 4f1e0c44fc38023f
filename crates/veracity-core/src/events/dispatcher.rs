//! EventDispatcher: synchronous dispatch, zero overhead when empty.

use std::sync::Arc;

use super::handler::DiagnosticsHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn DiagnosticsHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler.
    pub fn register(&mut self, handler: Arc<dyn DiagnosticsHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler does not prevent later handlers from running.
    fn emit<F: Fn(&dyn DiagnosticsHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                ::tracing::warn!("diagnostics handler panicked; continuing");
            }
        }
    }

    pub fn emit_posterior_computed(&self, event: &PosteriorComputedEvent) {
        self.emit(|h| h.on_posterior_computed(event));
    }

    pub fn emit_responsibilities_clamped(&self, event: &ResponsibilitiesClampedEvent) {
        self.emit(|h| h.on_responsibilities_clamped(event));
    }

    pub fn emit_gradients_computed(&self, event: &GradientsComputedEvent) {
        self.emit(|h| h.on_gradients_computed(event));
    }

    pub fn emit_lower_bound_evaluated(&self, event: &LowerBoundEvaluatedEvent) {
        self.emit(|h| h.on_lower_bound_evaluated(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
