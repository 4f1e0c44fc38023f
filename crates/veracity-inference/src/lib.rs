//! # veracity-inference
//!
//! Variational EM primitives for a logistic-noise crowd labeling model.
//! Experts have an ability `alpha`, items a difficulty `beta` and a latent
//! binary truth `z`; expert `i` reports item `j`'s truth correctly with
//! probability `sigmoid(alpha[i] * beta[j])`.
//!
//! An external optimizer calls, per iteration:
//! [`posterior`] (E-step) → [`lower_bound`] (optional, for monitoring) →
//! [`gradients`] (M-step) → its own update of `alpha` and `ln beta`.
//!
//! Shapes: `alpha: [E]`, `beta: [N]`, `labels: [N, E]` with entries in
//! {0, 1}, responsibilities `q: [2, N]`.

pub mod engine;
pub mod gradient;
pub mod likelihood;
pub mod lower_bound;
pub mod posterior;
pub mod softplus;

mod parallel;
mod validation;

pub use engine::InferenceEngine;
pub use gradient::{alpha_grad, gradients, logbeta_grad, Gradients};
pub use likelihood::{interaction, log_likelihood};
pub use lower_bound::{expected_lower_bound, lower_bound};
pub use posterior::{hard_labels, posterior, Prior, RESPONSIBILITY_EPSILON};
pub use softplus::{sigmoid, softplus, softplus_array, SOFTPLUS_CUTOFF};
pub use veracity_core::config::ElboVariant;
pub use veracity_core::errors::{InferenceError, InferenceResult};
