//! Logistic-noise label channel.
//!
//! `ln p(l | z, alpha, beta) = -softplus(-alpha*beta)` when the observed label
//! `l` equals the hypothesis `z`, and `-softplus(alpha*beta)` otherwise.
//! Rows index items, columns index experts; the interaction for entry
//! `(j, i)` is `alpha[i] * beta[j]`.

use ndarray::{Array2, ArrayView1, ArrayView2};
use veracity_core::errors::InferenceResult;

use crate::softplus::softplus;
use crate::validation;

/// Log-likelihood of one observed label given the interaction `ab` and a
/// hypothesized true label.
#[inline]
pub(crate) fn label_log_likelihood(ab: f64, label: u8, hypothesis: u8) -> f64 {
    if label == hypothesis {
        -softplus(-ab)
    } else {
        -softplus(ab)
    }
}

/// Per-(item, expert) log-likelihood matrix under the hypothesis `z`.
///
/// Shapes: `alpha` is `[E]`, `beta` is `[N]`, `labels` is `[N, E]`, `z` is
/// `[N]`. Returns `[N, E]`.
pub fn log_likelihood(
    alpha: ArrayView1<'_, f64>,
    beta: ArrayView1<'_, f64>,
    labels: ArrayView2<'_, u8>,
    z: ArrayView1<'_, u8>,
) -> InferenceResult<Array2<f64>> {
    let dims = validation::check_inputs(alpha, beta, labels)?;
    validation::check_hypothesis(z, dims.n_items)?;
    Ok(Array2::from_shape_fn(
        (dims.n_items, dims.n_experts),
        |(j, i)| label_log_likelihood(alpha[i] * beta[j], labels[[j, i]], z[j]),
    ))
}

/// Outer product of abilities and difficulties, `[N, E]` with entry
/// `alpha[i] * beta[j]`.
pub fn interaction(alpha: ArrayView1<'_, f64>, beta: ArrayView1<'_, f64>) -> Array2<f64> {
    Array2::from_shape_fn((beta.len(), alpha.len()), |(j, i)| alpha[i] * beta[j])
}
