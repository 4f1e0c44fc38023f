//! Evidence lower bound for convergence monitoring.
//!
//! Two variants:
//!
//! - [`lower_bound`] (masked). Per item and hypothesis `k`, only the
//!   experts whose observed label equals `k` contribute their log-likelihood.
//!   The entropy enters as `-ln q`, not weighted by `q`. Monotone across EM
//!   iterations only approximately, and not the objective the gradients in
//!   [`crate::gradient`] differentiate.
//! - [`expected_lower_bound`] (full). Expected complete-data log-likelihood
//!   over all experts, plus the prior term, plus the entropy `-q ln q`. The
//!   gradients are its exact derivatives, and an exact E-step followed by a
//!   small gradient step never decreases it.
//!
//! Both clamp `q` into `[eps, 1 - eps]` before taking its logarithm.

use ndarray::{ArrayView1, ArrayView2};
use veracity_core::config::ElboVariant;
use veracity_core::errors::InferenceResult;

use crate::likelihood::label_log_likelihood;
use crate::parallel::map_indices;
use crate::posterior::{Prior, RESPONSIBILITY_EPSILON};
use crate::validation;

/// Masked lower bound with the default epsilon.
pub fn lower_bound(
    alpha: ArrayView1<'_, f64>,
    beta: ArrayView1<'_, f64>,
    labels: ArrayView2<'_, u8>,
    q: ArrayView2<'_, f64>,
) -> InferenceResult<f64> {
    lower_bound_with(
        alpha,
        beta,
        labels,
        q,
        ElboVariant::Masked,
        Prior::default(),
        RESPONSIBILITY_EPSILON,
        false,
    )
}

/// Full expected lower bound under `prior`, with the default epsilon.
pub fn expected_lower_bound(
    alpha: ArrayView1<'_, f64>,
    beta: ArrayView1<'_, f64>,
    labels: ArrayView2<'_, u8>,
    q: ArrayView2<'_, f64>,
    prior: Prior,
) -> InferenceResult<f64> {
    lower_bound_with(
        alpha,
        beta,
        labels,
        q,
        ElboVariant::Full,
        prior,
        RESPONSIBILITY_EPSILON,
        false,
    )
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn lower_bound_with(
    alpha: ArrayView1<'_, f64>,
    beta: ArrayView1<'_, f64>,
    labels: ArrayView2<'_, u8>,
    q: ArrayView2<'_, f64>,
    variant: ElboVariant,
    prior: Prior,
    epsilon: f64,
    parallel: bool,
) -> InferenceResult<f64> {
    let dims = validation::check_inputs(alpha, beta, labels)?;
    validation::check_responsibilities(q, dims.n_items)?;
    let ln_prior = [prior.ln_prob(0), prior.ln_prob(1)];
    let ln_q = |v: f64| v.clamp(epsilon, 1.0 - epsilon).ln();

    let per_item = map_indices(dims.n_items, parallel, |j| {
        let b = beta[j];
        let q_j = [q[[0, j]], q[[1, j]]];
        let row = labels.row(j);
        match variant {
            ElboVariant::Masked => {
                let mut agreeing = [0.0f64; 2];
                for (i, &label) in row.iter().enumerate() {
                    let k = usize::from(label);
                    agreeing[k] += label_log_likelihood(alpha[i] * b, label, label);
                }
                (0..2)
                    .map(|k| q_j[k] * agreeing[k] - ln_q(q_j[k]))
                    .sum::<f64>()
            }
            ElboVariant::Full => {
                let mut expected = [ln_prior[0], ln_prior[1]];
                for (i, &label) in row.iter().enumerate() {
                    let ab = alpha[i] * b;
                    expected[0] += label_log_likelihood(ab, label, 0);
                    expected[1] += label_log_likelihood(ab, label, 1);
                }
                (0..2)
                    .map(|k| q_j[k] * (expected[k] - ln_q(q_j[k])))
                    .sum::<f64>()
            }
        }
    });

    Ok(per_item.into_iter().sum())
}
