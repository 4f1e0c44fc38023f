//! E-step: posterior over each item's true label.
//!
//! For hypothesis `k`, `gamma_k[j] = ln prior(k) + sum_i ln p(L[j,i] | k)`.
//! The pair is normalized per item with a max-subtracted softmax, then
//! clamped into `[eps, 1 - eps]` so a later `ln(q)` stays finite.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use veracity_core::config::inference_config::{DEFAULT_PRIOR, DEFAULT_RESPONSIBILITY_EPSILON};
use veracity_core::errors::{InferenceError, InferenceResult};

use crate::likelihood::label_log_likelihood;
use crate::parallel::map_indices;
use crate::validation;

/// Interior bound applied to responsibilities by the free functions.
pub const RESPONSIBILITY_EPSILON: f64 = DEFAULT_RESPONSIBILITY_EPSILON;

/// Prior probability that an item's true label is 1.
///
/// Hypothesis `z = 1` is weighted by `p`, hypothesis `z = 0` by `1 - p`.
/// At the default `p = 0.5` both hypotheses carry the same weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prior(f64);

impl Prior {
    /// Validate a prior probability. Must be finite and strictly inside (0, 1).
    pub fn new(p: f64) -> InferenceResult<Self> {
        if p.is_finite() && p > 0.0 && p < 1.0 {
            Ok(Self(p))
        } else {
            Err(InferenceError::InvalidPrior { value: p })
        }
    }

    /// Probability of label 1.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// `ln P(z = hypothesis)`.
    pub fn ln_prob(&self, hypothesis: u8) -> f64 {
        if hypothesis == 1 {
            self.0.ln()
        } else {
            (-self.0).ln_1p()
        }
    }
}

impl Default for Prior {
    fn default() -> Self {
        Self(DEFAULT_PRIOR)
    }
}

/// Result of one E-step, with the number of items whose responsibilities
/// were pulled in from the boundary.
#[derive(Debug, Clone)]
pub(crate) struct EStep {
    pub q: Array2<f64>,
    pub clamped: usize,
}

/// Posterior responsibilities, shape `[2, N]`; column `j` sums to 1.
pub fn posterior(
    alpha: ArrayView1<'_, f64>,
    beta: ArrayView1<'_, f64>,
    labels: ArrayView2<'_, u8>,
    prior: Prior,
) -> InferenceResult<Array2<f64>> {
    posterior_with(alpha, beta, labels, prior, RESPONSIBILITY_EPSILON, false).map(|e| e.q)
}

pub(crate) fn posterior_with(
    alpha: ArrayView1<'_, f64>,
    beta: ArrayView1<'_, f64>,
    labels: ArrayView2<'_, u8>,
    prior: Prior,
    epsilon: f64,
    parallel: bool,
) -> InferenceResult<EStep> {
    let dims = validation::check_inputs(alpha, beta, labels)?;
    let ln_prior = [prior.ln_prob(0), prior.ln_prob(1)];

    let columns = map_indices(dims.n_items, parallel, |j| {
        let b = beta[j];
        let mut gamma = [0.0f64; 2];
        for (i, &label) in labels.row(j).iter().enumerate() {
            let ab = alpha[i] * b;
            gamma[0] += label_log_likelihood(ab, label, 0);
            gamma[1] += label_log_likelihood(ab, label, 1);
        }
        let (g0, g1) = (ln_prior[0] + gamma[0], ln_prior[1] + gamma[1]);
        if g0.max(g1) == f64::NEG_INFINITY {
            // Both hypotheses underflowed; the labels carry no usable ratio.
            normalize_pair(ln_prior[0], ln_prior[1], epsilon)
        } else {
            normalize_pair(g0, g1, epsilon)
        }
    });

    let clamped = columns.iter().filter(|c| c.2).count();
    let q = Array2::from_shape_fn((2, dims.n_items), |(k, j)| {
        if k == 0 {
            columns[j].0
        } else {
            columns[j].1
        }
    });
    Ok(EStep { q, clamped })
}

/// Two-way softmax with max subtraction, then epsilon clamping.
/// Returns `(q0, q1, clamped)`.
fn normalize_pair(g0: f64, g1: f64, epsilon: f64) -> (f64, f64, bool) {
    let m = g0.max(g1);
    let e0 = (g0 - m).exp();
    let e1 = (g1 - m).exp();
    let total = e0 + e1;
    let (q0, q1) = (e0 / total, e1 / total);
    if q0 < epsilon {
        (epsilon, 1.0 - epsilon, true)
    } else if q1 < epsilon {
        (1.0 - epsilon, epsilon, true)
    } else {
        (q0, q1, false)
    }
}

/// Most probable label per item: 1 where `q[1, j] > q[0, j]`, else 0.
pub fn hard_labels(q: ArrayView2<'_, f64>) -> InferenceResult<Array1<u8>> {
    let n_items = q.ncols();
    validation::check_responsibilities(q, n_items)?;
    Ok(Array1::from_shape_fn(n_items, |j| u8::from(q[[1, j]] > q[[0, j]])))
}
