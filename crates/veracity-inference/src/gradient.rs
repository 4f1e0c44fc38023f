//! M-step: gradients of the expected lower bound.
//!
//! Both gradients share one intermediate, the responsibility-weighted
//! sigmoid term per (item, expert):
//!
//! ```text
//! t0[j,i] = [L=0]·σ(-αβ) − [L=1]·σ(αβ)
//! t1[j,i] = [L=1]·σ(-αβ) − [L=0]·σ(αβ)
//! c[j,i]  = t0[j,i]·q[0,j] + t1[j,i]·q[1,j]
//! ```
//!
//! The ability gradient reduces `c·β` over items. The log-difficulty
//! gradient reduces `c·α` over experts and multiplies by `β` (chain rule
//! through `β = exp(log β)`).

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use veracity_core::errors::InferenceResult;

use crate::parallel::map_indices;
use crate::softplus::sigmoid;
use crate::validation;

/// Gradients of the lower bound with respect to abilities (`[E]`) and log
/// difficulties (`[N]`).
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub alpha: Array1<f64>,
    pub log_beta: Array1<f64>,
}

impl Gradients {
    /// Euclidean norm of the ability gradient.
    pub fn alpha_norm(&self) -> f64 {
        self.alpha.dot(&self.alpha).sqrt()
    }

    /// Euclidean norm of the log-difficulty gradient.
    pub fn log_beta_norm(&self) -> f64 {
        self.log_beta.dot(&self.log_beta).sqrt()
    }
}

/// Gradient with respect to each expert's ability, shape `[E]`.
pub fn alpha_grad(
    alpha: ArrayView1<'_, f64>,
    beta: ArrayView1<'_, f64>,
    labels: ArrayView2<'_, u8>,
    q: ArrayView2<'_, f64>,
) -> InferenceResult<Array1<f64>> {
    alpha_grad_with(alpha, beta, labels, q, false)
}

/// Gradient with respect to each item's log difficulty, shape `[N]`.
pub fn logbeta_grad(
    alpha: ArrayView1<'_, f64>,
    beta: ArrayView1<'_, f64>,
    labels: ArrayView2<'_, u8>,
    q: ArrayView2<'_, f64>,
) -> InferenceResult<Array1<f64>> {
    logbeta_grad_with(alpha, beta, labels, q, false)
}

/// Both gradients from a single pass over the sigmoid terms.
pub fn gradients(
    alpha: ArrayView1<'_, f64>,
    beta: ArrayView1<'_, f64>,
    labels: ArrayView2<'_, u8>,
    q: ArrayView2<'_, f64>,
) -> InferenceResult<Gradients> {
    gradients_with(alpha, beta, labels, q, false)
}

pub(crate) fn alpha_grad_with(
    alpha: ArrayView1<'_, f64>,
    beta: ArrayView1<'_, f64>,
    labels: ArrayView2<'_, u8>,
    q: ArrayView2<'_, f64>,
    parallel: bool,
) -> InferenceResult<Array1<f64>> {
    let terms = weighted_terms(alpha, beta, labels, q, parallel)?;
    Ok(reduce_alpha(terms.view(), beta, parallel))
}

pub(crate) fn logbeta_grad_with(
    alpha: ArrayView1<'_, f64>,
    beta: ArrayView1<'_, f64>,
    labels: ArrayView2<'_, u8>,
    q: ArrayView2<'_, f64>,
    parallel: bool,
) -> InferenceResult<Array1<f64>> {
    let terms = weighted_terms(alpha, beta, labels, q, parallel)?;
    Ok(reduce_log_beta(terms.view(), alpha, beta, parallel))
}

pub(crate) fn gradients_with(
    alpha: ArrayView1<'_, f64>,
    beta: ArrayView1<'_, f64>,
    labels: ArrayView2<'_, u8>,
    q: ArrayView2<'_, f64>,
    parallel: bool,
) -> InferenceResult<Gradients> {
    let terms = weighted_terms(alpha, beta, labels, q, parallel)?;
    Ok(Gradients {
        alpha: reduce_alpha(terms.view(), beta, parallel),
        log_beta: reduce_log_beta(terms.view(), alpha, beta, parallel),
    })
}

/// `c[j,i] = t0[j,i]·q[0,j] + t1[j,i]·q[1,j]`, shape `[N, E]`.
fn weighted_terms(
    alpha: ArrayView1<'_, f64>,
    beta: ArrayView1<'_, f64>,
    labels: ArrayView2<'_, u8>,
    q: ArrayView2<'_, f64>,
    parallel: bool,
) -> InferenceResult<Array2<f64>> {
    let dims = validation::check_inputs(alpha, beta, labels)?;
    validation::check_responsibilities(q, dims.n_items)?;

    let rows = map_indices(dims.n_items, parallel, |j| {
        let (q0, q1) = (q[[0, j]], q[[1, j]]);
        labels
            .row(j)
            .iter()
            .zip(alpha.iter())
            .map(|(&label, &a)| {
                let ab = a * beta[j];
                let agree = sigmoid(-ab);
                let disagree = sigmoid(ab);
                let (t0, t1) = if label == 0 {
                    (agree, -disagree)
                } else {
                    (-disagree, agree)
                };
                t0 * q0 + t1 * q1
            })
            .collect::<Vec<f64>>()
    });

    let mut terms = Array2::zeros((dims.n_items, dims.n_experts));
    for (mut out, row) in terms.axis_iter_mut(Axis(0)).zip(rows) {
        out.assign(&Array1::from(row));
    }
    Ok(terms)
}

/// `grad[i] = sum_j c[j,i]·β[j]`, reduced over items.
fn reduce_alpha(
    terms: ArrayView2<'_, f64>,
    beta: ArrayView1<'_, f64>,
    parallel: bool,
) -> Array1<f64> {
    Array1::from(map_indices(terms.ncols(), parallel, |i| {
        terms
            .column(i)
            .iter()
            .zip(beta.iter())
            .map(|(c, b)| c * b)
            .sum::<f64>()
    }))
}

/// `grad[j] = β[j] · sum_i c[j,i]·α[i]`, reduced over experts.
fn reduce_log_beta(
    terms: ArrayView2<'_, f64>,
    alpha: ArrayView1<'_, f64>,
    beta: ArrayView1<'_, f64>,
    parallel: bool,
) -> Array1<f64> {
    Array1::from(map_indices(terms.nrows(), parallel, |j| {
        let inner = terms
            .row(j)
            .iter()
            .zip(alpha.iter())
            .map(|(c, a)| c * a)
            .sum::<f64>();
        inner * beta[j]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use veracity_core::errors::InferenceError;

    #[test]
    fn test_output_shapes_follow_parameters() {
        let alpha = array![1.0, 0.5];
        let beta = array![1.0, 2.0, 0.5];
        let labels = array![[1u8, 1], [0, 0], [1, 0]];
        let q = array![[0.2, 0.7, 0.5], [0.8, 0.3, 0.5]];
        let g = gradients(alpha.view(), beta.view(), labels.view(), q.view()).unwrap();
        assert_eq!(g.alpha.len(), 2);
        assert_eq!(g.log_beta.len(), 3);
    }

    #[test]
    fn test_separate_and_combined_agree() {
        let alpha = array![1.0, -0.5, 2.0];
        let beta = array![1.0, 2.0];
        let labels = array![[1u8, 0, 1], [0, 0, 1]];
        let q = array![[0.3, 0.6], [0.7, 0.4]];
        let g = gradients(alpha.view(), beta.view(), labels.view(), q.view()).unwrap();
        let a = alpha_grad(alpha.view(), beta.view(), labels.view(), q.view()).unwrap();
        let b = logbeta_grad(alpha.view(), beta.view(), labels.view(), q.view()).unwrap();
        assert_eq!(g.alpha, a);
        assert_eq!(g.log_beta, b);
    }

    #[test]
    fn test_single_entry_closed_form() {
        // One item, one expert, label 1, certain z = 1: d/dα of -softplus(-αβ)
        // is β·σ(-αβ).
        let alpha = array![0.8];
        let beta = array![1.5];
        let labels = array![[1u8]];
        let q = array![[0.0], [1.0]];
        let g = gradients(alpha.view(), beta.view(), labels.view(), q.view()).unwrap();
        let expected = 1.5 * sigmoid(-1.2);
        assert!((g.alpha[0] - expected).abs() < 1e-15);
        assert!((g.log_beta[0] - 1.5 * 0.8 * sigmoid(-1.2)).abs() < 1e-15);
    }

    #[test]
    fn test_parallel_matches_sequential_bitwise() {
        let alpha = array![1.0, -0.5, 2.0, 0.1];
        let beta = array![1.0, 2.0, 0.3];
        let labels = array![[1u8, 0, 1, 1], [0, 0, 1, 0], [1, 1, 1, 0]];
        let q = array![[0.3, 0.6, 0.1], [0.7, 0.4, 0.9]];
        let seq = gradients_with(alpha.view(), beta.view(), labels.view(), q.view(), false)
            .unwrap();
        let par = gradients_with(alpha.view(), beta.view(), labels.view(), q.view(), true)
            .unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_responsibility_shape_checked() {
        let alpha = array![1.0];
        let beta = array![1.0, 1.0];
        let labels = array![[1u8], [0]];
        let q = array![[0.5, 0.5, 0.5], [0.5, 0.5, 0.5]];
        let err = alpha_grad(alpha.view(), beta.view(), labels.view(), q.view()).unwrap_err();
        assert!(matches!(err, InferenceError::ShapeMismatch { what: "q", .. }));
    }
}
