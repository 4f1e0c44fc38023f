//! Input checks shared by the public primitives.

use ndarray::{ArrayView1, ArrayView2};
use veracity_core::errors::{InferenceError, InferenceResult};

/// Dimensions of a consistent (alpha, beta, labels) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Dims {
    pub n_items: usize,
    pub n_experts: usize,
}

/// Check that `labels` is `beta.len() x alpha.len()`, that every label is 0
/// or 1, and that both parameter vectors and their products are finite.
pub(crate) fn check_inputs(
    alpha: ArrayView1<'_, f64>,
    beta: ArrayView1<'_, f64>,
    labels: ArrayView2<'_, u8>,
) -> InferenceResult<Dims> {
    let expected = (beta.len(), alpha.len());
    if labels.dim() != expected {
        return Err(InferenceError::matrix_mismatch("labels", expected, labels.dim()));
    }
    check_finite("alpha", alpha)?;
    check_finite("beta", beta)?;
    check_interaction(alpha, beta)?;
    if let Some(((j, i), &value)) = labels.indexed_iter().find(|(_, &v)| v > 1) {
        return Err(InferenceError::InvalidLabel {
            what: "labels",
            position: format!("[{j}, {i}]"),
            value,
        });
    }
    Ok(Dims {
        n_items: expected.0,
        n_experts: expected.1,
    })
}

/// Check that a responsibility clamp bound leaves `[eps, 1 - eps]` non-empty.
pub(crate) fn check_epsilon(epsilon: f64) -> InferenceResult<f64> {
    if epsilon.is_finite() && epsilon > 0.0 && epsilon < 0.5 {
        Ok(epsilon)
    } else {
        Err(InferenceError::InvalidEpsilon { value: epsilon })
    }
}

/// Check a per-item hypothesis vector.
pub(crate) fn check_hypothesis(z: ArrayView1<'_, u8>, n_items: usize) -> InferenceResult<()> {
    if z.len() != n_items {
        return Err(InferenceError::length_mismatch("z", n_items, z.len()));
    }
    if let Some((j, &value)) = z.indexed_iter().find(|(_, &v)| v > 1) {
        return Err(InferenceError::InvalidLabel {
            what: "z",
            position: format!("[{j}]"),
            value,
        });
    }
    Ok(())
}

/// Check that `q` is `2 x n_items` and finite.
pub(crate) fn check_responsibilities(
    q: ArrayView2<'_, f64>,
    n_items: usize,
) -> InferenceResult<()> {
    if q.dim() != (2, n_items) {
        return Err(InferenceError::matrix_mismatch("q", (2, n_items), q.dim()));
    }
    if let Some((index, &value)) = q.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(InferenceError::NonFiniteParameter {
            what: "q",
            index,
            value,
        });
    }
    Ok(())
}

/// Every `|alpha[i] * beta[j]|` is bounded by the product of the two largest
/// magnitudes, so checking that one product covers the whole matrix.
fn check_interaction(
    alpha: ArrayView1<'_, f64>,
    beta: ArrayView1<'_, f64>,
) -> InferenceResult<()> {
    let (Some(expert), Some(item)) = (argmax_abs(alpha), argmax_abs(beta)) else {
        return Ok(());
    };
    if (alpha[expert] * beta[item]).is_finite() {
        Ok(())
    } else {
        Err(InferenceError::InteractionOverflow { expert, item })
    }
}

fn argmax_abs(values: ArrayView1<'_, f64>) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
        .map(|(index, _)| index)
}

fn check_finite(what: &'static str, values: ArrayView1<'_, f64>) -> InferenceResult<()> {
    match values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(InferenceError::NonFiniteParameter { what, index, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_consistent_inputs() {
        let alpha = array![1.0, 2.0];
        let beta = array![1.0, 1.0, 1.0];
        let labels = array![[0u8, 1], [1, 1], [0, 0]];
        let dims = check_inputs(alpha.view(), beta.view(), labels.view()).unwrap();
        assert_eq!(dims, Dims { n_items: 3, n_experts: 2 });
    }

    #[test]
    fn test_transposed_labels_rejected() {
        let alpha = array![1.0, 2.0];
        let beta = array![1.0, 1.0, 1.0];
        let labels = array![[0u8, 1, 1], [1, 0, 0]];
        let err = check_inputs(alpha.view(), beta.view(), labels.view()).unwrap_err();
        assert!(matches!(err, InferenceError::ShapeMismatch { what: "labels", .. }));
    }

    #[test]
    fn test_label_out_of_range_reports_position() {
        let alpha = array![1.0, 2.0];
        let beta = array![1.0];
        let labels = array![[0u8, 2]];
        let err = check_inputs(alpha.view(), beta.view(), labels.view()).unwrap_err();
        assert_eq!(
            err,
            InferenceError::InvalidLabel {
                what: "labels",
                position: "[0, 1]".to_string(),
                value: 2,
            }
        );
    }

    #[test]
    fn test_nan_ability_rejected() {
        let alpha = array![1.0, f64::NAN];
        let beta = array![1.0];
        let labels = array![[0u8, 1]];
        let err = check_inputs(alpha.view(), beta.view(), labels.view()).unwrap_err();
        assert!(matches!(
            err,
            InferenceError::NonFiniteParameter { what: "alpha", index: 1, .. }
        ));
    }

    #[test]
    fn test_overflowing_interaction_rejected() {
        let alpha = array![1.0, 1e200, -1e200];
        let beta = array![0.5, 1e200];
        let labels = array![[1u8, 1, 1], [1, 1, 1]];
        let err = check_inputs(alpha.view(), beta.view(), labels.view()).unwrap_err();
        assert_eq!(err, InferenceError::InteractionOverflow { expert: 2, item: 1 });

        // Large but representable products pass.
        let beta = array![0.5, 1e100];
        assert!(check_inputs(alpha.view(), beta.view(), labels.view()).is_ok());
    }

    #[test]
    fn test_epsilon_bounds() {
        assert_eq!(check_epsilon(1e-12), Ok(1e-12));
        for bad in [0.0, 0.5, 0.7, -1e-9, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                check_epsilon(bad),
                Err(InferenceError::InvalidEpsilon { .. })
            ));
        }
    }

    #[test]
    fn test_responsibility_shape() {
        let q = array![[0.5, 0.5], [0.5, 0.5]];
        assert!(check_responsibilities(q.view(), 2).is_ok());
        assert!(check_responsibilities(q.view(), 3).is_err());
        assert!(check_responsibilities(q.t(), 2).is_ok());
        let q3 = array![[0.5], [0.5], [0.0]];
        assert!(check_responsibilities(q3.view(), 1).is_err());
    }

    #[test]
    fn test_hypothesis_checks() {
        let z = array![0u8, 1, 3];
        assert!(matches!(
            check_hypothesis(z.view(), 3),
            Err(InferenceError::InvalidLabel { what: "z", .. })
        ));
        assert!(matches!(
            check_hypothesis(z.view(), 2),
            Err(InferenceError::ShapeMismatch { what: "z", .. })
        ));
    }
}
