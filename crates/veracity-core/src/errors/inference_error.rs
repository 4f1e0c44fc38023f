//! Inference errors: malformed inputs to the EM primitives.
//!
//! Numeric degeneracy (responsibilities underflowing to 0 or 1) is not an
//! error. It is clamped deterministically and reported to diagnostics.

use super::error_code::{self, VeracityErrorCode};

/// Result alias for the inference primitives.
pub type InferenceResult<T> = Result<T, InferenceError>;

/// Errors returned by the inference primitives.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    /// Two inputs disagree on a dimension, e.g. the label matrix has a
    /// different row count than `beta` has entries.
    #[error("Shape mismatch for {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: String,
        actual: String,
    },

    /// A label or hypothesis outside {0, 1}.
    #[error("Invalid label in {what} at {position}: {value} (expected 0 or 1)")]
    InvalidLabel {
        what: &'static str,
        position: String,
        value: u8,
    },

    #[error("Invalid prior {value}: must be finite and strictly between 0 and 1")]
    InvalidPrior { value: f64 },

    /// Responsibility clamp bound outside (0, 0.5), which would leave
    /// `[eps, 1 - eps]` empty.
    #[error("Invalid responsibility epsilon {value}: must be strictly between 0 and 0.5")]
    InvalidEpsilon { value: f64 },

    #[error("Non-finite value in {what} at index {index}: {value}")]
    NonFiniteParameter {
        what: &'static str,
        index: usize,
        value: f64,
    },

    /// Finite parameters whose product `alpha[expert] * beta[item]` is not.
    #[error("Interaction alpha[{expert}] * beta[{item}] overflows f64")]
    InteractionOverflow { expert: usize, item: usize },
}

impl InferenceError {
    /// Shape mismatch between a one-dimensional input and its expected length.
    pub fn length_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            what,
            expected: format!("length {expected}"),
            actual: format!("length {actual}"),
        }
    }

    /// Shape mismatch between a matrix input and its expected dimensions.
    pub fn matrix_mismatch(
        what: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Self {
        Self::ShapeMismatch {
            what,
            expected: format!("{}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }
}

impl VeracityErrorCode for InferenceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ShapeMismatch { .. } => error_code::SHAPE_MISMATCH,
            Self::InvalidLabel { .. } => error_code::INVALID_LABEL,
            Self::InvalidPrior { .. } => error_code::INVALID_PRIOR,
            Self::InvalidEpsilon { .. } => error_code::INVALID_EPSILON,
            Self::NonFiniteParameter { .. } | Self::InteractionOverflow { .. } => {
                error_code::NON_FINITE_PARAMETER
            }
        }
    }
}
