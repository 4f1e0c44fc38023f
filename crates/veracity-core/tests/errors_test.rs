//! Tests for error codes and messages.

use veracity_core::errors::error_code;
use veracity_core::errors::{ConfigError, InferenceError};
use veracity_core::VeracityErrorCode;

#[test]
fn test_inference_error_codes() {
    let cases = [
        (
            InferenceError::length_mismatch("z", 3, 2),
            error_code::SHAPE_MISMATCH,
        ),
        (
            InferenceError::InvalidLabel {
                what: "labels",
                position: "[0, 1]".to_string(),
                value: 7,
            },
            error_code::INVALID_LABEL,
        ),
        (
            InferenceError::InvalidPrior { value: 1.2 },
            error_code::INVALID_PRIOR,
        ),
        (
            InferenceError::InvalidEpsilon { value: 0.7 },
            error_code::INVALID_EPSILON,
        ),
        (
            InferenceError::InteractionOverflow { expert: 0, item: 2 },
            error_code::NON_FINITE_PARAMETER,
        ),
        (
            InferenceError::NonFiniteParameter {
                what: "beta",
                index: 4,
                value: f64::INFINITY,
            },
            error_code::NON_FINITE_PARAMETER,
        ),
    ];
    for (err, code) in cases {
        assert_eq!(err.error_code(), code);
        assert!(err.coded_string().starts_with(&format!("[{code}] ")));
    }
}

#[test]
fn test_shape_mismatch_messages() {
    let err = InferenceError::length_mismatch("z", 3, 2);
    assert_eq!(
        err.to_string(),
        "Shape mismatch for z: expected length 3, got length 2"
    );
    let err = InferenceError::matrix_mismatch("q", (2, 5), (5, 2));
    assert_eq!(err.to_string(), "Shape mismatch for q: expected 2x5, got 5x2");
}

#[test]
fn test_invalid_label_message_names_position() {
    let err = InferenceError::InvalidLabel {
        what: "labels",
        position: "[2, 0]".to_string(),
        value: 3,
    };
    assert_eq!(
        err.to_string(),
        "Invalid label in labels at [2, 0]: 3 (expected 0 or 1)"
    );
}

#[test]
fn test_overflow_message_names_both_indices() {
    let err = InferenceError::InteractionOverflow { expert: 1, item: 4 };
    assert_eq!(err.to_string(), "Interaction alpha[1] * beta[4] overflows f64");
}

#[test]
fn test_config_errors_share_one_code() {
    let errors = [
        ConfigError::FileNotFound {
            path: "veracity.toml".to_string(),
        },
        ConfigError::ValidationFailed {
            field: "inference.prior".to_string(),
            message: "out of range".to_string(),
        },
    ];
    for err in errors {
        assert_eq!(err.error_code(), error_code::CONFIG_ERROR);
    }
}

#[test]
fn test_inference_errors_are_comparable() {
    let a = InferenceError::InvalidPrior { value: 0.0 };
    assert_eq!(a.clone(), a);
    assert_ne!(a, InferenceError::InvalidPrior { value: 1.0 });
}
