use ndarray::{Array1, Array2};
use proptest::prelude::*;
use veracity_inference::{
    gradients, log_likelihood, posterior, softplus, softplus_array, InferenceEngine,
    InferenceError, Prior,
};

/// Random consistent (alpha, beta, labels) triple.
fn crowd() -> impl Strategy<Value = (Array1<f64>, Array1<f64>, Array2<u8>)> {
    (1usize..8, 0usize..6).prop_flat_map(|(n_items, n_experts)| {
        (
            prop::collection::vec(-10.0f64..10.0, n_experts),
            prop::collection::vec(0.01f64..10.0, n_items),
            prop::collection::vec(0u8..=1, n_items * n_experts),
        )
            .prop_map(move |(alpha, beta, labels)| {
                (
                    Array1::from(alpha),
                    Array1::from(beta),
                    Array2::from_shape_vec((n_items, n_experts), labels).unwrap(),
                )
            })
    })
}

proptest! {
    #[test]
    fn posterior_columns_are_distributions((alpha, beta, labels) in crowd(), p in 0.01f64..0.99) {
        let prior = Prior::new(p).unwrap();
        let q = posterior(alpha.view(), beta.view(), labels.view(), prior).unwrap();
        prop_assert_eq!(q.dim(), (2, beta.len()));
        for j in 0..beta.len() {
            let (q0, q1) = (q[[0, j]], q[[1, j]]);
            prop_assert!((q0 + q1 - 1.0).abs() < 1e-9, "column {} sums to {}", j, q0 + q1);
            prop_assert!(q0 > 0.0 && q0 < 1.0);
            prop_assert!(q1 > 0.0 && q1 < 1.0);
        }
    }

    #[test]
    fn extreme_parameters_never_yield_nan(
        alpha in prop::collection::vec(prop_oneof![-1e300f64..-1e150, 1e150f64..1e300], 1..5),
        b in 1e-10f64..1e300,
        labels in prop::collection::vec(0u8..=1, 5),
    ) {
        let n_experts = alpha.len();
        let alpha = Array1::from(alpha);
        let beta = Array1::from(vec![b]);
        let labels = Array2::from_shape_vec((1, n_experts), labels[..n_experts].to_vec()).unwrap();
        match posterior(alpha.view(), beta.view(), labels.view(), Prior::default()) {
            Ok(q) => {
                prop_assert!(q[[0, 0]] > 0.0 && q[[0, 0]] < 1.0);
                prop_assert!(q[[1, 0]] > 0.0 && q[[1, 0]] < 1.0);
                prop_assert!((q[[0, 0]] + q[[1, 0]] - 1.0).abs() < 1e-9);
            }
            Err(err) => {
                prop_assert!(matches!(err, InferenceError::InteractionOverflow { .. }), "{}", err);
            }
        }
    }

    #[test]
    fn softplus_finite_everywhere(x in -1e6f64..1e6) {
        let y = softplus(x);
        prop_assert!(y.is_finite());
        prop_assert!(y >= 0.0);
        prop_assert!(y >= x);
    }

    #[test]
    fn softplus_identity_above_cutoff(x in 20.0001f64..1e6) {
        let y = softplus(x);
        prop_assert!(((y - x) / x).abs() < 1e-6);
    }

    #[test]
    fn softplus_array_preserves_shape(rows in 0usize..6, cols in 0usize..6, fill in -50.0f64..50.0) {
        let x = Array2::from_elem((rows, cols), fill);
        let y = softplus_array(x.view());
        prop_assert_eq!(y.dim(), (rows, cols));
        prop_assert!(y.iter().all(|v| *v == softplus(fill)));
    }

    #[test]
    fn likelihood_branches_are_complementary((alpha, beta, labels) in crowd()) {
        let n_items = beta.len();
        let ones = Array1::from_elem(n_items, 1u8);
        let zeros = Array1::from_elem(n_items, 0u8);
        let under_one = log_likelihood(alpha.view(), beta.view(), labels.view(), ones.view()).unwrap();
        let under_zero = log_likelihood(alpha.view(), beta.view(), labels.view(), zeros.view()).unwrap();
        prop_assert_eq!(under_one.dim(), labels.dim());
        for (a, b) in under_one.iter().zip(under_zero.iter()) {
            prop_assert!(*a <= 0.0 && *b <= 0.0);
            prop_assert!((a.exp() + b.exp() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn gradient_shapes_follow_parameters((alpha, beta, labels) in crowd()) {
        let q = posterior(alpha.view(), beta.view(), labels.view(), Prior::default()).unwrap();
        let g = gradients(alpha.view(), beta.view(), labels.view(), q.view()).unwrap();
        prop_assert_eq!(g.alpha.len(), alpha.len());
        prop_assert_eq!(g.log_beta.len(), beta.len());
        prop_assert!(g.alpha.iter().chain(g.log_beta.iter()).all(|v| v.is_finite()));
    }

    #[test]
    fn parallel_path_is_bit_identical((alpha, beta, labels) in crowd()) {
        let seq = InferenceEngine::new().with_parallel_min_items(usize::MAX);
        let par = InferenceEngine::new().with_parallel_min_items(1);
        let q_seq = seq.posterior(alpha.view(), beta.view(), labels.view()).unwrap();
        let q_par = par.posterior(alpha.view(), beta.view(), labels.view()).unwrap();
        prop_assert_eq!(&q_seq, &q_par);
        let lb_seq = seq.lower_bound(alpha.view(), beta.view(), labels.view(), q_seq.view()).unwrap();
        let lb_par = par.lower_bound(alpha.view(), beta.view(), labels.view(), q_par.view()).unwrap();
        prop_assert_eq!(lb_seq.to_bits(), lb_par.to_bits());
    }
}
