//! Deterministic synthetic crowds for tests and benchmarks.
//! Same seed → same crowd across runs and platforms.

use ndarray::{Array1, Array2};

/// A generated crowd: hidden truth, the parameters that produced the labels,
/// and the observed label matrix.
#[derive(Debug, Clone)]
pub struct CrowdFixture {
    /// True label per item, `[N]`.
    pub truth: Array1<u8>,
    /// Ability per expert, `[E]`.
    pub alpha: Array1<f64>,
    /// Difficulty per item, `[N]`.
    pub beta: Array1<f64>,
    /// Observed labels, `[N, E]`.
    pub labels: Array2<u8>,
    pub seed: u64,
}

impl CrowdFixture {
    pub fn n_items(&self) -> usize {
        self.labels.nrows()
    }

    pub fn n_experts(&self) -> usize {
        self.labels.ncols()
    }

    /// Fraction of items where `predicted` matches the hidden truth.
    pub fn accuracy(&self, predicted: &Array1<u8>) -> f64 {
        if self.truth.is_empty() {
            return 1.0;
        }
        let hits = self
            .truth
            .iter()
            .zip(predicted.iter())
            .filter(|(t, p)| t == p)
            .count();
        hits as f64 / self.truth.len() as f64
    }
}

/// Fixture size presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureSize {
    /// 20 items, 5 experts: unit test scale
    Micro,
    /// 200 items, 10 experts
    Small,
    /// 2K items, 20 experts
    Medium,
    /// 20K items, 50 experts: exercises the parallel path
    Large,
}

impl FixtureSize {
    pub fn n_items(&self) -> usize {
        match self {
            Self::Micro => 20,
            Self::Small => 200,
            Self::Medium => 2_000,
            Self::Large => 20_000,
        }
    }

    pub fn n_experts(&self) -> usize {
        match self {
            Self::Micro => 5,
            Self::Small => 10,
            Self::Medium => 20,
            Self::Large => 50,
        }
    }

    pub fn spec(&self) -> CrowdSpec {
        CrowdSpec {
            n_items: self.n_items(),
            n_experts: self.n_experts(),
            ..CrowdSpec::default()
        }
    }
}

/// Shape and parameter ranges of a generated crowd.
#[derive(Debug, Clone, PartialEq)]
pub struct CrowdSpec {
    pub n_items: usize,
    pub n_experts: usize,
    /// Probability that an item's truth is 1.
    pub positive_rate: f64,
    /// Abilities are drawn uniformly from this range.
    pub ability_range: (f64, f64),
    /// Difficulties are drawn uniformly from this range.
    pub difficulty_range: (f64, f64),
    /// Experts at index `< adversarial` get their ability negated.
    pub adversarial: usize,
}

impl Default for CrowdSpec {
    fn default() -> Self {
        Self {
            n_items: 20,
            n_experts: 5,
            positive_rate: 0.5,
            ability_range: (0.5, 3.0),
            difficulty_range: (0.3, 2.0),
            adversarial: 0,
        }
    }
}

/// Generate a preset-sized crowd.
pub fn generate_crowd(size: FixtureSize, seed: u64) -> CrowdFixture {
    generate_crowd_with(&size.spec(), seed)
}

/// Generate a crowd from the logistic-noise model: expert `i` reports item
/// `j`'s truth with probability `sigmoid(alpha[i] * beta[j])` and the
/// opposite label otherwise.
pub fn generate_crowd_with(spec: &CrowdSpec, seed: u64) -> CrowdFixture {
    let mut rng = SimpleRng::new(seed);

    let alpha = Array1::from_shape_fn(spec.n_experts, |i| {
        let a = rng.uniform(spec.ability_range.0, spec.ability_range.1);
        if i < spec.adversarial {
            -a
        } else {
            a
        }
    });
    let beta = Array1::from_shape_fn(spec.n_items, |_| {
        rng.uniform(spec.difficulty_range.0, spec.difficulty_range.1)
    });
    let truth = Array1::from_shape_fn(spec.n_items, |_| u8::from(rng.next_f64() < spec.positive_rate));

    let labels = Array2::from_shape_fn((spec.n_items, spec.n_experts), |(j, i)| {
        let p_correct = 1.0 / (1.0 + (-alpha[i] * beta[j]).exp());
        if rng.next_f64() < p_correct {
            truth[j]
        } else {
            1 - truth[j]
        }
    });

    CrowdFixture {
        truth,
        alpha,
        beta,
        labels,
        seed,
    }
}

/// Majority vote per item, ties broken towards 1.
pub fn majority_vote(labels: &Array2<u8>) -> Array1<u8> {
    Array1::from_iter(labels.rows().into_iter().map(|row| {
        let ones = row.iter().filter(|&&l| l == 1).count();
        u8::from(2 * ones >= row.len())
    }))
}

/// Simple xorshift PRNG for deterministic generation.
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform in `[0, 1)` from the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[low, high)`.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}
