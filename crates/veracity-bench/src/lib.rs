//! # veracity-bench
//!
//! Benchmarks and shared fixtures for the Veracity inference primitives.
//! 3-level benchmark framework:
//! - **Micro**: Criterion-based per-primitive benchmarks
//! - **Iteration**: one full EM iteration (E-step, gradients, bound)
//! - **Regression**: baseline-compared, block CI on regression
//!
//! Fixtures are deterministic synthetic crowds drawn from the same
//! logistic-noise model the inference crate fits.

pub mod fixtures;

use serde::{Deserialize, Serialize};

/// Benchmark level: scope and CI behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenchLevel {
    /// Single primitive (criterion). Run locally.
    Micro,
    /// A full EM iteration over a fixture. Run in CI.
    Iteration,
    /// Baseline-compared regression benchmarks. Block CI on regression.
    Regression,
}

impl BenchLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Micro => "micro",
            Self::Iteration => "iteration",
            Self::Regression => "regression",
        }
    }

    /// Whether this level should block CI on regression.
    pub fn blocks_ci(&self) -> bool {
        matches!(self, Self::Regression)
    }

    /// Allowed slowdown over baseline, as a fraction.
    pub fn regression_threshold(&self) -> f64 {
        match self {
            Self::Micro => 0.20,
            Self::Iteration => 0.50,
            Self::Regression => 0.10,
        }
    }
}

/// Benchmark result for CI comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchResult {
    pub name: String,
    pub level: BenchLevel,
    pub duration_ms: f64,
    pub iterations: u64,
    /// Items processed per second, when meaningful.
    pub throughput: Option<f64>,
}

impl BenchResult {
    /// Check if this result regresses vs a baseline.
    pub fn regresses_vs(&self, baseline: &BenchResult) -> bool {
        if baseline.duration_ms <= 0.0 {
            return false;
        }
        let ratio = self.duration_ms / baseline.duration_ms;
        ratio > (1.0 + self.level.regression_threshold())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
