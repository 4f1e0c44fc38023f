//! Inference configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default prior probability that an item's true label is 1.
pub const DEFAULT_PRIOR: f64 = 0.5;

/// Default interior bound applied to responsibilities before any `ln(q)`.
pub const DEFAULT_RESPONSIBILITY_EPSILON: f64 = 1e-12;

/// Default item count at which reductions move onto the rayon pool.
pub const DEFAULT_PARALLEL_MIN_ITEMS: usize = 4096;

/// Which evidence lower bound the engine reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ElboVariant {
    /// Likelihood terms accumulated only where the observed label agrees with
    /// the hypothesis, entropy as `-ln q`. Monotone across EM iterations only
    /// approximately.
    #[default]
    Masked,
    /// Full expected complete-data log-likelihood plus the prior term and the
    /// entropy `-q ln q`. The gradients are its exact derivatives.
    Full,
}

impl ElboVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Masked => "masked",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for ElboVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElboVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "masked" => Ok(Self::Masked),
            "full" => Ok(Self::Full),
            other => Err(format!("unknown ELBO variant '{other}'")),
        }
    }
}

/// Configuration for the inference primitives.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InferenceConfig {
    /// Prior probability that a true label is 1. Default: 0.5.
    pub prior: Option<f64>,
    /// Responsibilities are clamped into `[eps, 1 - eps]`. Default: 1e-12.
    pub responsibility_epsilon: Option<f64>,
    /// Lower bound reported by the engine. Default: masked.
    pub elbo_variant: Option<ElboVariant>,
    /// Item count at which reductions run in parallel. Default: 4096.
    pub parallel_min_items: Option<usize>,
}

impl InferenceConfig {
    /// Returns the effective prior, defaulting to 0.5.
    pub fn effective_prior(&self) -> f64 {
        self.prior.unwrap_or(DEFAULT_PRIOR)
    }

    /// Returns the effective responsibility epsilon, defaulting to 1e-12.
    pub fn effective_responsibility_epsilon(&self) -> f64 {
        self.responsibility_epsilon
            .unwrap_or(DEFAULT_RESPONSIBILITY_EPSILON)
    }

    /// Returns the effective ELBO variant, defaulting to masked.
    pub fn effective_elbo_variant(&self) -> ElboVariant {
        self.elbo_variant.unwrap_or_default()
    }

    /// Returns the effective parallel threshold, defaulting to 4096 items.
    pub fn effective_parallel_min_items(&self) -> usize {
        self.parallel_min_items.unwrap_or(DEFAULT_PARALLEL_MIN_ITEMS)
    }
}
