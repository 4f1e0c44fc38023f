//! Top-level Veracity configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{DiagnosticsConfig, ElboVariant, InferenceConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the root passed to `load`.
pub const PROJECT_CONFIG_FILE: &str = "veracity.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`VERACITY_*`)
/// 2. Project config (`veracity.toml` in project root)
/// 3. User config (`~/.veracity/config.toml`)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VeracityConfig {
    pub inference: InferenceConfig,
    pub diagnostics: DiagnosticsConfig,
}

impl VeracityConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(e) => {
                        ::tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &VeracityConfig) -> Result<(), ConfigError> {
        if let Some(prior) = config.inference.prior {
            if !prior.is_finite() || prior <= 0.0 || prior >= 1.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "inference.prior".to_string(),
                    message: "must be strictly between 0.0 and 1.0".to_string(),
                });
            }
        }
        if let Some(eps) = config.inference.responsibility_epsilon {
            if !eps.is_finite() || eps <= 0.0 || eps >= 0.5 {
                return Err(ConfigError::ValidationFailed {
                    field: "inference.responsibility_epsilon".to_string(),
                    message: "must be strictly between 0.0 and 0.5".to_string(),
                });
            }
        }
        if let Some(min_items) = config.inference.parallel_min_items {
            if min_items == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "inference.parallel_min_items".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.veracity/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut VeracityConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: VeracityConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut VeracityConfig, other: &VeracityConfig) {
        // Inference
        if other.inference.prior.is_some() {
            base.inference.prior = other.inference.prior;
        }
        if other.inference.responsibility_epsilon.is_some() {
            base.inference.responsibility_epsilon = other.inference.responsibility_epsilon;
        }
        if other.inference.elbo_variant.is_some() {
            base.inference.elbo_variant = other.inference.elbo_variant;
        }
        if other.inference.parallel_min_items.is_some() {
            base.inference.parallel_min_items = other.inference.parallel_min_items;
        }

        // Diagnostics
        if other.diagnostics.enabled.is_some() {
            base.diagnostics.enabled = other.diagnostics.enabled;
        }
        if other.diagnostics.log_spans.is_some() {
            base.diagnostics.log_spans = other.diagnostics.log_spans;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `VERACITY_PRIOR`, `VERACITY_ELBO_VARIANT`, etc.
    /// Unparseable numbers are skipped; an unknown ELBO variant is an error.
    fn apply_env_overrides(config: &mut VeracityConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("VERACITY_PRIOR") {
            if let Ok(v) = val.parse::<f64>() {
                config.inference.prior = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VERACITY_RESPONSIBILITY_EPSILON") {
            if let Ok(v) = val.parse::<f64>() {
                config.inference.responsibility_epsilon = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VERACITY_ELBO_VARIANT") {
            let variant = val
                .parse::<ElboVariant>()
                .map_err(|message| ConfigError::InvalidValue {
                    field: "inference.elbo_variant".to_string(),
                    message,
                })?;
            config.inference.elbo_variant = Some(variant);
        }
        if let Ok(val) = std::env::var("VERACITY_PARALLEL_MIN_ITEMS") {
            if let Ok(v) = val.parse::<usize>() {
                config.inference.parallel_min_items = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VERACITY_DIAGNOSTICS_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                config.diagnostics.enabled = Some(v);
            }
        }
        Ok(())
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user-level config directory: `~/.veracity/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".veracity"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
