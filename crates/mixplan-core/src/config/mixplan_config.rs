//! Top-level Mixplan configuration with 4-layer resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AffinityConfig, AllocationConfig, PlannerConfig};
use crate::errors::ConfigError;
use crate::types::CostBenchmarks;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`MIXPLAN_*`)
/// 3. Project config (`mixplan.toml` in project root)
/// 4. User config (`~/.mixplan/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MixplanConfig {
    pub allocation: AllocationConfig,
    pub planner: PlannerConfig,
    pub affinity: AffinityConfig,
    /// Benchmark rows layered over the standard table, keyed by channel.
    pub benchmarks: CostBenchmarks,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub min_budget: Option<f64>,
    pub must_have_multiplier: Option<f64>,
    pub must_have_reserve_share: Option<f64>,
    pub use_benchmarks: Option<bool>,
}

impl MixplanConfig {
    /// Load configuration with 4-layer resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(
                            path = %user_config_path.display(),
                            error = %e,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("mixplan.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        tracing::debug!(root = %root.display(), "configuration resolved");

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
    pub fn validate(config: &MixplanConfig) -> Result<(), ConfigError> {
        check_non_negative(
            "allocation.base_missing_weight",
            config.allocation.base_missing_weight,
        )?;
        check_non_negative(
            "allocation.affinity_missing_weight",
            config.allocation.affinity_missing_weight,
        )?;
        if let Some(multiplier) = config.allocation.must_have_multiplier {
            if !multiplier.is_finite() || multiplier <= 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "allocation.must_have_multiplier".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(share) = config.planner.must_have_reserve_share {
            if !(0.0..=1.0).contains(&share) {
                return Err(ConfigError::ValidationFailed {
                    field: "planner.must_have_reserve_share".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        check_non_negative("planner.min_budget", config.planner.min_budget)?;
        if let Some(flex) = config.planner.max_budget_flex_percent {
            if !(0.0..=100.0).contains(&flex) {
                return Err(ConfigError::ValidationFailed {
                    field: "planner.max_budget_flex_percent".to_string(),
                    message: "must be between 0 and 100".to_string(),
                });
            }
        }
        for (dimension, weight) in &config.affinity.dimension_weights {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: format!("affinity.dimension_weights.{dimension}"),
                    message: "must be a non-negative number".to_string(),
                });
            }
        }
        for (channel, row) in config.benchmarks.iter() {
            for (metric, value) in [("cpm", row.cpm), ("cpc", row.cpc)] {
                if !value.is_finite() || value <= 0.0 {
                    return Err(ConfigError::ValidationFailed {
                        field: format!("benchmarks.{channel}.{metric}"),
                        message: "must be greater than 0".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.mixplan/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut MixplanConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: MixplanConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` (or non-empty) value.
    fn merge(base: &mut MixplanConfig, other: &MixplanConfig) {
        // Allocation
        if other.allocation.base_missing_weight.is_some() {
            base.allocation.base_missing_weight = other.allocation.base_missing_weight;
        }
        if other.allocation.affinity_missing_weight.is_some() {
            base.allocation.affinity_missing_weight = other.allocation.affinity_missing_weight;
        }
        if other.allocation.must_have_multiplier.is_some() {
            base.allocation.must_have_multiplier = other.allocation.must_have_multiplier;
        }
        if !other.allocation.reach_kpis.is_empty() {
            base.allocation.reach_kpis = other.allocation.reach_kpis.clone();
        }

        // Planner
        if other.planner.min_budget.is_some() {
            base.planner.min_budget = other.planner.min_budget;
        }
        if other.planner.max_budget_flex_percent.is_some() {
            base.planner.max_budget_flex_percent = other.planner.max_budget_flex_percent;
        }
        if other.planner.must_have_reserve_share.is_some() {
            base.planner.must_have_reserve_share = other.planner.must_have_reserve_share;
        }
        if !other.planner.channels.is_empty() {
            base.planner.channels = other.planner.channels.clone();
        }
        if other.planner.use_benchmarks.is_some() {
            base.planner.use_benchmarks = other.planner.use_benchmarks;
        }

        // Affinity
        if !other.affinity.dimension_weights.is_empty() {
            base.affinity.dimension_weights = other.affinity.dimension_weights.clone();
        }

        // Benchmarks merge row-by-row.
        base.benchmarks.merge(&other.benchmarks);
    }

    /// Apply environment variable overrides.
    /// Pattern: `MIXPLAN_MIN_BUDGET`, `MIXPLAN_MUST_HAVE_MULTIPLIER`, etc.
    fn apply_env_overrides(config: &mut MixplanConfig) {
        if let Some(v) = env_f64("MIXPLAN_MIN_BUDGET") {
            config.planner.min_budget = Some(v);
        }
        if let Some(v) = env_f64("MIXPLAN_MAX_BUDGET_FLEX_PERCENT") {
            config.planner.max_budget_flex_percent = Some(v);
        }
        if let Some(v) = env_f64("MIXPLAN_MUST_HAVE_RESERVE_SHARE") {
            config.planner.must_have_reserve_share = Some(v);
        }
        if let Some(v) = env_f64("MIXPLAN_MUST_HAVE_MULTIPLIER") {
            config.allocation.must_have_multiplier = Some(v);
        }
        if let Some(v) = env_f64("MIXPLAN_BASE_MISSING_WEIGHT") {
            config.allocation.base_missing_weight = Some(v);
        }
        if let Some(v) = env_f64("MIXPLAN_AFFINITY_MISSING_WEIGHT") {
            config.allocation.affinity_missing_weight = Some(v);
        }
        if let Ok(val) = std::env::var("MIXPLAN_USE_BENCHMARKS") {
            if let Ok(v) = val.parse::<bool>() {
                config.planner.use_benchmarks = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut MixplanConfig, cli: &CliOverrides) {
        if let Some(v) = cli.min_budget {
            config.planner.min_budget = Some(v);
        }
        if let Some(v) = cli.must_have_multiplier {
            config.allocation.must_have_multiplier = Some(v);
        }
        if let Some(v) = cli.must_have_reserve_share {
            config.planner.must_have_reserve_share = Some(v);
        }
        if let Some(v) = cli.use_benchmarks {
            config.planner.use_benchmarks = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn check_non_negative(field: &str, value: Option<f64>) -> Result<(), ConfigError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be a non-negative number".to_string(),
        }),
        _ => Ok(()),
    }
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key).ok()?.parse::<f64>().ok()
}

/// Returns the user-level config directory: `~/.mixplan/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".mixplan"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
