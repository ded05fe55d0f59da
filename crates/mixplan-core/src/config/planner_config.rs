//! Planner configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_BUDGET_FLEX_PERCENT, DEFAULT_MIN_BUDGET, DEFAULT_MUST_HAVE_RESERVE_SHARE,
    HOLISTIC_CHANNELS,
};

/// Configuration for turning a plan request into a plan.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlannerConfig {
    /// Smallest accepted total budget. Default: 1000.
    pub min_budget: Option<f64>,
    /// Largest accepted budget flexibility percentage. Default: 50.
    pub max_budget_flex_percent: Option<f64>,
    /// Share of the budget reported as reserved for must-have channels.
    /// Default: 0.5.
    pub must_have_reserve_share: Option<f64>,
    /// Channel catalog override. Default: the holistic channel list.
    #[serde(default)]
    pub channels: Vec<String>,
    /// Apply the cost-efficiency stage when a KPI focus exists. Default: true.
    pub use_benchmarks: Option<bool>,
}

impl PlannerConfig {
    /// Returns the effective minimum budget, defaulting to 1000.
    pub fn effective_min_budget(&self) -> f64 {
        self.min_budget.unwrap_or(DEFAULT_MIN_BUDGET)
    }

    /// Returns the effective flexibility cap, defaulting to 50.
    pub fn effective_max_budget_flex_percent(&self) -> f64 {
        self.max_budget_flex_percent
            .unwrap_or(DEFAULT_MAX_BUDGET_FLEX_PERCENT)
    }

    /// Returns the effective must-have reserve share, defaulting to 0.5.
    pub fn effective_must_have_reserve_share(&self) -> f64 {
        self.must_have_reserve_share
            .unwrap_or(DEFAULT_MUST_HAVE_RESERVE_SHARE)
    }

    /// Returns the channel catalog.
    pub fn effective_channels(&self) -> Vec<String> {
        if self.channels.is_empty() {
            HOLISTIC_CHANNELS.iter().map(|c| c.to_string()).collect()
        } else {
            self.channels.clone()
        }
    }

    pub fn effective_use_benchmarks(&self) -> bool {
        self.use_benchmarks.unwrap_or(true)
    }
}
