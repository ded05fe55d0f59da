//! Allocation configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_AFFINITY_MISSING_WEIGHT, DEFAULT_BASE_MISSING_WEIGHT, DEFAULT_MUST_HAVE_MULTIPLIER,
    DEFAULT_REACH_KPIS,
};

/// Configuration for the allocator and the weight builder.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AllocationConfig {
    /// Weight for a channel absent from the weight map when no affinity
    /// data is supplied. Default: 0.0.
    pub base_missing_weight: Option<f64>,
    /// Weight for a channel absent from the weight map when affinity data
    /// is combined in. Default: 1.0.
    pub affinity_missing_weight: Option<f64>,
    /// Must-have weight multiplier. Default: 2.0.
    pub must_have_multiplier: Option<f64>,
    /// KPIs (case-insensitive) that select CPM as the cost metric.
    /// Default: `reach`, `impressions`.
    #[serde(default)]
    pub reach_kpis: Vec<String>,
}

impl AllocationConfig {
    /// Returns the effective base-stage missing weight, defaulting to 0.0.
    pub fn effective_base_missing_weight(&self) -> f64 {
        self.base_missing_weight.unwrap_or(DEFAULT_BASE_MISSING_WEIGHT)
    }

    /// Returns the effective affinity-stage missing weight, defaulting to 1.0.
    pub fn effective_affinity_missing_weight(&self) -> f64 {
        self.affinity_missing_weight
            .unwrap_or(DEFAULT_AFFINITY_MISSING_WEIGHT)
    }

    /// Returns the effective must-have multiplier, defaulting to 2.0.
    pub fn effective_must_have_multiplier(&self) -> f64 {
        self.must_have_multiplier.unwrap_or(DEFAULT_MUST_HAVE_MULTIPLIER)
    }

    /// Returns the lowercased reach KPI list.
    pub fn effective_reach_kpis(&self) -> Vec<String> {
        if self.reach_kpis.is_empty() {
            DEFAULT_REACH_KPIS.iter().map(|k| k.to_string()).collect()
        } else {
            self.reach_kpis.iter().map(|k| k.trim().to_lowercase()).collect()
        }
    }
}
