//! Allocation errors and non-fatal allocation warnings.

use super::error_code::{self, MixplanErrorCode};
use crate::types::{Channel, CostMetric};

/// Fatal conditions that stop an allocation.
///
/// A zero or overflowing denominator is always reported here; the
/// allocator never hands back NaN or infinite amounts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AllocationError {
    #[error("No channels to allocate across")]
    EmptyChannels,

    #[error("Total budget must be a finite non-negative number, got {value}")]
    InvalidBudget { value: f64 },

    #[error("Weight for {channel} must be a finite non-negative number, got {value}")]
    InvalidWeight { channel: Channel, value: f64 },

    #[error("{metric} benchmark for {channel} must be a positive number with a finite inverse, got {value}")]
    InvalidCost {
        channel: Channel,
        metric: CostMetric,
        value: f64,
    },

    #[error("Affinity value for dimension {dimension} must be finite, got {value}")]
    InvalidAffinity { dimension: String, value: f64 },

    #[error("Combined channel weight must be finite and positive, got {total_weight}")]
    ZeroWeight { total_weight: f64 },

    #[error("Efficiency-adjusted weight must be finite and positive, got {eff_weight_sum} across {channel_count} channels")]
    ZeroEfficiencyWeight {
        eff_weight_sum: f64,
        channel_count: usize,
    },
}

impl MixplanErrorCode for AllocationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroWeight { .. } => error_code::ZERO_WEIGHT,
            Self::ZeroEfficiencyWeight { .. } => error_code::ZERO_EFFICIENCY_WEIGHT,
            _ => error_code::ALLOCATION_ERROR,
        }
    }
}

/// Recoverable degradations absorbed during an allocation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllocationWarning {
    #[error("No {metric} benchmark for {channel}; using neutral cost {substituted}")]
    MissingBenchmark {
        channel: Channel,
        metric: CostMetric,
        substituted: f64,
    },
}

impl AllocationWarning {
    /// The channel the warning concerns.
    pub fn channel(&self) -> &Channel {
        match self {
            Self::MissingBenchmark { channel, .. } => channel,
        }
    }
}
