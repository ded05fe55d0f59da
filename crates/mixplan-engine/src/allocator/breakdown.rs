//! Per-channel view of how an amount was reached.

use serde::Serialize;

use mixplan_core::types::Channel;

/// Every factor that fed one channel's amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelBreakdown {
    pub channel: Channel,
    /// Entry from the caller's weight map, if any.
    pub base_weight: Option<f64>,
    /// Weighted affinity score, when affinity data was combined in.
    pub affinity_score: Option<f64>,
    /// Weight after the affinity pass (or the base-stage default).
    pub combined_weight: f64,
    /// Cost used by the efficiency stage, when it ran.
    pub cost: Option<f64>,
    /// `1 / cost`, when the efficiency stage ran.
    pub efficiency: Option<f64>,
    /// Weight the final amount is proportional to.
    pub effective_weight: f64,
    /// Fraction (0–1) of the budget.
    pub share: f64,
    pub amount: f64,
}

impl ChannelBreakdown {
    /// Whether the efficiency stage changed this channel's weight.
    pub fn cost_adjusted(&self) -> bool {
        self.efficiency.is_some()
    }
}
