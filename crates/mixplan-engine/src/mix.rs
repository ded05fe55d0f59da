//! Channel mix rows for display: share and amount per channel.

use serde::Serialize;

use mixplan_core::types::{Allocation, Channel};

/// One row of the recommended channel mix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelMixRow {
    pub channel: Channel,
    /// Percentage (0–100) of the total budget.
    pub percent: f64,
    pub amount: f64,
}

/// Rows in allocation order. Percentages are relative to `total_budget`;
/// a zero budget yields 0% everywhere.
pub fn mix_rows(allocation: &Allocation, total_budget: f64) -> Vec<ChannelMixRow> {
    allocation
        .iter()
        .map(|(channel, amount)| ChannelMixRow {
            channel: channel.clone(),
            percent: if total_budget > 0.0 {
                amount / total_budget * 100.0
            } else {
                0.0
            },
            amount,
        })
        .collect()
}
