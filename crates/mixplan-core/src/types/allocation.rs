//! Allocation result: ordered channel → budget amount.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Channel;
use crate::constants::SUM_TOLERANCE;

/// Budget split across channels.
///
/// Entries keep the order of the channel list the allocation was computed
/// from. Amounts are non-negative and sum to the total budget whenever the
/// allocator succeeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allocation {
    amounts: IndexMap<Channel, f64>,
}

impl Allocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            amounts: IndexMap::with_capacity(capacity),
        }
    }

    /// Set the amount for a channel. A repeated channel keeps its original
    /// position and takes the new amount.
    pub fn insert(&mut self, channel: Channel, amount: f64) -> Option<f64> {
        self.amounts.insert(channel, amount)
    }

    pub fn get(&self, channel: &str) -> Option<f64> {
        self.amounts.get(channel).copied()
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Entries in channel-list order.
    pub fn iter(&self) -> impl Iterator<Item = (&Channel, f64)> {
        self.amounts.iter().map(|(c, a)| (c, *a))
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.amounts.keys()
    }

    /// Sum of all allocated amounts.
    pub fn total(&self) -> f64 {
        self.amounts.values().sum()
    }

    /// Fraction (0–1) of the allocated total going to `channel`.
    /// `None` for unknown channels or when nothing was allocated.
    pub fn share(&self, channel: &str) -> Option<f64> {
        let total = self.total();
        if total <= 0.0 {
            return None;
        }
        self.get(channel).map(|amount| amount / total)
    }

    /// Whether the amounts add up to `budget` within relative tolerance.
    pub fn sums_to(&self, budget: f64) -> bool {
        let total = self.total();
        (total - budget).abs() <= SUM_TOLERANCE * budget.abs().max(1.0)
    }

    pub fn into_inner(self) -> IndexMap<Channel, f64> {
        self.amounts
    }
}

impl FromIterator<(Channel, f64)> for Allocation {
    fn from_iter<I: IntoIterator<Item = (Channel, f64)>>(iter: I) -> Self {
        Self {
            amounts: iter.into_iter().collect(),
        }
    }
}
