//! Cost benchmarks keyed by channel.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Channel, FxHashMap};
use crate::constants::STANDARD_BENCHMARKS;

/// Which cost column drives the efficiency adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CostMetric {
    /// Cost per thousand impressions.
    Cpm,
    /// Cost per click.
    Cpc,
}

impl CostMetric {
    pub fn name(self) -> &'static str {
        match self {
            Self::Cpm => "CPM",
            Self::Cpc => "CPC",
        }
    }
}

impl fmt::Display for CostMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference CPM/CPC values for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRow {
    #[serde(alias = "CPM")]
    pub cpm: f64,
    #[serde(alias = "CPC")]
    pub cpc: f64,
}

impl CostRow {
    pub fn new(cpm: f64, cpc: f64) -> Self {
        Self { cpm, cpc }
    }

    /// The value of the requested cost column.
    pub fn get(&self, metric: CostMetric) -> f64 {
        match metric {
            CostMetric::Cpm => self.cpm,
            CostMetric::Cpc => self.cpc,
        }
    }
}

/// Benchmark table with at most one row per channel.
///
/// Rows are keyed by channel so a value can never drift out of alignment
/// with the channel it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostBenchmarks {
    rows: FxHashMap<Channel, CostRow>,
}

impl CostBenchmarks {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference table covering the holistic channel catalog.
    pub fn standard() -> Self {
        STANDARD_BENCHMARKS
            .iter()
            .map(|&(channel, cpc, cpm)| (Channel::from(channel), CostRow::new(cpm, cpc)))
            .collect()
    }

    /// Insert or replace the row for a channel. Returns the previous row.
    pub fn insert(&mut self, channel: impl Into<Channel>, row: CostRow) -> Option<CostRow> {
        self.rows.insert(channel.into(), row)
    }

    /// Row for a channel, if present.
    pub fn get(&self, channel: &str) -> Option<&CostRow> {
        self.rows.get(channel)
    }

    /// Single cost value for a channel, if the channel has a row.
    pub fn cost(&self, channel: &str, metric: CostMetric) -> Option<f64> {
        self.rows.get(channel).map(|row| row.get(metric))
    }

    /// Project the table onto one cost column.
    pub fn costs_for(&self, metric: CostMetric) -> FxHashMap<Channel, f64> {
        self.rows
            .iter()
            .map(|(channel, row)| (channel.clone(), row.get(metric)))
            .collect()
    }

    /// Overlay `other` onto this table; rows in `other` win.
    pub fn merge(&mut self, other: &CostBenchmarks) {
        for (channel, row) in &other.rows {
            self.rows.insert(channel.clone(), *row);
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Channel, &CostRow)> {
        self.rows.iter()
    }
}

impl FromIterator<(Channel, CostRow)> for CostBenchmarks {
    fn from_iter<I: IntoIterator<Item = (Channel, CostRow)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
