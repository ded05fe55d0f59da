//! Budget allocator: proportional split across channels in two stages.
//!
//! Stage 1 combines base weights with audience affinity and splits the
//! budget in proportion to the combined weights. Stage 2, which runs only
//! when both cost benchmarks and a KPI focus are given, scales every
//! combined weight by `1 / cost` and splits the budget again, replacing the
//! Stage 1 amounts.

pub mod breakdown;
pub mod combine;
pub mod efficiency;

use mixplan_core::config::AllocationConfig;
use mixplan_core::constants::{
    DEFAULT_AFFINITY_MISSING_WEIGHT, DEFAULT_BASE_MISSING_WEIGHT, DEFAULT_REACH_KPIS,
};
use mixplan_core::errors::{AllocationError, AllocationWarning};
use mixplan_core::types::{
    AffinityMap, AffinityWeights, Allocation, Channel, CostBenchmarks, CostMetric, FxHashSet,
    WeightMap,
};

use crate::kpi;

pub use breakdown::ChannelBreakdown;
pub use combine::CombinedWeights;
pub use efficiency::{ChannelEfficiency, EfficiencyTable};

/// Inputs for one allocation. Everything is borrowed and read-only.
#[derive(Debug, Clone, Copy)]
pub struct AllocationRequest<'a> {
    /// Channels to allocate across, in output order. Not deduplicated.
    pub channels: &'a [Channel],
    pub weights: &'a WeightMap,
    pub total_budget: f64,
    pub cost_benchmarks: Option<&'a CostBenchmarks>,
    pub kpi_focus: Option<&'a str>,
    pub affinity: Option<&'a AffinityMap>,
    pub affinity_weights: Option<&'a AffinityWeights>,
}

impl<'a> AllocationRequest<'a> {
    pub fn new(channels: &'a [Channel], weights: &'a WeightMap, total_budget: f64) -> Self {
        Self {
            channels,
            weights,
            total_budget,
            cost_benchmarks: None,
            kpi_focus: None,
            affinity: None,
            affinity_weights: None,
        }
    }

    pub fn with_cost_benchmarks(mut self, benchmarks: &'a CostBenchmarks) -> Self {
        self.cost_benchmarks = Some(benchmarks);
        self
    }

    pub fn with_kpi_focus(mut self, kpi_focus: &'a str) -> Self {
        self.kpi_focus = Some(kpi_focus);
        self
    }

    pub fn with_affinity(
        mut self,
        affinity: &'a AffinityMap,
        affinity_weights: &'a AffinityWeights,
    ) -> Self {
        self.affinity = Some(affinity);
        self.affinity_weights = Some(affinity_weights);
        self
    }

    /// Affinity inputs, when both are present and non-empty.
    fn affinity_inputs(&self) -> Option<(&'a AffinityMap, &'a AffinityWeights)> {
        match (self.affinity, self.affinity_weights) {
            (Some(affinity), Some(weights)) if !affinity.is_empty() && !weights.is_empty() => {
                Some((affinity, weights))
            }
            _ => None,
        }
    }
}

/// Result of a successful allocation.
#[derive(Debug, Clone)]
pub struct AllocationOutcome {
    pub allocation: Allocation,
    /// Non-fatal degradations absorbed along the way.
    pub warnings: Vec<AllocationWarning>,
    /// One entry per element of the channel list, in order.
    pub breakdown: Vec<ChannelBreakdown>,
    /// Cost column used, when the efficiency stage ran.
    pub cost_metric: Option<CostMetric>,
}

impl AllocationOutcome {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// The allocation engine. Stateless apart from its defaults, so one
/// instance can serve any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct Allocator {
    base_missing_weight: f64,
    affinity_missing_weight: f64,
    reach_kpis: Vec<String>,
}

impl Allocator {
    /// Allocator with the compiled defaults.
    pub fn new() -> Self {
        Self {
            base_missing_weight: DEFAULT_BASE_MISSING_WEIGHT,
            affinity_missing_weight: DEFAULT_AFFINITY_MISSING_WEIGHT,
            reach_kpis: DEFAULT_REACH_KPIS.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn from_config(config: &AllocationConfig) -> Self {
        Self {
            base_missing_weight: config.effective_base_missing_weight(),
            affinity_missing_weight: config.effective_affinity_missing_weight(),
            reach_kpis: config.effective_reach_kpis(),
        }
    }

    pub fn base_missing_weight(&self) -> f64 {
        self.base_missing_weight
    }

    pub fn affinity_missing_weight(&self) -> f64 {
        self.affinity_missing_weight
    }

    /// Cost column the efficiency stage uses for a KPI focus.
    pub fn cost_metric_for(&self, kpi_focus: &str) -> CostMetric {
        kpi::cost_metric_for(kpi_focus, &self.reach_kpis)
    }

    /// Split `request.total_budget` across `request.channels`.
    pub fn allocate(
        &self,
        request: &AllocationRequest<'_>,
    ) -> Result<AllocationOutcome, AllocationError> {
        let span = tracing::debug_span!(
            "allocate",
            channel_count = request.channels.len(),
            total_budget = request.total_budget
        );
        let _enter = span.enter();

        validate(request)?;

        let affinity = request.affinity_inputs();
        let combined = combine::combine(
            request.channels,
            request.weights,
            affinity,
            self.affinity_missing_weight,
        );

        // Missing channels default to `affinity_missing_weight` (1.0) inside
        // the affinity pass but to `base_missing_weight` (0.0) here. With
        // affinity data every allocated channel already has an entry, so
        // this default only bites on the plain path.
        let missing = self.base_missing_weight;
        let stage1: Vec<f64> = request
            .channels
            .iter()
            .map(|c| combined.get(c.as_str(), missing))
            .collect();

        // Cost rows are validated before the zero-budget shortcut so a bad
        // table is rejected whatever the budget.
        let stage2 = match (request.cost_benchmarks, request.kpi_focus) {
            (Some(benchmarks), Some(kpi_focus)) => {
                let metric = self.cost_metric_for(kpi_focus);
                Some(efficiency::evaluate(request.channels, benchmarks, metric)?)
            }
            _ => None,
        };

        if request.total_budget == 0.0 {
            tracing::debug!("zero budget, every channel receives 0");
            return Ok(zero_outcome(request, &combined, &stage1, stage2));
        }

        let total_weight = combined.total() + missing * absent_channel_count(request, &combined);
        if !total_weight.is_finite() || total_weight <= 0.0 {
            return Err(AllocationError::ZeroWeight { total_weight });
        }
        tracing::debug!(total_weight, affinity = affinity.is_some(), "stage 1 weights combined");

        let (effective, denominator) = match &stage2 {
            None => (stage1.clone(), total_weight),
            Some(table) => {
                let effective: Vec<f64> = stage1
                    .iter()
                    .zip(&table.entries)
                    .map(|(weight, entry)| weight * entry.efficiency)
                    .collect();
                let eff_weight_sum: f64 = effective.iter().sum();
                if !eff_weight_sum.is_finite() || eff_weight_sum <= 0.0 {
                    return Err(AllocationError::ZeroEfficiencyWeight {
                        eff_weight_sum,
                        channel_count: request.channels.len(),
                    });
                }
                tracing::debug!(
                    eff_weight_sum,
                    cost_metric = %table.metric,
                    "stage 2 cost efficiency applied"
                );
                (effective, eff_weight_sum)
            }
        };

        let mut allocation = Allocation::with_capacity(request.channels.len());
        let mut breakdown = Vec::with_capacity(request.channels.len());
        for (i, channel) in request.channels.iter().enumerate() {
            let share = effective[i] / denominator;
            let amount = share * request.total_budget;
            allocation.insert(channel.clone(), amount);

            let cost_entry = stage2.as_ref().map(|table| table.entries[i]);
            breakdown.push(ChannelBreakdown {
                channel: channel.clone(),
                base_weight: request.weights.get(channel.as_str()).copied(),
                affinity_score: combined.affinity_score(channel.as_str()),
                combined_weight: stage1[i],
                cost: cost_entry.map(|e| e.cost),
                efficiency: cost_entry.map(|e| e.efficiency),
                effective_weight: effective[i],
                share,
                amount,
            });
        }

        let (warnings, cost_metric) = match stage2 {
            Some(table) => (table.warnings, Some(table.metric)),
            None => (Vec::new(), None),
        };
        tracing::debug!(warning_count = warnings.len(), "allocation complete");

        Ok(AllocationOutcome {
            allocation,
            warnings,
            breakdown,
            cost_metric,
        })
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Allocate with the default engine and return only the amounts.
///
/// `cost_benchmarks` and `kpi_focus` enable the efficiency stage together;
/// `affinity` and `affinity_weights` enable the affinity pass together.
pub fn allocate(
    channels: &[Channel],
    weights: &WeightMap,
    total_budget: f64,
    cost_benchmarks: Option<&CostBenchmarks>,
    kpi_focus: Option<&str>,
    affinity: Option<&AffinityMap>,
    affinity_weights: Option<&AffinityWeights>,
) -> Result<Allocation, AllocationError> {
    let request = AllocationRequest {
        channels,
        weights,
        total_budget,
        cost_benchmarks,
        kpi_focus,
        affinity,
        affinity_weights,
    };
    Allocator::new()
        .allocate(&request)
        .map(|outcome| outcome.allocation)
}

fn validate(request: &AllocationRequest<'_>) -> Result<(), AllocationError> {
    if request.channels.is_empty() {
        return Err(AllocationError::EmptyChannels);
    }
    if !request.total_budget.is_finite() || request.total_budget < 0.0 {
        return Err(AllocationError::InvalidBudget {
            value: request.total_budget,
        });
    }
    // Every entry feeds the denominator, not only the allocated channels.
    for (channel, &value) in request.weights {
        if !value.is_finite() || value < 0.0 {
            return Err(AllocationError::InvalidWeight {
                channel: channel.clone(),
                value,
            });
        }
    }
    if let Some((affinity, affinity_weights)) = request.affinity_inputs() {
        for (dimension, &value) in affinity_weights {
            if !value.is_finite() {
                return Err(AllocationError::InvalidAffinity {
                    dimension: dimension.clone(),
                    value,
                });
            }
        }
        for (dimension, scores) in affinity {
            if let Some(&value) = scores.values().find(|v| !v.is_finite()) {
                return Err(AllocationError::InvalidAffinity {
                    dimension: dimension.clone(),
                    value,
                });
            }
        }
    }
    Ok(())
}

/// Distinct allocated channels with no combined-weight entry.
fn absent_channel_count(request: &AllocationRequest<'_>, combined: &CombinedWeights) -> f64 {
    let absent: FxHashSet<&str> = request
        .channels
        .iter()
        .map(Channel::as_str)
        .filter(|c| !combined.weights.contains_key(*c))
        .collect();
    absent.len() as f64
}

fn zero_outcome(
    request: &AllocationRequest<'_>,
    combined: &CombinedWeights,
    stage1: &[f64],
    stage2: Option<EfficiencyTable>,
) -> AllocationOutcome {
    let allocation = request
        .channels
        .iter()
        .map(|c| (c.clone(), 0.0))
        .collect();
    let breakdown = request
        .channels
        .iter()
        .zip(stage1)
        .enumerate()
        .map(|(i, (channel, &weight))| {
            let cost_entry = stage2.as_ref().map(|table| table.entries[i]);
            ChannelBreakdown {
                channel: channel.clone(),
                base_weight: request.weights.get(channel.as_str()).copied(),
                affinity_score: combined.affinity_score(channel.as_str()),
                combined_weight: weight,
                cost: cost_entry.map(|e| e.cost),
                efficiency: cost_entry.map(|e| e.efficiency),
                effective_weight: cost_entry.map_or(weight, |e| weight * e.efficiency),
                share: 0.0,
                amount: 0.0,
            }
        })
        .collect();
    let (warnings, cost_metric) = match stage2 {
        Some(table) => (table.warnings, Some(table.metric)),
        None => (Vec::new(), None),
    };

    AllocationOutcome {
        allocation,
        warnings,
        breakdown,
        cost_metric,
    }
}
