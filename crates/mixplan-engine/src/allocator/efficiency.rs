//! Stage 2: cost-efficiency factors.

use mixplan_core::constants::NEUTRAL_COST;
use mixplan_core::errors::{AllocationError, AllocationWarning};
use mixplan_core::types::{Channel, CostBenchmarks, CostMetric};

/// Cost and efficiency of one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelEfficiency {
    /// Benchmark cost, or the neutral cost when the channel has no row.
    pub cost: f64,
    /// `1 / cost`. Cheaper channels score higher.
    pub efficiency: f64,
    /// Whether `cost` came from the benchmark table.
    pub benchmarked: bool,
}

/// Efficiency factors for a channel list, aligned by index.
#[derive(Debug, Clone)]
pub struct EfficiencyTable {
    pub metric: CostMetric,
    pub entries: Vec<ChannelEfficiency>,
    pub warnings: Vec<AllocationWarning>,
}

/// Look up each channel's cost in `metric` and invert it.
///
/// A channel without a row takes the neutral cost and raises a
/// `MissingBenchmark` warning. A row whose cost is not a finite positive
/// number, or whose inverse overflows, is rejected.
pub fn evaluate(
    channels: &[Channel],
    benchmarks: &CostBenchmarks,
    metric: CostMetric,
) -> Result<EfficiencyTable, AllocationError> {
    let costs = benchmarks.costs_for(metric);
    let mut entries = Vec::with_capacity(channels.len());
    let mut warnings = Vec::new();

    for channel in channels {
        let entry = match costs.get(channel.as_str()) {
            Some(&cost) => {
                let efficiency = 1.0 / cost;
                // Subnormal costs pass the sign check but overflow on inversion.
                if !cost.is_finite() || cost <= 0.0 || !efficiency.is_finite() {
                    return Err(AllocationError::InvalidCost {
                        channel: channel.clone(),
                        metric,
                        value: cost,
                    });
                }
                ChannelEfficiency {
                    cost,
                    efficiency,
                    benchmarked: true,
                }
            }
            None => {
                tracing::warn!(
                    channel = %channel,
                    cost_metric = %metric,
                    substituted = NEUTRAL_COST,
                    "missing cost benchmark, using neutral cost"
                );
                warnings.push(AllocationWarning::MissingBenchmark {
                    channel: channel.clone(),
                    metric,
                    substituted: NEUTRAL_COST,
                });
                ChannelEfficiency {
                    cost: NEUTRAL_COST,
                    efficiency: 1.0 / NEUTRAL_COST,
                    benchmarked: false,
                }
            }
        };
        entries.push(entry);
    }

    Ok(EfficiencyTable {
        metric,
        entries,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixplan_core::types::CostRow;

    #[test]
    fn test_efficiency_is_inverse_cost() {
        let channels = vec![Channel::from("Search"), Channel::from("Audio")];
        let table = evaluate(&channels, &CostBenchmarks::standard(), CostMetric::Cpc).unwrap();
        assert_eq!(table.entries[0].efficiency, 0.5);
        assert!((table.entries[1].efficiency - 1.0 / 1.1).abs() < 1e-12);
        assert!(table.warnings.is_empty());
    }

    #[test]
    fn test_missing_row_is_neutral_with_warning() {
        let channels = vec![Channel::from("Podcast")];
        let table = evaluate(&channels, &CostBenchmarks::standard(), CostMetric::Cpm).unwrap();
        assert_eq!(
            table.entries[0],
            ChannelEfficiency {
                cost: 1.0,
                efficiency: 1.0,
                benchmarked: false,
            }
        );
        assert_eq!(table.warnings.len(), 1);
        assert_eq!(table.warnings[0].channel().as_str(), "Podcast");
    }

    #[test]
    fn test_zero_cost_rejected() {
        let mut benchmarks = CostBenchmarks::new();
        benchmarks.insert("OOH", CostRow::new(0.0, 3.0));
        let err = evaluate(&[Channel::from("OOH")], &benchmarks, CostMetric::Cpm).unwrap_err();
        assert!(matches!(
            err,
            AllocationError::InvalidCost {
                metric: CostMetric::Cpm,
                ..
            }
        ));
        // The CPC column is fine.
        assert!(evaluate(&[Channel::from("OOH")], &benchmarks, CostMetric::Cpc).is_ok());
    }

    #[test]
    fn test_subnormal_cost_rejected() {
        let mut benchmarks = CostBenchmarks::new();
        benchmarks.insert("Search", CostRow::new(30.0, 1e-320));
        let err = evaluate(&[Channel::from("Search")], &benchmarks, CostMetric::Cpc).unwrap_err();
        assert!(matches!(
            err,
            AllocationError::InvalidCost {
                metric: CostMetric::Cpc,
                value,
                ..
            } if value == 1e-320
        ));
    }
}
