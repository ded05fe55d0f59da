//! Property tests for the allocator: conservation, non-negativity, order,
//! efficiency direction.

use proptest::prelude::*;

use mixplan_core::types::{Channel, CostBenchmarks, CostRow, WeightMap};
use mixplan_engine::{allocate, AllocationRequest, Allocator};

fn channel_list(n: usize) -> Vec<Channel> {
    (0..n).map(|i| Channel::new(format!("ch{i}"))).collect()
}

fn weight_map(channels: &[Channel], weights: &[f64]) -> WeightMap {
    channels.iter().cloned().zip(weights.iter().copied()).collect()
}

// Weight vectors with at least one strictly positive entry.
fn weights_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0_f64..100.0, 1..12)
        .prop_filter("needs a positive weight", |w| w.iter().any(|x| *x > 0.0))
}

// =============================================================================
// Conservation: amounts sum to the budget
// =============================================================================
proptest! {
    #[test]
    fn prop_conservation(
        weights in weights_strategy(),
        budget in 0.0_f64..1_000_000.0,
    ) {
        let channels = channel_list(weights.len());
        let map = weight_map(&channels, &weights);
        let allocation = allocate(&channels, &map, budget, None, None, None, None).unwrap();
        prop_assert!(allocation.sums_to(budget), "total {} vs budget {}", allocation.total(), budget);
    }
}

proptest! {
    #[test]
    fn prop_conservation_with_costs(
        weights in weights_strategy(),
        costs in prop::collection::vec(0.01_f64..50.0, 12),
        budget in 1.0_f64..1_000_000.0,
        reach in any::<bool>(),
    ) {
        let channels = channel_list(weights.len());
        let map = weight_map(&channels, &weights);
        let table: CostBenchmarks = channels
            .iter()
            .zip(&costs)
            .map(|(c, &cost)| (c.clone(), CostRow::new(cost, cost / 10.0)))
            .collect();
        let kpi = if reach { "Reach" } else { "Clicks" };
        let allocation =
            allocate(&channels, &map, budget, Some(&table), Some(kpi), None, None).unwrap();
        prop_assert!(allocation.sums_to(budget));
        prop_assert!(allocation.iter().all(|(_, amount)| amount >= 0.0));
    }
}

// =============================================================================
// Non-negativity and order
// =============================================================================
proptest! {
    #[test]
    fn prop_non_negative_and_ordered(
        weights in weights_strategy(),
        budget in 0.0_f64..1_000_000.0,
    ) {
        let channels = channel_list(weights.len());
        let map = weight_map(&channels, &weights);
        let allocation = allocate(&channels, &map, budget, None, None, None, None).unwrap();
        prop_assert!(allocation.iter().all(|(_, amount)| amount >= 0.0));
        prop_assert!(allocation.channels().eq(channels.iter()));
    }
}

// =============================================================================
// Proportionality: a heavier weight never gets less
// =============================================================================
proptest! {
    #[test]
    fn prop_monotone_in_weight(
        weights in weights_strategy(),
        budget in 1.0_f64..1_000_000.0,
    ) {
        let channels = channel_list(weights.len());
        let map = weight_map(&channels, &weights);
        let allocation = allocate(&channels, &map, budget, None, None, None, None).unwrap();
        for (i, a) in channels.iter().enumerate() {
            for b in &channels[i + 1..] {
                if map[a] > map[b] {
                    prop_assert!(allocation.get(a.as_str()) >= allocation.get(b.as_str()));
                }
            }
        }
    }
}

// =============================================================================
// Efficiency direction: at equal weight, the cheaper channel gets more
// =============================================================================
proptest! {
    #[test]
    fn prop_cheaper_channel_gets_more(
        cheap in 0.01_f64..10.0,
        extra in 0.01_f64..10.0,
        weight in 0.1_f64..10.0,
        budget in 1.0_f64..1_000_000.0,
    ) {
        let channels = channel_list(2);
        let map = weight_map(&channels, &[weight, weight]);
        let table: CostBenchmarks = [
            (channels[0].clone(), CostRow::new(10.0, cheap)),
            (channels[1].clone(), CostRow::new(10.0, cheap + extra)),
        ]
        .into_iter()
        .collect();
        let request = AllocationRequest::new(&channels, &map, budget)
            .with_cost_benchmarks(&table)
            .with_kpi_focus("Clicks");
        let outcome = Allocator::new().allocate(&request).unwrap();
        prop_assert!(outcome.allocation.get("ch0") > outcome.allocation.get("ch1"));
    }
}
