//! Data model for the allocator.
//! Channel identifiers, weight and affinity maps, cost benchmarks, allocations.

pub mod allocation;
pub mod benchmarks;
pub mod channel;
pub mod collections;

pub use allocation::Allocation;
pub use benchmarks::{CostBenchmarks, CostMetric, CostRow};
pub use channel::Channel;
pub use collections::{AffinityMap, AffinityWeights, FxHashMap, FxHashSet, WeightMap};
