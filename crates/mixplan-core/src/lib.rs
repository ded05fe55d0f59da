//! # mixplan-core
//!
//! Foundation crate for the Mixplan budget allocator.
//! Defines the channel/weight/benchmark/allocation types, errors, config,
//! tracing setup, constants, and the collaborator traits.
//! The engine crate depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod traits;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::MixplanConfig;
pub use errors::{AllocationError, ConfigError, MixplanErrorCode, PlanError};
pub use types::{
    AffinityMap, AffinityWeights, Allocation, Channel, CostBenchmarks, CostMetric, CostRow,
    WeightMap,
};
