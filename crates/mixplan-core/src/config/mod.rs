//! Configuration system for Mixplan.
//! TOML-based, 4-layer resolution: CLI > env > project > user > defaults.

pub mod affinity_config;
pub mod allocation_config;
pub mod mixplan_config;
pub mod planner_config;

pub use affinity_config::AffinityConfig;
pub use allocation_config::AllocationConfig;
pub use mixplan_config::{CliOverrides, MixplanConfig};
pub use planner_config::PlannerConfig;
