//! BenchmarkProvider trait.
//!
//! In standalone mode, the static reference table is used. A host that has
//! its own cost data implements the trait and hands the planner that table
//! instead. The allocator itself only ever sees a `CostBenchmarks` value.

use crate::types::CostBenchmarks;

/// Provider of cost benchmarks for the efficiency stage.
///
/// Default implementation returns the static reference table.
pub trait BenchmarkProvider: Send + Sync {
    fn benchmarks(&self) -> CostBenchmarks {
        CostBenchmarks::standard()
    }
}

/// Reference table plus optional per-channel overrides.
#[derive(Debug, Clone, Default)]
pub struct StaticBenchmarkProvider {
    overrides: CostBenchmarks,
}

impl StaticBenchmarkProvider {
    /// Provider that layers `overrides` over the reference table.
    pub fn with_overrides(overrides: CostBenchmarks) -> Self {
        Self { overrides }
    }
}

impl BenchmarkProvider for StaticBenchmarkProvider {
    fn benchmarks(&self) -> CostBenchmarks {
        let mut table = CostBenchmarks::standard();
        table.merge(&self.overrides);
        table
    }
}
