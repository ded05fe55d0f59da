//! Collaborator traits at the seams of the allocator.

pub mod benchmark_provider;
pub mod narrative;

pub use benchmark_provider::{BenchmarkProvider, StaticBenchmarkProvider};
pub use narrative::NarrativeGenerator;
