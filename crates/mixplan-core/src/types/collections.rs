//! Re-exports of performance-oriented collection types and the map aliases
//! the allocator consumes.

pub use rustc_hash::{FxHashMap, FxHashSet};

use super::Channel;

/// Channel → base priority weight.
pub type WeightMap = FxHashMap<Channel, f64>;

/// Affinity dimension (e.g. `demo`, `behavioral`) → channel → score.
/// Scores near 1.0 are neutral.
pub type AffinityMap = FxHashMap<String, FxHashMap<Channel, f64>>;

/// Affinity dimension → weight of that dimension in the combined score.
pub type AffinityWeights = FxHashMap<String, f64>;
