//! Audience affinity configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_AFFINITY_DIMENSION_WEIGHTS;
use crate::types::AffinityWeights;

/// Default weighting of affinity dimensions.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AffinityConfig {
    /// Dimension → weight. Default: demo 0.4, behavioral 0.4, contextual 0.2.
    #[serde(default)]
    pub dimension_weights: AffinityWeights,
}

impl AffinityConfig {
    /// Returns the configured dimension weights, or the defaults when none
    /// are configured.
    pub fn effective_dimension_weights(&self) -> AffinityWeights {
        if self.dimension_weights.is_empty() {
            DEFAULT_AFFINITY_DIMENSION_WEIGHTS
                .iter()
                .map(|&(dim, w)| (dim.to_string(), w))
                .collect()
        } else {
            self.dimension_weights.clone()
        }
    }
}
