//! Stage 1: combine base weights with audience affinity.

use mixplan_core::constants::NEUTRAL_AFFINITY_SCORE;
use mixplan_core::types::{AffinityMap, AffinityWeights, Channel, FxHashMap, WeightMap};

/// Weights after the affinity pass.
#[derive(Debug, Clone)]
pub struct CombinedWeights {
    /// Copy of the base weights with affinity-adjusted entries written over
    /// the allocated channels. Keys outside the channel list are carried
    /// untouched and still count towards `total()`.
    pub weights: WeightMap,
    /// Per-channel affinity score, present only when affinity data was used.
    pub affinity_scores: Option<FxHashMap<Channel, f64>>,
}

impl CombinedWeights {
    /// Sum over every key, not just the allocated channels.
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Combined weight of a channel, or `missing` when it has none.
    pub fn get(&self, channel: &str, missing: f64) -> f64 {
        self.weights.get(channel).copied().unwrap_or(missing)
    }

    pub fn affinity_score(&self, channel: &str) -> Option<f64> {
        self.affinity_scores
            .as_ref()
            .and_then(|scores| scores.get(channel).copied())
    }
}

/// Weighted affinity score of one channel:
/// `Σ_d affinity_weights[d] × affinity[d][channel]`.
///
/// Dimensions without a weight contribute nothing; a dimension with no
/// score for the channel contributes its weight at the neutral score 1.0.
pub fn affinity_score(
    channel: &str,
    affinity: &AffinityMap,
    affinity_weights: &AffinityWeights,
) -> f64 {
    affinity
        .iter()
        .map(|(dimension, scores)| {
            let weight = affinity_weights.get(dimension).copied().unwrap_or(0.0);
            let score = scores
                .get(channel)
                .copied()
                .unwrap_or(NEUTRAL_AFFINITY_SCORE);
            weight * score
        })
        .sum()
}

/// Run the affinity pass.
///
/// With affinity data, every allocated channel's entry is replaced by
/// `base × affinity_score`, where a channel missing from `weights` takes
/// `affinity_missing_weight` as its base. Without affinity data the base
/// weights pass through unchanged.
pub fn combine(
    channels: &[Channel],
    weights: &WeightMap,
    affinity: Option<(&AffinityMap, &AffinityWeights)>,
    affinity_missing_weight: f64,
) -> CombinedWeights {
    let mut combined = weights.clone();

    let Some((affinity, affinity_weights)) = affinity else {
        return CombinedWeights {
            weights: combined,
            affinity_scores: None,
        };
    };

    let mut scores = FxHashMap::default();
    for channel in channels {
        let score = affinity_score(channel.as_str(), affinity, affinity_weights);
        let base = weights
            .get(channel.as_str())
            .copied()
            .unwrap_or(affinity_missing_weight);
        combined.insert(channel.clone(), base * score);
        scores.insert(channel.clone(), score);
    }

    CombinedWeights {
        weights: combined,
        affinity_scores: Some(scores),
    }
}
