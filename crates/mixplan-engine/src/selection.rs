//! Channel selection: turn catalog + must-have + avoid choices into the
//! channel list and weight map the allocator consumes.

use mixplan_core::constants::{
    DEFAULT_CHANNEL_WEIGHT, DEFAULT_MUST_HAVE_MULTIPLIER, HOLISTIC_CHANNELS,
};
use mixplan_core::types::{Channel, FxHashSet, WeightMap};

/// A planner's channel choices.
#[derive(Debug, Clone)]
pub struct ChannelSelection {
    /// Channels on offer, in display order.
    pub catalog: Vec<Channel>,
    /// Channels that must receive extra weight.
    pub must_have: Vec<Channel>,
    /// Channels excluded from the plan.
    pub avoid: Vec<Channel>,
    /// Weight multiplier for must-have channels.
    pub must_have_multiplier: f64,
}

/// Allocator inputs derived from a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedChannels {
    pub channels: Vec<Channel>,
    /// Holds exactly the entries of `channels`.
    pub weights: WeightMap,
}

impl ChannelSelection {
    /// Selection over the holistic catalog with nothing pinned or avoided.
    pub fn holistic() -> Self {
        Self::with_catalog(HOLISTIC_CHANNELS.iter().map(|c| Channel::from(*c)).collect())
    }

    pub fn with_catalog(catalog: Vec<Channel>) -> Self {
        Self {
            catalog,
            must_have: Vec::new(),
            avoid: Vec::new(),
            must_have_multiplier: DEFAULT_MUST_HAVE_MULTIPLIER,
        }
    }

    pub fn must_have(mut self, channels: impl IntoIterator<Item = Channel>) -> Self {
        self.must_have.extend(channels);
        self
    }

    pub fn avoid(mut self, channels: impl IntoIterator<Item = Channel>) -> Self {
        self.avoid.extend(channels);
        self
    }

    pub fn must_have_multiplier(mut self, multiplier: f64) -> Self {
        self.must_have_multiplier = multiplier;
        self
    }

    /// Resolve the selection.
    ///
    /// Every non-avoided catalog channel gets the default weight, in catalog
    /// order; a must-have channel outside the catalog is appended after it.
    /// Must-have weights are multiplied once each. Avoid beats must-have, and
    /// an avoided channel never appears in `weights`.
    pub fn resolve(&self) -> SelectedChannels {
        let avoid: FxHashSet<&str> = self.avoid.iter().map(Channel::as_str).collect();
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut channels = Vec::with_capacity(self.catalog.len());
        let mut weights = WeightMap::default();

        for channel in self.catalog.iter().chain(&self.must_have) {
            if avoid.contains(channel.as_str()) || !seen.insert(channel.as_str()) {
                continue;
            }
            channels.push(channel.clone());
            weights.insert(channel.clone(), DEFAULT_CHANNEL_WEIGHT);
        }

        let mut boosted: FxHashSet<&str> = FxHashSet::default();
        for channel in &self.must_have {
            if avoid.contains(channel.as_str()) {
                tracing::warn!(
                    channel = %channel,
                    "channel marked both must-have and avoid; avoiding it"
                );
                continue;
            }
            if !boosted.insert(channel.as_str()) {
                continue;
            }
            if let Some(weight) = weights.get_mut(channel.as_str()) {
                *weight *= self.must_have_multiplier;
            }
        }

        SelectedChannels { channels, weights }
    }
}

impl Default for ChannelSelection {
    fn default() -> Self {
        Self::holistic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(channels: &[Channel]) -> Vec<&str> {
        channels.iter().map(Channel::as_str).collect()
    }

    #[test]
    fn test_holistic_defaults_to_equal_weights() {
        let selected = ChannelSelection::holistic().resolve();
        assert_eq!(selected.channels.len(), 11);
        assert!(selected.weights.values().all(|w| *w == 1.0));
        assert_eq!(names(&selected.channels)[0], "Search");
    }

    #[test]
    fn test_must_have_doubles_and_avoid_excludes() {
        let selected = ChannelSelection::holistic()
            .must_have([Channel::from("Video")])
            .avoid([Channel::from("OOH"), Channel::from("Other")])
            .resolve();
        assert_eq!(selected.channels.len(), 9);
        assert!(!names(&selected.channels).contains(&"OOH"));
        assert_eq!(selected.weights.get("Video"), Some(&2.0));
        assert_eq!(selected.weights.get("Search"), Some(&1.0));
        assert_eq!(selected.weights.len(), selected.channels.len());
    }

    #[test]
    fn test_avoid_wins_over_must_have() {
        let selected = ChannelSelection::holistic()
            .must_have([Channel::from("Audio")])
            .avoid([Channel::from("Audio")])
            .resolve();
        assert!(!names(&selected.channels).contains(&"Audio"));
        assert!(!selected.weights.contains_key("Audio"));
    }

    #[test]
    fn test_must_have_outside_catalog_appended() {
        let selected = ChannelSelection::with_catalog(vec![Channel::from("Search")])
            .must_have([Channel::from("Podcast"), Channel::from("Podcast")])
            .must_have_multiplier(3.0)
            .resolve();
        assert_eq!(names(&selected.channels), vec!["Search", "Podcast"]);
        assert_eq!(selected.weights.get("Podcast"), Some(&3.0));
    }
}
