//! Shared constants for the Mixplan allocator.

/// Mixplan version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Weight substituted for a channel missing from the weight map while
/// combining base weights with affinity scores.
pub const DEFAULT_AFFINITY_MISSING_WEIGHT: f64 = 1.0;

/// Weight substituted for a channel missing from the weight map when no
/// affinity data is supplied. A missing channel receives nothing.
pub const DEFAULT_BASE_MISSING_WEIGHT: f64 = 0.0;

/// Affinity score substituted when a dimension has no entry for a channel.
pub const NEUTRAL_AFFINITY_SCORE: f64 = 1.0;

/// Cost substituted when a channel has no benchmark row.
pub const NEUTRAL_COST: f64 = 1.0;

/// Base weight given to every selected channel.
pub const DEFAULT_CHANNEL_WEIGHT: f64 = 1.0;

/// Multiplier applied to must-have channel weights.
pub const DEFAULT_MUST_HAVE_MULTIPLIER: f64 = 2.0;

/// Share of the total budget reported as reserved for must-have channels.
pub const DEFAULT_MUST_HAVE_RESERVE_SHARE: f64 = 0.5;

/// Smallest total budget the planner accepts.
pub const DEFAULT_MIN_BUDGET: f64 = 1_000.0;

/// Largest budget flexibility percentage the planner accepts.
pub const DEFAULT_MAX_BUDGET_FLEX_PERCENT: f64 = 50.0;

/// KPIs whose cost driver is impressions (CPM). Everything else uses CPC.
pub const DEFAULT_REACH_KPIS: &[&str] = &["reach", "impressions"];

/// Channel share at or above which the narrative calls a channel a lead.
pub const LEAD_SHARE_THRESHOLD: f64 = 0.20;

/// Channel share at or above which the narrative calls a channel support.
pub const SUPPORT_SHARE_THRESHOLD: f64 = 0.08;

/// Relative tolerance used when checking that an allocation sums to budget.
pub const SUM_TOLERANCE: f64 = 1e-9;

/// Holistic channel catalog offered to planners, in display order.
pub const HOLISTIC_CHANNELS: &[&str] = &[
    "Search",
    "Paid Social",
    "Retail Media",
    "Display",
    "Video",
    "Audio",
    "Influencer",
    "Affiliate",
    "CTV/OTT",
    "OOH",
    "Other",
];

/// Reference benchmarks as `(channel, cpc, cpm)`.
pub const STANDARD_BENCHMARKS: &[(&str, f64, f64)] = &[
    ("Search", 2.0, 30.0),
    ("Paid Social", 1.5, 12.0),
    ("Retail Media", 1.8, 18.0),
    ("Display", 1.2, 10.0),
    ("Video", 1.3, 20.0),
    ("Audio", 1.1, 8.0),
    ("Influencer", 2.5, 25.0),
    ("Affiliate", 2.2, 22.0),
    ("CTV/OTT", 2.8, 28.0),
    ("OOH", 3.0, 35.0),
    ("Other", 2.0, 15.0),
];

/// Affinity dimension weights used when neither the request nor config
/// supplies any, as `(dimension, weight)`.
pub const DEFAULT_AFFINITY_DIMENSION_WEIGHTS: &[(&str, f64)] =
    &[("demo", 0.4), ("behavioral", 0.4), ("contextual", 0.2)];
