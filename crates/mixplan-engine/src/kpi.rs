//! KPI vocabulary, measurement frameworks per funnel phase, and the
//! KPI → cost metric rule used by the efficiency stage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use mixplan_core::types::CostMetric;

/// Funnel phase the plan targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FunnelPhase {
    #[default]
    #[serde(rename = "Full Funnel", alias = "full_funnel")]
    FullFunnel,
    #[serde(alias = "awareness")]
    Awareness,
    #[serde(alias = "consideration")]
    Consideration,
    #[serde(alias = "conversion")]
    Conversion,
    #[serde(alias = "other")]
    Other,
}

impl FunnelPhase {
    pub const ALL: [FunnelPhase; 5] = [
        Self::FullFunnel,
        Self::Awareness,
        Self::Consideration,
        Self::Conversion,
        Self::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::FullFunnel => "Full Funnel",
            Self::Awareness => "Awareness",
            Self::Consideration => "Consideration",
            Self::Conversion => "Conversion",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for FunnelPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FunnelPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        Self::ALL
            .into_iter()
            .find(|phase| phase.name().to_lowercase() == normalized)
            .ok_or_else(|| format!("unknown funnel phase: {s}"))
    }
}

/// Business objective the plan serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BusinessObjective {
    #[default]
    #[serde(alias = "awareness")]
    Awareness,
    #[serde(alias = "sales")]
    Sales,
    #[serde(alias = "leads")]
    Leads,
    #[serde(alias = "engagement")]
    Engagement,
    #[serde(alias = "other")]
    Other,
}

impl BusinessObjective {
    pub fn name(self) -> &'static str {
        match self {
            Self::Awareness => "Awareness",
            Self::Sales => "Sales",
            Self::Leads => "Leads",
            Self::Engagement => "Engagement",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for BusinessObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const AWARENESS_KPIS: &[&str] = &[
    "Reach",
    "Impressions",
    "CPM",
    "Video Views",
    "Brand Lift",
    "Viewable Impressions",
    "Audio Listens",
];

const CONSIDERATION_KPIS: &[&str] = &[
    "Video Completion Rate",
    "VCR (Video Completion Rate)",
    "Audio Completes",
    "Engagement Rate",
    "Clicks",
    "CTR",
    "Social Actions",
];

const CONVERSION_KPIS: &[&str] = &[
    "Conversions",
    "ROAS",
    "CPA",
    "CPC",
    "CPL",
    "Revenue",
    "Signups",
    "Form Fills",
    "Cost per Completed View (CPCV)",
    "Cost per Action (CPA)",
    "Cost per Lead (CPL)",
    "Other",
];

const OTHER_KPIS: &[&str] = &["Custom"];

/// KPIs tracked for a funnel phase, from headline to tactical metrics.
/// Full Funnel is Awareness, then Consideration, then Conversion.
pub fn measurement_framework(phase: FunnelPhase) -> Vec<&'static str> {
    match phase {
        FunnelPhase::Awareness => AWARENESS_KPIS.to_vec(),
        FunnelPhase::Consideration => CONSIDERATION_KPIS.to_vec(),
        FunnelPhase::Conversion => CONVERSION_KPIS.to_vec(),
        FunnelPhase::FullFunnel => AWARENESS_KPIS
            .iter()
            .chain(CONSIDERATION_KPIS)
            .chain(CONVERSION_KPIS)
            .copied()
            .collect(),
        FunnelPhase::Other => OTHER_KPIS.to_vec(),
    }
}

/// Cost column for a KPI focus: CPM when the KPI (case-insensitive,
/// trimmed) is one of `reach_kpis`, otherwise CPC.
///
/// `reach_kpis` must already be lowercased.
pub fn cost_metric_for(kpi_focus: &str, reach_kpis: &[String]) -> CostMetric {
    let kpi = kpi_focus.trim().to_lowercase();
    if reach_kpis.iter().any(|k| *k == kpi) {
        CostMetric::Cpm
    } else {
        CostMetric::Cpc
    }
}
