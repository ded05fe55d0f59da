//! Media planner tests: request parsing, validation, plan assembly.

use mixplan_core::config::MixplanConfig;
use mixplan_core::errors::{AllocationWarning, MixplanErrorCode, PlanError};
use mixplan_core::traits::{BenchmarkProvider, NarrativeGenerator};
use mixplan_core::types::{Allocation, Channel, CostBenchmarks, CostMetric};
use mixplan_engine::{FunnelPhase, MediaPlanRequest, MediaPlanner};

fn request(total_budget: f64) -> MediaPlanRequest {
    MediaPlanRequest {
        total_budget,
        budget_flex_percent: 20.0,
        ..Default::default()
    }
}

fn invalid_field(err: PlanError) -> String {
    match err {
        PlanError::InvalidRequest { field, .. } => field,
        other => panic!("expected InvalidRequest, got {other:?}"),
    }
}

#[test]
fn test_default_plan_covers_holistic_catalog() {
    let plan = MediaPlanner::default().plan(&request(10_000.0)).unwrap();

    assert_eq!(plan.allocation.len(), 11);
    assert!(plan.allocation.sums_to(10_000.0));
    assert_eq!(plan.mix.len(), 11);
    assert_eq!(plan.breakdown.len(), 11);
    assert!(plan.warnings.is_empty());
    assert_eq!(plan.funnel_phase, FunnelPhase::FullFunnel);
    assert_eq!(plan.kpi_focus.as_deref(), Some("Reach"));
    assert_eq!(plan.cost_metric, Some(CostMetric::Cpm));
    assert!((plan.budget_range.min - 8_000.0).abs() < 1e-9);
    assert!((plan.budget_range.max - 12_000.0).abs() < 1e-9);
    assert_eq!(plan.reserve.must_have, 0.0);
    assert_eq!(plan.reserve.other, 10_000.0);
    assert!(!plan.narrative.is_empty());

    let percent: f64 = plan.mix.iter().map(|row| row.percent).sum();
    assert!((percent - 100.0).abs() < 1e-9);
}

#[test]
fn test_cheapest_cpm_channel_leads_by_default() {
    let plan = MediaPlanner::default().plan(&request(10_000.0)).unwrap();
    // Audio has the lowest CPM in the reference table.
    let audio = plan.allocation.get("Audio").unwrap();
    assert!(plan.allocation.iter().all(|(_, amount)| amount <= audio));
}

#[test]
fn test_must_have_and_avoid() {
    let mut req = request(10_000.0);
    req.must_have_channels = vec![Channel::from("Video")];
    req.avoid_channels = vec![Channel::from("OOH"), Channel::from("Other")];
    let plan = MediaPlanner::default().plan(&req).unwrap();

    assert_eq!(plan.allocation.len(), 9);
    assert_eq!(plan.allocation.get("OOH"), None);
    assert_eq!(plan.reserve.must_have, 5_000.0);
    assert_eq!(plan.reserve.other, 5_000.0);

    let video = plan.breakdown.iter().find(|b| b.channel.as_str() == "Video").unwrap();
    assert_eq!(video.base_weight, Some(2.0));
    assert!(plan.allocation.sums_to(10_000.0));
}

#[test]
fn test_tracked_metrics_drive_cost_metric() {
    let mut req = request(5_000.0);
    req.tracked_metrics = vec!["Clicks".to_string(), "CTR".to_string()];
    let plan = MediaPlanner::default().plan(&req).unwrap();
    assert_eq!(plan.measurement_framework, vec!["Clicks", "CTR"]);
    assert_eq!(plan.kpi_focus.as_deref(), Some("Clicks"));
    assert_eq!(plan.cost_metric, Some(CostMetric::Cpc));

    req.kpi_focus = Some("Impressions".to_string());
    let plan = MediaPlanner::default().plan(&req).unwrap();
    assert_eq!(plan.cost_metric, Some(CostMetric::Cpm));
}

#[test]
fn test_benchmarks_disabled_gives_equal_split() {
    let mut config = MixplanConfig::default();
    config.planner.use_benchmarks = Some(false);
    let plan = MediaPlanner::new(config).plan(&request(11_000.0)).unwrap();

    assert_eq!(plan.cost_metric, None);
    for (_, amount) in plan.allocation.iter() {
        assert!((amount - 1_000.0).abs() < 1e-9);
    }
}

#[test]
fn test_configured_catalog_and_multiplier() {
    let config = MixplanConfig::from_toml(
        r#"
[allocation]
must_have_multiplier = 3.0

[planner]
channels = ["Search", "Display"]
use_benchmarks = false
"#,
    )
    .unwrap();
    let mut req = request(4_000.0);
    req.must_have_channels = vec![Channel::from("Search")];
    let plan = MediaPlanner::new(config).plan(&req).unwrap();

    assert_eq!(plan.allocation.get("Search"), Some(3_000.0));
    assert_eq!(plan.allocation.get("Display"), Some(1_000.0));
}

#[test]
fn test_budget_below_minimum_rejected() {
    let err = MediaPlanner::default().plan(&request(999.0)).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_REQUEST");
    assert_eq!(invalid_field(err), "total_budget");
}

#[test]
fn test_flex_out_of_range_rejected() {
    let mut req = request(5_000.0);
    req.budget_flex_percent = 60.0;
    let err = MediaPlanner::default().plan(&req).unwrap_err();
    assert_eq!(invalid_field(err), "budget_flex_percent");

    req.budget_flex_percent = -1.0;
    let err = MediaPlanner::default().plan(&req).unwrap_err();
    assert_eq!(invalid_field(err), "budget_flex_percent");
}

#[test]
fn test_everything_avoided_rejected() {
    let mut req = request(5_000.0);
    req.avoid_channels = mixplan_core::constants::HOLISTIC_CHANNELS
        .iter()
        .map(|c| Channel::from(*c))
        .collect();
    let err = MediaPlanner::default().plan(&req).unwrap_err();
    assert_eq!(invalid_field(err), "avoid_channels");
}

#[test]
fn test_affinity_uses_configured_dimension_weights() {
    let req = MediaPlanRequest::from_json(
        r#"{
            "total_budget": 2000,
            "tracked_metrics": ["Clicks"],
            "affinity": {
                "demo": {"Search": 2.0},
                "behavioral": {"Search": 2.0},
                "contextual": {"Search": 2.0}
            }
        }"#,
    )
    .unwrap();
    let mut config = MixplanConfig::default();
    config.planner.channels = vec!["Search".to_string(), "Display".to_string()];
    config.planner.use_benchmarks = Some(false);
    let plan = MediaPlanner::new(config).plan(&req).unwrap();

    // Search scores 2.0 on every dimension; Display is neutral.
    let search = plan.allocation.get("Search").unwrap();
    let display = plan.allocation.get("Display").unwrap();
    assert!((search - 2.0 * display).abs() < 1e-9);
    assert!((search + display - 2_000.0).abs() < 1e-9);
}

#[test]
fn test_request_from_json() {
    let req = MediaPlanRequest::from_json(
        r#"{
            "business_objective": "Sales",
            "funnel_phase": "Conversion",
            "total_budget": 5000,
            "must_have_channels": ["Search"],
            "notes": {"geos": "US, CA"}
        }"#,
    )
    .unwrap();
    assert_eq!(req.funnel_phase, FunnelPhase::Conversion);
    assert_eq!(req.must_have_channels, vec![Channel::from("Search")]);
    assert_eq!(req.notes.geos, "US, CA");

    let plan = MediaPlanner::default().plan(&req).unwrap();
    assert_eq!(plan.kpi_focus.as_deref(), Some("Conversions"));
    assert_eq!(plan.cost_metric, Some(CostMetric::Cpc));
    assert_eq!(plan.notes.geos, "US, CA");
}

#[test]
fn test_request_from_toml() {
    let req = MediaPlanRequest::from_toml(
        r#"
funnel_phase = "Awareness"
total_budget = 25000.0
budget_flex_percent = 10.0
avoid_channels = ["OOH"]
"#,
    )
    .unwrap();
    assert_eq!(req.funnel_phase, FunnelPhase::Awareness);
    assert_eq!(req.avoid_channels, vec![Channel::from("OOH")]);
}

#[test]
fn test_malformed_request_rejected() {
    let err = MediaPlanRequest::from_json("{\"total_budget\": \"lots\"}").unwrap_err();
    assert_eq!(invalid_field(err), "<json>");
    let err = MediaPlanRequest::from_toml("total_budget = [").unwrap_err();
    assert_eq!(invalid_field(err), "<toml>");
}

struct SearchOnlyBenchmarks;

impl BenchmarkProvider for SearchOnlyBenchmarks {
    fn benchmarks(&self) -> CostBenchmarks {
        CostBenchmarks::standard()
            .iter()
            .filter(|(channel, _)| channel.as_str() == "Search")
            .map(|(channel, row)| (channel.clone(), *row))
            .collect()
    }
}

#[test]
fn test_missing_benchmarks_surface_as_warnings() {
    let mut config = MixplanConfig::default();
    config.planner.channels = vec!["Search".to_string(), "Podcast".to_string()];
    let planner = MediaPlanner::new(config).with_benchmark_provider(SearchOnlyBenchmarks);
    let plan = planner.plan(&request(3_100.0)).unwrap();

    assert_eq!(plan.warnings.len(), 1);
    assert_eq!(plan.warnings[0].channel().as_str(), "Podcast");
    assert!(matches!(
        plan.warnings[0],
        AllocationWarning::MissingBenchmark { metric: CostMetric::Cpm, .. }
    ));
    // Search CPM 30 against the neutral cost 1.
    assert!((plan.allocation.get("Podcast").unwrap() - 3_000.0).abs() < 1e-9);
}

struct FixedNarrative;

impl NarrativeGenerator for FixedNarrative {
    fn generate(&self, allocation: &Allocation) -> String {
        format!("{} channels", allocation.len())
    }
}

#[test]
fn test_custom_narrative_generator() {
    let planner = MediaPlanner::default().with_narrative_generator(FixedNarrative);
    let plan = planner.plan(&request(10_000.0)).unwrap();
    assert_eq!(plan.narrative, "11 channels");
}

#[test]
fn test_plan_serializes_to_json() {
    let mut config = MixplanConfig::default();
    config.planner.channels = vec!["Search".to_string(), "Podcast".to_string()];
    let planner = MediaPlanner::new(config).with_benchmark_provider(SearchOnlyBenchmarks);
    let plan = planner.plan(&request(3_100.0)).unwrap();
    let json = serde_json::to_value(&plan).unwrap();

    assert_eq!(json["funnel_phase"], "Full Funnel");
    assert_eq!(json["cost_metric"], "CPM");
    assert_eq!(json["warnings"][0]["kind"], "missing_benchmark");
    assert_eq!(json["warnings"][0]["channel"], "Podcast");
    assert!(json["allocation"]["Search"].is_number());
    assert_eq!(json["mix"].as_array().map(Vec::len), Some(2));
}
