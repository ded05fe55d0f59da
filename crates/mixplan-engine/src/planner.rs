//! Media planner: turns a structured plan request into a full media plan
//! (measurement framework, reserve split, channel mix, narrative).

use serde::{Deserialize, Serialize};

use mixplan_core::config::MixplanConfig;
use mixplan_core::errors::{AllocationWarning, PlanError};
use mixplan_core::traits::{BenchmarkProvider, NarrativeGenerator, StaticBenchmarkProvider};
use mixplan_core::types::{AffinityMap, AffinityWeights, Allocation, Channel, CostMetric};

use crate::allocator::{AllocationRequest, Allocator, ChannelBreakdown};
use crate::kpi::{self, BusinessObjective, FunnelPhase};
use crate::mix::{self, ChannelMixRow};
use crate::narrative::TemplateNarrativeGenerator;
use crate::selection::ChannelSelection;

/// Planner inputs, one field per form control that matters to the plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaPlanRequest {
    pub business_objective: BusinessObjective,
    pub funnel_phase: FunnelPhase,
    pub total_budget: f64,
    /// How far (in percent) the budget may flex either way.
    pub budget_flex_percent: f64,
    /// Headline success KPIs. Carried through to the plan.
    pub success_kpis: Vec<String>,
    /// Metrics to track. Empty means the funnel phase's full framework.
    pub tracked_metrics: Vec<String>,
    /// KPI that drives the cost metric. Defaults to the first tracked metric.
    pub kpi_focus: Option<String>,
    pub must_have_channels: Vec<Channel>,
    pub avoid_channels: Vec<Channel>,
    pub affinity: Option<AffinityMap>,
    /// Dimension weights for `affinity`. Falls back to the configured ones.
    pub affinity_weights: Option<AffinityWeights>,
    pub notes: PlanNotes,
}

/// Free-text brief carried through to the plan untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanNotes {
    pub audience_demographics: String,
    pub audience_psychographics: String,
    pub commerce_bias: String,
    pub brand_vibe: Vec<String>,
    pub competitor_activity: String,
    pub market_factors: String,
    pub geos: String,
    pub legal_notes: String,
}

impl MediaPlanRequest {
    /// Parse a request from TOML.
    pub fn from_toml(toml_str: &str) -> Result<Self, PlanError> {
        toml::from_str(toml_str).map_err(|e| PlanError::InvalidRequest {
            field: "<toml>".to_string(),
            message: e.to_string(),
        })
    }

    /// Parse a request from JSON.
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        serde_json::from_str(json).map_err(|e| PlanError::InvalidRequest {
            field: "<json>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Budget the plan may flex between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

/// Budget held for must-have channels versus the rest. Reported alongside
/// the allocation; the allocator itself proportions the full budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetReserve {
    pub must_have: f64,
    pub other: f64,
}

/// A complete media plan.
#[derive(Debug, Clone, Serialize)]
pub struct MediaPlan {
    pub business_objective: BusinessObjective,
    pub funnel_phase: FunnelPhase,
    pub success_kpis: Vec<String>,
    pub measurement_framework: Vec<String>,
    pub kpi_focus: Option<String>,
    /// Cost column used, when the efficiency stage ran.
    pub cost_metric: Option<CostMetric>,
    pub total_budget: f64,
    pub budget_range: BudgetRange,
    pub reserve: BudgetReserve,
    pub allocation: Allocation,
    pub mix: Vec<ChannelMixRow>,
    pub breakdown: Vec<ChannelBreakdown>,
    pub warnings: Vec<AllocationWarning>,
    pub narrative: String,
    pub notes: PlanNotes,
}

/// Builds media plans. Holds no per-plan state; one planner can be shared
/// across threads.
pub struct MediaPlanner {
    config: MixplanConfig,
    allocator: Allocator,
    benchmarks: Box<dyn BenchmarkProvider>,
    narrative: Box<dyn NarrativeGenerator>,
}

impl MediaPlanner {
    /// Planner using the static benchmark table (with any configured
    /// overrides) and the template narrative generator.
    pub fn new(config: MixplanConfig) -> Self {
        let allocator = Allocator::from_config(&config.allocation);
        let benchmarks = StaticBenchmarkProvider::with_overrides(config.benchmarks.clone());
        Self {
            config,
            allocator,
            benchmarks: Box::new(benchmarks),
            narrative: Box::new(TemplateNarrativeGenerator),
        }
    }

    pub fn with_benchmark_provider(mut self, provider: impl BenchmarkProvider + 'static) -> Self {
        self.benchmarks = Box::new(provider);
        self
    }

    pub fn with_narrative_generator(
        mut self,
        generator: impl NarrativeGenerator + 'static,
    ) -> Self {
        self.narrative = Box::new(generator);
        self
    }

    pub fn config(&self) -> &MixplanConfig {
        &self.config
    }

    pub fn allocator(&self) -> &Allocator {
        &self.allocator
    }

    /// Build a plan for `request`.
    pub fn plan(&self, request: &MediaPlanRequest) -> Result<MediaPlan, PlanError> {
        self.validate(request)?;

        let measurement_framework: Vec<String> = if request.tracked_metrics.is_empty() {
            kpi::measurement_framework(request.funnel_phase)
                .into_iter()
                .map(str::to_string)
                .collect()
        } else {
            request.tracked_metrics.clone()
        };
        let kpi_focus = request
            .kpi_focus
            .clone()
            .or_else(|| measurement_framework.first().cloned());

        let budget = request.total_budget;
        let flex = request.budget_flex_percent / 100.0;
        let budget_range = BudgetRange {
            min: budget * (1.0 - flex),
            max: budget * (1.0 + flex),
        };
        let must_have_budget = if request.must_have_channels.is_empty() {
            0.0
        } else {
            budget * self.config.planner.effective_must_have_reserve_share()
        };
        let reserve = BudgetReserve {
            must_have: must_have_budget,
            other: budget - must_have_budget,
        };

        let catalog = self
            .config
            .planner
            .effective_channels()
            .into_iter()
            .map(Channel::from)
            .collect();
        let selected = ChannelSelection::with_catalog(catalog)
            .must_have(request.must_have_channels.iter().cloned())
            .avoid(request.avoid_channels.iter().cloned())
            .must_have_multiplier(self.config.allocation.effective_must_have_multiplier())
            .resolve();
        if selected.channels.is_empty() {
            return Err(PlanError::InvalidRequest {
                field: "avoid_channels".to_string(),
                message: "every channel is avoided".to_string(),
            });
        }

        let benchmarks = self.benchmarks.benchmarks();
        let affinity_weights = match (&request.affinity, &request.affinity_weights) {
            (Some(_), Some(weights)) => Some(weights.clone()),
            (Some(_), None) => Some(self.config.affinity.effective_dimension_weights()),
            _ => None,
        };

        let mut allocation_request =
            AllocationRequest::new(&selected.channels, &selected.weights, budget);
        if self.config.planner.effective_use_benchmarks() {
            allocation_request = allocation_request.with_cost_benchmarks(&benchmarks);
        }
        if let Some(kpi) = kpi_focus.as_deref() {
            allocation_request = allocation_request.with_kpi_focus(kpi);
        }
        if let (Some(affinity), Some(weights)) = (&request.affinity, &affinity_weights) {
            allocation_request = allocation_request.with_affinity(affinity, weights);
        }

        let outcome = self.allocator.allocate(&allocation_request)?;
        let mix = mix::mix_rows(&outcome.allocation, budget);
        let narrative = self.narrative.generate(&outcome.allocation);

        tracing::info!(
            channel_count = selected.channels.len(),
            total_budget = budget,
            kpi_focus = kpi_focus.as_deref().unwrap_or("none"),
            warning_count = outcome.warnings.len(),
            "media plan generated"
        );

        Ok(MediaPlan {
            business_objective: request.business_objective,
            funnel_phase: request.funnel_phase,
            success_kpis: request.success_kpis.clone(),
            measurement_framework,
            kpi_focus,
            cost_metric: outcome.cost_metric,
            total_budget: budget,
            budget_range,
            reserve,
            allocation: outcome.allocation,
            mix,
            breakdown: outcome.breakdown,
            warnings: outcome.warnings,
            narrative,
            notes: request.notes.clone(),
        })
    }

    fn validate(&self, request: &MediaPlanRequest) -> Result<(), PlanError> {
        let min_budget = self.config.planner.effective_min_budget();
        if !request.total_budget.is_finite() || request.total_budget < min_budget {
            return Err(PlanError::InvalidRequest {
                field: "total_budget".to_string(),
                message: format!("must be at least {min_budget}, got {}", request.total_budget),
            });
        }
        let max_flex = self.config.planner.effective_max_budget_flex_percent();
        if !(0.0..=max_flex).contains(&request.budget_flex_percent) {
            return Err(PlanError::InvalidRequest {
                field: "budget_flex_percent".to_string(),
                message: format!(
                    "must be between 0 and {max_flex}, got {}",
                    request.budget_flex_percent
                ),
            });
        }
        Ok(())
    }
}

impl Default for MediaPlanner {
    fn default() -> Self {
        Self::new(MixplanConfig::default())
    }
}
