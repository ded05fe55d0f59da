//! # mixplan-engine
//!
//! Media budget allocation: weighted split → affinity pass → cost-efficiency pass.
//! Plan assembly on top: channel selection, measurement framework, reserve split,
//! mix rows and a template narrative.

pub mod allocator;
pub mod kpi;
pub mod mix;
pub mod narrative;
pub mod planner;
pub mod selection;

pub use allocator::{
    allocate, AllocationOutcome, AllocationRequest, Allocator, ChannelBreakdown,
};
pub use kpi::{BusinessObjective, FunnelPhase};
pub use mix::ChannelMixRow;
pub use narrative::{build_narrative, MixNarrative, TemplateNarrativeGenerator};
pub use planner::{MediaPlan, MediaPlanRequest, MediaPlanner, PlanNotes};
pub use selection::{ChannelSelection, SelectedChannels};
