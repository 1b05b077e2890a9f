pub mod drainage;
pub mod engine;
pub mod favorable_conditions;
pub mod frost_protection;
pub mod low_suitability;
pub mod out_of_season;

pub use engine::RulesEngine;

use crate::models::{
    CropModel, PlantingWindow, Recommendation, StageTimeline, SuitabilityAssessment,
    TelemetrySnapshot,
};

/// Everything a rule may look at for one calendar.
pub struct RuleContext<'a> {
    pub crop: &'a CropModel,
    pub telemetry: &'a TelemetrySnapshot,
    pub assessment: &'a SuitabilityAssessment,
    pub planting_window: &'a PlantingWindow,
    pub timeline: &'a StageTimeline,
}

/// Trait for advisory rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return a recommendation if conditions are met
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation>;
}
