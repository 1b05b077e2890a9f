use super::calculations::add_days;
use crate::models::{CropModel, HarvestWindow, StageTimeline, SuitabilityAssessment, YieldEstimate};

/// Harvest window after the final stage, with catalog yield scaled by area.
///
/// Conditions never change the yield amount; they only set its confidence.
pub fn estimate_harvest(
    crop: &CropModel,
    timeline: &StageTimeline,
    assessment: &SuitabilityAssessment,
    area_hectares: f64,
    grace_days: i64,
) -> HarvestWindow {
    let grace_days = grace_days.max(0);
    let earliest = timeline.end_date();

    HarvestWindow {
        earliest,
        optimal: add_days(earliest, grace_days / 2),
        latest: add_days(earliest, grace_days),
        estimated_yield: YieldEstimate {
            amount: crop.expected_yield.amount_per_hectare * area_hectares,
            unit: crop.expected_yield.unit.clone(),
            confidence: (assessment.overall_score / 100.0).clamp(0.0, 1.0),
        },
        harvesting_method: crop.post_harvest.harvesting_method.clone(),
        post_harvest_care: crop.post_harvest.post_harvest_care.clone(),
        storage: crop.post_harvest.storage.clone(),
    }
}
