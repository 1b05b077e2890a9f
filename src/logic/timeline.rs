use super::calculations::add_days;
use crate::models::{CropModel, ScheduledStage, StageTimeline};
use chrono::NaiveDate;

/// Chain a crop's stages into consecutive dated ranges starting at `planting_date`.
///
/// Stage durations are the ground truth for the total span. A disagreement with
/// the declared growing period is logged and otherwise ignored. A zero-length
/// stage occupies no dates: it ends the day before it starts and the next
/// stage begins on the same day.
pub fn build_timeline(crop: &CropModel, planting_date: NaiveDate) -> StageTimeline {
    let mut stages = Vec::with_capacity(crop.stages.len());
    let mut cursor = planting_date;

    for stage in &crop.stages {
        let duration = stage.duration_days;
        let end = add_days(cursor, i64::from(duration) - 1);

        stages.push(ScheduledStage {
            name: stage.name.clone(),
            start_date: cursor,
            end_date: end,
            duration_days: duration,
            description: stage.description.clone(),
            activities: stage.activities.clone(),
            care_instructions: stage.care_instructions.clone(),
            expected_signs: stage.expected_signs.clone(),
        });

        cursor = add_days(end, 1);
    }

    let total_days = crop.stage_total_days();
    if total_days != crop.growing_period_days {
        tracing::debug!(
            crop = %crop.name,
            stage_days = total_days,
            declared = crop.growing_period_days,
            "stage durations differ from declared growing period; using stage sum"
        );
    }

    StageTimeline {
        planting_date,
        stages,
        total_days,
        declared_growing_period_days: crop.growing_period_days,
    }
}
