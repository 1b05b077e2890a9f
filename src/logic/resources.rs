use super::calculations::{add_days, days_between, hectares_to_square_meters};
use crate::models::{
    CropModel, FertilizationItem, IrrigationItem, NutrientTotal, ResourceSchedule,
    ResourceTotals, StageRef, StageTimeline,
};
use regex_lite::Regex;
use std::sync::OnceLock;

pub const DEFAULT_IRRIGATION_TIMING: &str = "Early morning";

/// Care-instruction phrasing that ends irrigation for the final stage.
const IRRIGATION_CUTOFF_PATTERN: &str = r"(?i)\b(reduce|reduced|reducing|stop|stopped|cease|ceased|withhold|withheld|halt|suspend)\b[^.]*\b(irrigation|irrigating|watering|water)\b|\b(irrigation|watering)\b[^.]*\b(reduced|stopped|ceased|withheld|halted|suspended)\b|\bno\s+(further\s+)?(irrigation|watering)\b";

fn irrigation_cutoff() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(IRRIGATION_CUTOFF_PATTERN).ok())
        .as_ref()
}

/// True when any instruction asks to reduce or stop irrigation.
pub fn mentions_irrigation_cutoff(instructions: &[String]) -> bool {
    let Some(re) = irrigation_cutoff() else {
        return false;
    };
    instructions.iter().any(|i| re.is_match(i))
}

/// Expand per-hectare templates into dated, area-scaled line items.
pub fn build_resource_schedule(
    crop: &CropModel,
    timeline: &StageTimeline,
    area_hectares: f64,
) -> ResourceSchedule {
    let fertilization = fertilization_items(crop, timeline, area_hectares);
    let irrigation = irrigation_items(crop, timeline, area_hectares);
    let totals = totals(&fertilization, &irrigation);

    ResourceSchedule {
        fertilization,
        irrigation,
        totals,
    }
}

fn fertilization_items(
    crop: &CropModel,
    timeline: &StageTimeline,
    area_hectares: f64,
) -> Vec<FertilizationItem> {
    crop.fertilization
        .iter()
        .map(|template| {
            let date = add_days(timeline.planting_date, template.offset_days);
            FertilizationItem {
                date,
                offset_days: template.offset_days,
                stage: stage_for(timeline, date, template.offset_days <= 0),
                nutrient: template.nutrient.clone(),
                amount: template.amount_per_hectare * area_hectares,
                unit: template.unit.clone(),
                method: template.method.clone(),
                instructions: template.instructions.clone(),
            }
        })
        .collect()
}

fn stage_for(timeline: &StageTimeline, date: chrono::NaiveDate, basal: bool) -> StageRef {
    if basal {
        return StageRef::PrePlanting;
    }
    match timeline.stage_at(date) {
        Some(stage) => StageRef::Stage(stage.name.clone()),
        None if date > timeline.end_date() => StageRef::PostMaturity,
        None => StageRef::PrePlanting,
    }
}

/// Weekly irrigation from planting through the last stage.
///
/// Volume per week is the crop's L/m²/week requirement over the whole area.
/// When the final stage's care instructions call for reduced or ceased
/// irrigation, the schedule ends the day before that stage starts. A week cut
/// short by the season end or the cutoff is charged pro rata by its days.
fn irrigation_items(
    crop: &CropModel,
    timeline: &StageTimeline,
    area_hectares: f64,
) -> Vec<IrrigationItem> {
    let Some(weekly) = crop.water_requirement.filter(|w| *w > 0.0) else {
        return Vec::new();
    };
    let Some(final_stage) = timeline.final_stage() else {
        return Vec::new();
    };

    let season_end = if mentions_irrigation_cutoff(&final_stage.care_instructions) {
        add_days(final_stage.start_date, -1)
    } else {
        timeline.end_date()
    };
    let weekly_liters = weekly * hectares_to_square_meters(area_hectares);
    let timing = crop
        .irrigation_timing
        .clone()
        .unwrap_or_else(|| DEFAULT_IRRIGATION_TIMING.to_string());

    let mut items = Vec::new();
    let mut week: u32 = 1;
    let mut start = timeline.planting_date;

    while start <= season_end {
        let end = add_days(start, 6).min(season_end);
        let days = days_between(start, end) + 1;
        items.push(IrrigationItem {
            week,
            start_date: start,
            end_date: end,
            stage: stage_for(timeline, start, false),
            volume_liters: weekly_liters * days as f64 / 7.0,
            timing: timing.clone(),
        });

        if end >= season_end {
            break;
        }
        week += 1;
        start = add_days(start, 7);
    }

    items
}

fn totals(fertilization: &[FertilizationItem], irrigation: &[IrrigationItem]) -> ResourceTotals {
    let mut fertilizer: Vec<NutrientTotal> = Vec::new();
    for item in fertilization {
        match fertilizer
            .iter_mut()
            .find(|t| t.nutrient == item.nutrient && t.unit == item.unit)
        {
            Some(total) => total.amount += item.amount,
            None => fertilizer.push(NutrientTotal {
                nutrient: item.nutrient.clone(),
                unit: item.unit.clone(),
                amount: item.amount,
            }),
        }
    }

    ResourceTotals {
        fertilizer,
        irrigation_liters: irrigation.iter().map(|i| i.volume_liters).sum(),
        irrigation_events: irrigation.len(),
    }
}
