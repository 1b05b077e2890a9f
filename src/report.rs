//! Plain-text rendering of a generated calendar.

use crate::models::{CropInfo, GeneratedCalendar, Recommendation};
use serde::Serialize;
use std::fmt::Write;

const RULE: &str = "────────────────────────────────────────────────────────────";

pub fn render_calendar(calendar: &GeneratedCalendar, recommendations: &[Recommendation]) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_calendar(&mut out, calendar, recommendations);
    out
}

fn write_calendar(
    out: &mut String,
    calendar: &GeneratedCalendar,
    recommendations: &[Recommendation],
) -> std::fmt::Result {
    let request = &calendar.request;
    writeln!(out, "{} ({})", calendar.crop, calendar.scientific_name)?;
    writeln!(
        out,
        "Location {}  |  {:.2} ha  |  generated {}",
        request.location,
        request.area_hectares,
        calendar.generated_at.format("%Y-%m-%d %H:%M UTC")
    )?;

    let window = &calendar.planting_window;
    section(out, "Planting window")?;
    writeln!(
        out,
        "  {} season ({} hemisphere)",
        window.window.season, window.hemisphere
    )?;
    writeln!(
        out,
        "  Optimal   {} to {}",
        window.optimal_start, window.optimal_end
    )?;
    writeln!(
        out,
        "  Extended  {} to {}",
        window.earliest_start, window.latest_end
    )?;
    let timing = match window.days_from_now {
        0 => "opens today".to_string(),
        d if d > 0 => format!("opens in {} days", d),
        d => format!("opened {} days ago", -d),
    };
    writeln!(out, "  Status    {}", timing)?;
    for flag in &window.risk_flags {
        writeln!(out, "  ⚠ {}", flag)?;
    }

    section(out, "Growth stages")?;
    for stage in &calendar.timeline.stages {
        writeln!(
            out,
            "  {:<20} {} to {}  ({} days)",
            stage.name, stage.start_date, stage.end_date, stage.duration_days
        )?;
        for care in &stage.care_instructions {
            writeln!(out, "      - {}", care)?;
        }
    }

    let resources = &calendar.resources;
    section(out, "Fertilization")?;
    if resources.fertilization.is_empty() {
        writeln!(out, "  No fertilizer applications scheduled")?;
    }
    for item in &resources.fertilization {
        writeln!(
            out,
            "  {}  {:<12} {:>9.1} {:<4} {:<14} [{}]",
            item.date, item.nutrient, item.amount, item.unit, item.method, item.stage
        )?;
    }
    for total in &resources.totals.fertilizer {
        writeln!(
            out,
            "  Total {:<12} {:>9.1} {}",
            total.nutrient, total.amount, total.unit
        )?;
    }

    section(out, "Irrigation")?;
    if resources.irrigation.is_empty() {
        writeln!(out, "  No irrigation scheduled")?;
    } else if let (Some(first), Some(last)) =
        (resources.irrigation.first(), resources.irrigation.last())
    {
        writeln!(
            out,
            "  {} weekly events, {} to {} ({})",
            resources.totals.irrigation_events, first.start_date, last.end_date, first.timing
        )?;
        writeln!(
            out,
            "  {:.0} L per week, {:.0} L total",
            first.volume_liters, resources.totals.irrigation_liters
        )?;
    }

    let harvest = &calendar.harvest;
    section(out, "Harvest")?;
    writeln!(
        out,
        "  Earliest {}  |  optimal {}  |  latest {}",
        harvest.earliest, harvest.optimal, harvest.latest
    )?;
    writeln!(
        out,
        "  Expected yield {:.1} {} (confidence {:.0}%)",
        harvest.estimated_yield.amount,
        harvest.estimated_yield.unit,
        harvest.estimated_yield.confidence * 100.0
    )?;
    if !harvest.harvesting_method.is_empty() {
        writeln!(out, "  Method: {}", harvest.harvesting_method)?;
    }
    if !harvest.storage.is_empty() {
        writeln!(out, "  Storage: {}", harvest.storage)?;
    }

    let assessment = &calendar.suitability;
    section(out, "Field suitability")?;
    for dimension in assessment.dimensions() {
        writeln!(
            out,
            "  {:<20} {:>5.1}",
            dimension.dimension.as_str(),
            dimension.score
        )?;
        for issue in &dimension.issues {
            writeln!(out, "      - {}", issue)?;
        }
    }
    writeln!(
        out,
        "  Overall {:.1} ({}), {} confidence, source {}",
        assessment.overall_score, assessment.readiness, assessment.confidence, assessment.data_source
    )?;

    section(out, "Recommendations")?;
    if recommendations.is_empty() {
        writeln!(out, "  None")?;
    }
    for rec in recommendations {
        writeln!(
            out,
            "  {} [{}] {}",
            rec.priority.symbol(),
            rec.priority,
            rec.title
        )?;
        writeln!(out, "      {}", rec.description)?;
        for detail in &rec.details {
            writeln!(out, "      - {}", detail)?;
        }
        if let Some(ref action) = rec.suggested_action {
            writeln!(out, "      → {}", action)?;
        }
    }

    Ok(())
}

/// JSON document for `generate --json`: the calendar plus the merged
/// recommendation list shown in the text report.
#[derive(Debug, Serialize)]
pub struct CalendarDocument<'a> {
    pub calendar: &'a GeneratedCalendar,
    pub recommendations: &'a [Recommendation],
}

pub fn render_calendar_json(
    calendar: &GeneratedCalendar,
    recommendations: &[Recommendation],
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&CalendarDocument {
        calendar,
        recommendations,
    })
}

fn section(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", RULE)
}

pub fn render_crop_list(crops: &[CropInfo]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:<24} {:<10} {:>6}  {}",
        "Crop", "Scientific name", "Category", "Days", "Difficulty"
    );
    for crop in crops {
        let _ = writeln!(
            out,
            "{:<12} {:<24} {:<10} {:>6}  {}",
            crop.name, crop.scientific_name, crop.category, crop.growing_period_days, crop.difficulty
        );
    }
    out
}
