use super::calculations::{add_days, days_between, first_day_of_month, last_day_of_month, month_of};
use crate::error::{CropCalError, Result};
use crate::models::{CropModel, Hemisphere, PlantingWindow, RiskFlag, SeasonWindow, TelemetrySnapshot};
use chrono::{Datelike, NaiveDate};

/// Selects the planting window for a crop, hemisphere and date.
///
/// Window choice:
/// - Any window containing the current month is open; among open windows the
///   one whose current occurrence started earliest wins
/// - With nothing open, the nearest upcoming occurrence wins
/// - Ties keep catalog order
#[derive(Debug, Clone, Copy)]
pub struct SeasonResolver {
    grace_days: i64,
    out_of_season_days: i64,
}

/// A concrete dated occurrence of a season window.
#[derive(Debug, Clone)]
struct Occurrence<'a> {
    window: &'a SeasonWindow,
    start: NaiveDate,
    end: NaiveDate,
    open: bool,
}

impl SeasonResolver {
    pub fn new(grace_days: i64, out_of_season_days: i64) -> Self {
        Self {
            grace_days,
            out_of_season_days,
        }
    }

    pub fn resolve(
        &self,
        crop: &CropModel,
        hemisphere: Hemisphere,
        today: NaiveDate,
        telemetry: &TelemetrySnapshot,
    ) -> Result<PlantingWindow> {
        let occurrences: Vec<Occurrence> = crop
            .seasons
            .for_hemisphere(hemisphere)
            .iter()
            .filter_map(|w| occurrence(w, today))
            .collect();

        let chosen = occurrences
            .iter()
            .filter(|o| o.open)
            .min_by_key(|o| o.start)
            .or_else(|| occurrences.iter().min_by_key(|o| o.start))
            .ok_or_else(|| CropCalError::UnsupportedRegion {
                crop: crop.name.clone(),
                hemisphere: hemisphere.to_string(),
            })?;

        let days_from_now = days_between(today, chosen.start);

        let mut risk_flags = Vec::new();
        if !chosen.open && days_from_now > self.out_of_season_days {
            risk_flags.push(RiskFlag::OutOfSeason);
        }
        if environmental_risk(crop, telemetry) {
            risk_flags.push(RiskFlag::EnvironmentalRisk);
        }
        if days_from_now < 0 {
            risk_flags.push(RiskFlag::WindowPartiallyElapsed);
        }

        tracing::debug!(
            crop = %crop.name,
            %hemisphere,
            season = %chosen.window.season,
            start = %chosen.start,
            open = chosen.open,
            days_from_now,
            "resolved planting window"
        );

        Ok(PlantingWindow {
            hemisphere,
            window: chosen.window.clone(),
            earliest_start: add_days(chosen.start, -self.grace_days),
            optimal_start: chosen.start,
            optimal_end: chosen.end,
            latest_end: add_days(chosen.end, self.grace_days),
            days_from_now,
            currently_open: chosen.open,
            risk_flags,
        })
    }
}

fn occurrence(window: &SeasonWindow, today: NaiveDate) -> Option<Occurrence<'_>> {
    if !window.has_valid_months() {
        return None;
    }

    let month = month_of(today);
    let year = today.year();
    let open = window.contains_month(month);

    let start_year = if open {
        // In the tail of a wrapping window the occurrence began last year
        if window.wraps_year() && month <= window.end_month {
            year - 1
        } else {
            year
        }
    } else if window.start_month > month {
        year
    } else {
        year + 1
    };

    let end_year = if window.wraps_year() {
        start_year + 1
    } else {
        start_year
    };

    Some(Occurrence {
        window,
        start: first_day_of_month(start_year, window.start_month)?,
        end: last_day_of_month(end_year, window.end_month)?,
        open,
    })
}

/// Temperature or soil moisture outside the crop's tolerance.
fn environmental_risk(crop: &CropModel, telemetry: &TelemetrySnapshot) -> bool {
    !crop
        .tolerances
        .temperature_c
        .contains(telemetry.temperature.current_c)
        || !crop
            .tolerances
            .soil_moisture_percent
            .contains(telemetry.soil_moisture.percent)
}
