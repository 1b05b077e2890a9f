//! Fixtures shared by the logic tests.

use super::rules::RuleContext;
use super::suitability::SuitabilityAssessor;
use super::timeline::build_timeline;
use crate::models::{
    CropCategory, CropModel, DataSource, Difficulty, ExpectedYield, FertilizationEvent,
    GrowthStage, Hemisphere, Location, PlantingWindow, PostHarvest, Precipitation, SeasonTable,
    SeasonWindow, SoilMoisture, StageTimeline, SuitabilityAssessment, TelemetrySnapshot,
    Temperature, ToleranceRange, Tolerances, VegetationIndex,
};
use chrono::{NaiveDate, TimeZone, Utc};

fn stage(name: &str, days: u32, care: &[&str]) -> GrowthStage {
    GrowthStage {
        name: name.to_string(),
        duration_days: days,
        description: format!("{} stage", name),
        activities: Vec::new(),
        care_instructions: care.iter().map(|c| c.to_string()).collect(),
        expected_signs: Vec::new(),
    }
}

fn fertilizer(offset_days: i64, nutrient: &str, amount_per_hectare: f64) -> FertilizationEvent {
    FertilizationEvent {
        offset_days,
        nutrient: nutrient.to_string(),
        amount_per_hectare,
        unit: "kg".to_string(),
        method: "Broadcast".to_string(),
        instructions: String::new(),
    }
}

/// Wheat: 7/30/35/15/28/5 day stages totalling 120.
pub fn sample_crop() -> CropModel {
    CropModel {
        name: "Wheat".to_string(),
        aliases: vec!["gehun".to_string()],
        scientific_name: "Triticum aestivum".to_string(),
        category: CropCategory::Cereal,
        difficulty: Difficulty::Easy,
        growing_period_days: 120,
        stages: vec![
            stage("Germination", 7, &["Keep topsoil moist"]),
            stage("Tillering", 30, &["First irrigation at crown root initiation"]),
            stage("Stem Extension", 35, &[]),
            stage("Heading", 15, &[]),
            stage("Grain Filling", 28, &["Irrigate at milk and dough stages"]),
            stage(
                "Maturity",
                5,
                &["Stop irrigation so grain can dry down before harvest"],
            ),
        ],
        fertilization: vec![
            fertilizer(0, "Nitrogen", 40.0),
            fertilizer(0, "Phosphorus", 60.0),
            fertilizer(45, "Nitrogen", 80.0),
        ],
        water_requirement: Some(25.0),
        irrigation_timing: None,
        tolerances: Tolerances {
            temperature_c: ToleranceRange::new(5.0, 29.0, 17.0),
            soil_moisture_percent: ToleranceRange::new(25.0, 75.0, 50.0),
            soil_ph: ToleranceRange::new(6.0, 7.5, 6.5),
        },
        seasons: SeasonTable {
            northern: vec![SeasonWindow::new(11, 12, "Rabi")],
            southern: vec![SeasonWindow::new(5, 6, "Autumn")],
        },
        expected_yield: ExpectedYield {
            amount_per_hectare: 3.5,
            unit: "tonnes".to_string(),
        },
        post_harvest: PostHarvest {
            harvesting_method: "Combine harvester or sickle".to_string(),
            post_harvest_care: vec!["Dry grain to 12% moisture".to_string()],
            storage: "Cool, dry, pest-proof bins".to_string(),
        },
    }
}

/// Telemetry sitting on every wheat optimum.
pub fn sample_telemetry() -> TelemetrySnapshot {
    TelemetrySnapshot {
        timestamp: Utc.with_ymd_and_hms(2025, 10, 17, 6, 0, 0).unwrap(),
        location: Location::new(28.6, 77.2),
        source: DataSource::Manual,
        vegetation: VegetationIndex {
            ndvi: 0.65,
            evi: Some(0.4),
        },
        soil_moisture: SoilMoisture::new(50.0),
        temperature: Temperature {
            current_c: 17.0,
            min_c: 11.0,
            max_c: 24.0,
        },
        precipitation: Precipitation {
            last_7_days_mm: 12.0,
            last_30_days_mm: 48.0,
        },
        humidity_percent: 55.0,
        cloud_cover_percent: 20.0,
        defaulted_fields: Vec::new(),
    }
}

/// Owned inputs for building a `RuleContext`.
pub struct RuleFixture {
    pub crop: CropModel,
    pub telemetry: TelemetrySnapshot,
    pub assessment: SuitabilityAssessment,
    pub window: PlantingWindow,
    pub timeline: StageTimeline,
}

impl RuleFixture {
    pub fn new() -> Self {
        let crop = sample_crop();
        let telemetry = sample_telemetry();
        let assessment = SuitabilityAssessor::new(0.6).assess(&crop, &telemetry);
        let planting = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        let window = PlantingWindow {
            hemisphere: Hemisphere::Northern,
            window: SeasonWindow::new(11, 12, "Rabi"),
            earliest_start: NaiveDate::from_ymd_opt(2025, 10, 27).unwrap(),
            optimal_start: planting,
            optimal_end: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            latest_end: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            days_from_now: 15,
            currently_open: false,
            risk_flags: Vec::new(),
        };
        let timeline = build_timeline(&crop, planting);

        Self {
            crop,
            telemetry,
            assessment,
            window,
            timeline,
        }
    }

    /// Re-run the assessment after editing telemetry.
    pub fn reassess(&mut self) {
        self.assessment = SuitabilityAssessor::new(0.6).assess(&self.crop, &self.telemetry);
    }

    pub fn context(&self) -> RuleContext<'_> {
        RuleContext {
            crop: &self.crop,
            telemetry: &self.telemetry,
            assessment: &self.assessment,
            planting_window: &self.window,
            timeline: &self.timeline,
        }
    }
}
