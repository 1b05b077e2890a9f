use super::harvest::estimate_harvest;
use super::resources::build_resource_schedule;
use super::rules::{RuleContext, RulesEngine};
use super::season::SeasonResolver;
use super::suitability::SuitabilityAssessor;
use super::timeline::build_timeline;
use crate::catalog::CropRegistry;
use crate::config::EngineConfig;
use crate::error::{CropCalError, Result};
use crate::models::{CalendarRequest, CropInfo, GeneratedCalendar, Hemisphere, TelemetrySnapshot};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Builds crop calendars from the registry, a request and a telemetry snapshot.
///
/// Generation is synchronous and performs no I/O; the registry is shared
/// read-only so one composer can serve any number of callers.
pub struct CalendarComposer {
    registry: Arc<CropRegistry>,
    settings: EngineConfig,
    rules: RulesEngine,
}

impl CalendarComposer {
    pub fn new(registry: Arc<CropRegistry>, settings: EngineConfig) -> Self {
        Self {
            registry,
            settings,
            rules: RulesEngine::new(),
        }
    }

    pub fn registry(&self) -> &CropRegistry {
        &self.registry
    }

    pub fn list_supported_crops(&self) -> Vec<CropInfo> {
        self.registry.list()
    }

    pub fn generate_calendar(
        &self,
        request: &CalendarRequest,
        telemetry: &TelemetrySnapshot,
    ) -> Result<GeneratedCalendar> {
        self.generate_at(request, telemetry, Utc::now())
    }

    /// Generate against a fixed clock. Same inputs, same calendar.
    pub fn generate_at(
        &self,
        request: &CalendarRequest,
        telemetry: &TelemetrySnapshot,
        now: DateTime<Utc>,
    ) -> Result<GeneratedCalendar> {
        if !request.area_hectares.is_finite() || request.area_hectares <= 0.0 {
            return Err(CropCalError::InvalidArea(request.area_hectares));
        }
        if !request.location.is_valid() {
            return Err(CropCalError::InvalidLocation {
                latitude: request.location.latitude,
                longitude: request.location.longitude,
            });
        }

        let crop = self.registry.get(&request.crop)?;
        let hemisphere = Hemisphere::from_latitude(request.location.latitude);
        let today = now.date_naive();

        let planting_window = SeasonResolver::new(
            self.settings.planting_grace_days,
            self.settings.out_of_season_days,
        )
        .resolve(crop, hemisphere, today, telemetry)?;

        let timeline = build_timeline(crop, planting_window.optimal_start);
        let resources = build_resource_schedule(crop, &timeline, request.area_hectares);
        let suitability = SuitabilityAssessor::new(self.settings.healthy_ndvi).assess(crop, telemetry);
        let harvest = estimate_harvest(
            crop,
            &timeline,
            &suitability,
            request.area_hectares,
            self.settings.harvest_grace_days,
        );

        let recommendations = self.rules.evaluate(&RuleContext {
            crop,
            telemetry,
            assessment: &suitability,
            planting_window: &planting_window,
            timeline: &timeline,
        });

        tracing::info!(
            crop = %crop.name,
            planting = %planting_window.optimal_start,
            harvest = %harvest.earliest,
            readiness = %suitability.readiness,
            recommendations = recommendations.len(),
            "calendar generated"
        );

        Ok(GeneratedCalendar {
            crop: crop.name.clone(),
            scientific_name: crop.scientific_name.clone(),
            request: request.clone(),
            planting_window,
            timeline,
            resources,
            harvest,
            suitability,
            recommendations,
            generated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::test_support::{sample_crop, sample_telemetry};
    use crate::models::{DataConfidence, Location, Priority, ReadinessLevel, RiskFlag, StageRef};
    use chrono::{NaiveDate, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn composer() -> CalendarComposer {
        let registry = CropRegistry::from_models(vec![sample_crop()]);
        CalendarComposer::new(Arc::new(registry), EngineConfig::default())
    }

    fn september_20() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 20, 8, 0, 0).unwrap()
    }

    fn wheat_request(area: f64) -> CalendarRequest {
        CalendarRequest::new("wheat", Location::new(28.6, 77.2), area)
    }

    #[test]
    fn oversized_records_are_excluded_instead_of_panicking() {
        let mut long_season = sample_crop();
        long_season.name = "Barley".into();
        long_season.aliases.clear();
        long_season.stages[0].duration_days = 200_000_000;
        let mut far_offset = sample_crop();
        far_offset.name = "Oats".into();
        far_offset.aliases.clear();
        far_offset.fertilization[0].offset_days = 1_000_000_000;

        let registry = CropRegistry::from_models(vec![sample_crop(), long_season, far_offset]);
        assert_eq!(registry.len(), 1);
        let composer = CalendarComposer::new(Arc::new(registry), EngineConfig::default());

        for crop in ["barley", "oats"] {
            let request = CalendarRequest::new(crop, Location::new(28.6, 77.2), 1.0);
            let err = composer
                .generate_at(&request, &sample_telemetry(), september_20())
                .unwrap_err();
            assert!(matches!(err, CropCalError::UnknownCrop(_)));
        }
    }

    #[test]
    fn wheat_calendar_end_to_end() {
        let calendar = composer()
            .generate_at(&wheat_request(2.0), &sample_telemetry(), september_20())
            .unwrap();

        assert_eq!(calendar.crop, "Wheat");
        let window = &calendar.planting_window;
        assert_eq!(window.hemisphere, Hemisphere::Northern);
        assert_eq!(window.optimal_start, date(2025, 11, 1));
        assert_eq!(window.optimal_end, date(2025, 12, 31));
        assert_eq!(window.earliest_start, date(2025, 10, 27));
        assert_eq!(window.latest_end, date(2026, 1, 5));
        assert_eq!(window.days_from_now, 42);
        assert!(!window.currently_open);
        assert!(window.risk_flags.is_empty());

        let tillering = &calendar.timeline.stages[1];
        assert_eq!(tillering.name, "Tillering");
        assert_eq!(tillering.start_date, date(2025, 11, 8));
        assert_eq!(tillering.end_date, date(2025, 12, 7));

        let topdress = calendar
            .resources
            .fertilization
            .iter()
            .find(|f| f.offset_days == 45)
            .unwrap();
        assert_eq!(topdress.date, date(2025, 12, 16));
        assert!((topdress.amount - 160.0).abs() < 1e-9);
        assert_eq!(topdress.stage, StageRef::Stage("Stem Extension".into()));

        assert_eq!(calendar.harvest.earliest, date(2026, 2, 28));
        assert_eq!(calendar.harvest.optimal, date(2026, 3, 3));
        assert_eq!(calendar.harvest.latest, date(2026, 3, 7));
        assert!((calendar.harvest.estimated_yield.amount - 7.0).abs() < 1e-9);

        assert_eq!(calendar.suitability.readiness, ReadinessLevel::Excellent);
        assert_eq!(calendar.suitability.confidence, DataConfidence::High);
        assert_eq!(calendar.recommendations.len(), 1);
        assert_eq!(calendar.recommendations[0].id, "favorable_conditions");
        assert_eq!(calendar.generated_at, september_20());
    }

    #[test]
    fn timeline_has_no_gaps() {
        let calendar = composer()
            .generate_at(&wheat_request(1.0), &sample_telemetry(), september_20())
            .unwrap();
        let stages = &calendar.timeline.stages;
        assert_eq!(stages[0].start_date, calendar.planting_window.optimal_start);
        for pair in stages.windows(2) {
            assert_eq!(pair[0].end_date + chrono::Duration::days(1), pair[1].start_date);
        }
        assert!(calendar.harvest.latest >= calendar.harvest.optimal);
        assert!(calendar.harvest.optimal >= calendar.harvest.earliest);
        assert!(calendar.harvest.earliest >= calendar.timeline.end_date());
    }

    #[test]
    fn saturated_soil_yields_high_priority_recommendation() {
        let mut telemetry = sample_telemetry();
        telemetry.soil_moisture.percent = 95.0;

        let calendar = composer()
            .generate_at(&wheat_request(2.0), &telemetry, september_20())
            .unwrap();

        assert_eq!(calendar.suitability.soil.score, 0.0);
        assert!(calendar
            .planting_window
            .has_risk(RiskFlag::EnvironmentalRisk));

        let first = &calendar.recommendations[0];
        assert_eq!(first.id, "low_suitability");
        assert_eq!(first.priority, Priority::High);
        assert!(calendar.recommendations.iter().any(|r| r.id == "drainage"));
        assert!(!calendar
            .recommendations
            .iter()
            .any(|r| r.id == "favorable_conditions"));
    }

    #[test]
    fn unknown_crop_is_rejected() {
        let request = CalendarRequest::new("quinoa", Location::new(28.6, 77.2), 1.0);
        let err = composer()
            .generate_at(&request, &sample_telemetry(), september_20())
            .unwrap_err();
        assert!(matches!(err, CropCalError::UnknownCrop(_)));
    }

    #[test]
    fn invalid_area_is_rejected_before_lookup() {
        for area in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let request = CalendarRequest::new("quinoa", Location::new(28.6, 77.2), area);
            let err = composer()
                .generate_at(&request, &sample_telemetry(), september_20())
                .unwrap_err();
            assert!(matches!(err, CropCalError::InvalidArea(_)), "area {}", area);
        }
    }

    #[test]
    fn invalid_location_is_rejected() {
        let request = CalendarRequest::new("wheat", Location::new(95.0, 10.0), 1.0);
        let err = composer()
            .generate_at(&request, &sample_telemetry(), september_20())
            .unwrap_err();
        assert!(matches!(err, CropCalError::InvalidLocation { .. }));
    }

    #[test]
    fn missing_hemisphere_windows_is_unsupported_region() {
        let mut crop = sample_crop();
        crop.seasons.southern.clear();
        let composer = CalendarComposer::new(
            Arc::new(CropRegistry::from_models(vec![crop])),
            EngineConfig::default(),
        );
        let request = CalendarRequest::new("wheat", Location::new(-33.9, 18.4), 1.0);
        let err = composer
            .generate_at(&request, &sample_telemetry(), september_20())
            .unwrap_err();
        assert!(matches!(err, CropCalError::UnsupportedRegion { .. }));
    }

    #[test]
    fn resources_scale_linearly_with_area() {
        let composer = composer();
        let one = composer
            .generate_at(&wheat_request(1.0), &sample_telemetry(), september_20())
            .unwrap();
        let two = composer
            .generate_at(&wheat_request(2.0), &sample_telemetry(), september_20())
            .unwrap();

        for (a, b) in one
            .resources
            .fertilization
            .iter()
            .zip(two.resources.fertilization.iter())
        {
            assert!((b.amount - 2.0 * a.amount).abs() < 1e-9);
            assert_eq!(a.date, b.date);
        }
        assert!(
            (two.resources.totals.irrigation_liters - 2.0 * one.resources.totals.irrigation_liters)
                .abs()
                < 1e-6
        );
        assert_eq!(
            one.resources.totals.irrigation_events,
            two.resources.totals.irrigation_events
        );
    }

    #[test]
    fn fallback_telemetry_lowers_confidence_but_still_generates() {
        let telemetry = TelemetrySnapshot::fallback(Location::new(28.6, 77.2));
        let calendar = composer()
            .generate_at(&wheat_request(1.0), &telemetry, september_20())
            .unwrap();
        assert_eq!(calendar.suitability.confidence, DataConfidence::Low);
        assert!(!calendar.timeline.stages.is_empty());
    }

    #[test]
    fn generation_is_deterministic_for_a_fixed_clock() {
        let composer = composer();
        let a = composer
            .generate_at(&wheat_request(1.5), &sample_telemetry(), september_20())
            .unwrap();
        let b = composer
            .generate_at(&wheat_request(1.5), &sample_telemetry(), september_20())
            .unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn builtin_catalog_generates_for_every_crop() {
        let registry = Arc::new(CropRegistry::builtin().unwrap());
        let composer = CalendarComposer::new(registry, EngineConfig::default());
        for info in composer.list_supported_crops() {
            for latitude in [28.6, -33.9] {
                let request = CalendarRequest::new(&info.name, Location::new(latitude, 20.0), 1.0);
                let calendar = composer
                    .generate_at(&request, &sample_telemetry(), september_20())
                    .unwrap();
                assert_eq!(calendar.timeline.total_days, info.growing_period_days);
            }
        }
    }
}
