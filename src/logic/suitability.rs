use super::calculations::{range_score, vegetation_score};
use crate::models::{
    CropModel, DataConfidence, Dimension, DimensionScore, ReadinessLevel, SuitabilityAssessment,
    TelemetrySnapshot, ToleranceRange,
};

/// Scores below this carry an explanation of what is out of range.
pub const ISSUE_THRESHOLD: f64 = 60.0;

/// Compares a telemetry snapshot against a crop's tolerance ranges.
#[derive(Debug, Clone, Copy)]
pub struct SuitabilityAssessor {
    healthy_ndvi: f64,
}

impl SuitabilityAssessor {
    pub fn new(healthy_ndvi: f64) -> Self {
        Self { healthy_ndvi }
    }

    pub fn assess(&self, crop: &CropModel, telemetry: &TelemetrySnapshot) -> SuitabilityAssessment {
        let vegetation = self.vegetation(telemetry);
        let soil = dimension(
            Dimension::Soil,
            "Soil moisture",
            telemetry.soil_moisture.percent,
            &crop.tolerances.soil_moisture_percent,
            "%",
        );
        let weather = dimension(
            Dimension::Weather,
            "Temperature",
            telemetry.temperature.current_c,
            &crop.tolerances.temperature_c,
            "°C",
        );

        let overall_score = (vegetation.score + soil.score + weather.score) / 3.0;

        let confidence = if telemetry.is_fallback() {
            DataConfidence::Low
        } else if telemetry.has_defaults() {
            DataConfidence::Medium
        } else {
            DataConfidence::High
        };

        SuitabilityAssessment {
            vegetation,
            soil,
            weather,
            overall_score,
            readiness: ReadinessLevel::from_score(overall_score),
            confidence,
            data_source: telemetry.source,
        }
    }

    fn vegetation(&self, telemetry: &TelemetrySnapshot) -> DimensionScore {
        let ndvi = telemetry.vegetation.ndvi;
        let score = vegetation_score(ndvi, self.healthy_ndvi);

        let mut issues = Vec::new();
        if score < ISSUE_THRESHOLD {
            issues.push(format!(
                "NDVI {:.2} is {:.2} below the healthy threshold of {:.2}",
                ndvi,
                self.healthy_ndvi - ndvi,
                self.healthy_ndvi
            ));
        }

        DimensionScore {
            dimension: Dimension::Vegetation,
            score,
            issues,
        }
    }
}

fn dimension(
    dimension: Dimension,
    label: &str,
    value: f64,
    range: &ToleranceRange,
    unit: &str,
) -> DimensionScore {
    let score = range_score(value, range);
    let mut issues = Vec::new();
    if score < ISSUE_THRESHOLD {
        issues.push(describe_deviation(label, value, range, unit));
    }
    DimensionScore {
        dimension,
        score,
        issues,
    }
}

fn describe_deviation(label: &str, value: f64, range: &ToleranceRange, unit: &str) -> String {
    if value > range.max {
        format!(
            "{} {:.1}{} exceeds the maximum of {:.1}{} by {:.1}{}",
            label,
            value,
            unit,
            range.max,
            unit,
            value - range.max,
            unit
        )
    } else if value < range.min {
        format!(
            "{} {:.1}{} is below the minimum of {:.1}{} by {:.1}{}",
            label,
            value,
            unit,
            range.min,
            unit,
            range.min - value,
            unit
        )
    } else {
        let direction = if value > range.optimal { "above" } else { "below" };
        format!(
            "{} {:.1}{} is {:.1}{} {} the optimum of {:.1}{}",
            label,
            value,
            unit,
            (value - range.optimal).abs(),
            unit,
            direction,
            range.optimal,
            unit
        )
    }
}
