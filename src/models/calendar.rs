use super::crop::{Hemisphere, SeasonWindow};
use super::recommendation::Recommendation;
use super::telemetry::{DataSource, Location};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarRequest {
    pub location: Location,
    /// Cultivated area in hectares.
    pub area_hectares: f64,
    pub crop: String,
}

impl CalendarRequest {
    pub fn new(crop: impl Into<String>, location: Location, area_hectares: f64) -> Self {
        Self {
            location,
            area_hectares,
            crop: crop.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFlag {
    OutOfSeason,
    EnvironmentalRisk,
    WindowPartiallyElapsed,
}

impl RiskFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFlag::OutOfSeason => "Out of season",
            RiskFlag::EnvironmentalRisk => "Environmental risk",
            RiskFlag::WindowPartiallyElapsed => "Window partially elapsed",
        }
    }
}

impl std::fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantingWindow {
    pub hemisphere: Hemisphere,
    pub window: SeasonWindow,
    pub earliest_start: NaiveDate,
    pub optimal_start: NaiveDate,
    pub optimal_end: NaiveDate,
    pub latest_end: NaiveDate,
    /// Optimal start minus today; negative once the window has opened.
    pub days_from_now: i64,
    pub currently_open: bool,
    pub risk_flags: Vec<RiskFlag>,
}

impl PlantingWindow {
    pub fn has_risk(&self, flag: RiskFlag) -> bool {
        self.risk_flags.contains(&flag)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledStage {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: u32,
    pub description: String,
    pub activities: Vec<String>,
    pub care_instructions: Vec<String>,
    pub expected_signs: Vec<String>,
}

impl ScheduledStage {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageTimeline {
    pub planting_date: NaiveDate,
    pub stages: Vec<ScheduledStage>,
    /// Sum of stage durations.
    pub total_days: u32,
    /// Growing period declared by the crop model, kept for reference.
    pub declared_growing_period_days: u32,
}

impl StageTimeline {
    /// Last day of the final stage; the day before planting for an empty timeline.
    pub fn end_date(&self) -> NaiveDate {
        self.stages
            .last()
            .map(|s| s.end_date)
            .unwrap_or_else(|| self.planting_date - chrono::Duration::days(1))
    }

    pub fn stage_at(&self, date: NaiveDate) -> Option<&ScheduledStage> {
        self.stages.iter().find(|s| s.contains(date))
    }

    pub fn final_stage(&self) -> Option<&ScheduledStage> {
        self.stages.last()
    }
}

/// Growth stage a dated line item falls into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageRef {
    PrePlanting,
    Stage(String),
    PostMaturity,
}

impl StageRef {
    pub fn label(&self) -> &str {
        match self {
            StageRef::PrePlanting => "Pre-planting",
            StageRef::Stage(name) => name,
            StageRef::PostMaturity => "Post-maturity",
        }
    }
}

impl std::fmt::Display for StageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FertilizationItem {
    pub date: NaiveDate,
    pub offset_days: i64,
    pub stage: StageRef,
    pub nutrient: String,
    pub amount: f64,
    pub unit: String,
    pub method: String,
    pub instructions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationItem {
    pub week: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub stage: StageRef,
    pub volume_liters: f64,
    pub timing: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientTotal {
    pub nutrient: String,
    pub unit: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceTotals {
    pub fertilizer: Vec<NutrientTotal>,
    pub irrigation_liters: f64,
    pub irrigation_events: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceSchedule {
    pub fertilization: Vec<FertilizationItem>,
    pub irrigation: Vec<IrrigationItem>,
    pub totals: ResourceTotals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ReadinessLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ReadinessLevel::Excellent
        } else if score >= 60.0 {
            ReadinessLevel::Good
        } else if score >= 40.0 {
            ReadinessLevel::Fair
        } else {
            ReadinessLevel::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadinessLevel::Excellent => "excellent",
            ReadinessLevel::Good => "good",
            ReadinessLevel::Fair => "fair",
            ReadinessLevel::Poor => "poor",
        }
    }
}

impl std::fmt::Display for ReadinessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataConfidence {
    High,
    Medium,
    Low,
}

impl DataConfidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataConfidence::High => "high",
            DataConfidence::Medium => "medium",
            DataConfidence::Low => "low",
        }
    }
}

impl std::fmt::Display for DataConfidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    Vegetation,
    Soil,
    Weather,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Vegetation => "Vegetation health",
            Dimension::Soil => "Soil condition",
            Dimension::Weather => "Weather suitability",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    pub score: f64,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuitabilityAssessment {
    pub vegetation: DimensionScore,
    pub soil: DimensionScore,
    pub weather: DimensionScore,
    pub overall_score: f64,
    pub readiness: ReadinessLevel,
    pub confidence: DataConfidence,
    pub data_source: DataSource,
}

impl SuitabilityAssessment {
    pub fn dimensions(&self) -> [&DimensionScore; 3] {
        [&self.vegetation, &self.soil, &self.weather]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldEstimate {
    pub amount: f64,
    pub unit: String,
    /// Overall readiness as a fraction in [0, 1].
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestWindow {
    pub earliest: NaiveDate,
    pub optimal: NaiveDate,
    pub latest: NaiveDate,
    pub estimated_yield: YieldEstimate,
    pub harvesting_method: String,
    pub post_harvest_care: Vec<String>,
    pub storage: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedCalendar {
    pub crop: String,
    pub scientific_name: String,
    pub request: CalendarRequest,
    pub planting_window: PlantingWindow,
    pub timeline: StageTimeline,
    pub resources: ResourceSchedule,
    pub harvest: HarvestWindow,
    pub suitability: SuitabilityAssessment,
    pub recommendations: Vec<Recommendation>,
    pub generated_at: DateTime<Utc>,
}
