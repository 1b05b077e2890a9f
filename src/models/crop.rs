use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropCategory {
    Cereal,
    Legume,
    Vegetable,
    Tuber,
    Oilseed,
    Fiber,
    Fruit,
}

impl CropCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropCategory::Cereal => "Cereal",
            CropCategory::Legume => "Legume",
            CropCategory::Vegetable => "Vegetable",
            CropCategory::Tuber => "Tuber",
            CropCategory::Oilseed => "Oilseed",
            CropCategory::Fiber => "Fiber",
            CropCategory::Fruit => "Fruit",
        }
    }
}

impl std::fmt::Display for CropCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Moderate,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    Northern,
    Southern,
}

impl Hemisphere {
    /// The equator counts as northern.
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude >= 0.0 {
            Hemisphere::Northern
        } else {
            Hemisphere::Southern
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Hemisphere::Northern => "northern",
            Hemisphere::Southern => "southern",
        }
    }
}

impl std::fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthStage {
    pub name: String,
    pub duration_days: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub care_instructions: Vec<String>,
    #[serde(default)]
    pub expected_signs: Vec<String>,
}

/// Fertilizer application template, expressed per hectare.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FertilizationEvent {
    /// Days after planting. Zero or negative means a basal/pre-planting dose.
    pub offset_days: i64,
    pub nutrient: String,
    pub amount_per_hectare: f64,
    pub unit: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub instructions: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceRange {
    pub min: f64,
    pub max: f64,
    pub optimal: f64,
}

impl ToleranceRange {
    pub fn new(min: f64, max: f64, optimal: f64) -> Self {
        Self { min, max, optimal }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn is_well_formed(&self) -> bool {
        self.min <= self.optimal && self.optimal <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    pub temperature_c: ToleranceRange,
    pub soil_moisture_percent: ToleranceRange,
    pub soil_ph: ToleranceRange,
}

/// Planting window as a month range. `end < start` wraps the year boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonWindow {
    pub start_month: u32,
    pub end_month: u32,
    pub season: String,
}

impl SeasonWindow {
    pub fn new(start_month: u32, end_month: u32, season: impl Into<String>) -> Self {
        Self {
            start_month,
            end_month,
            season: season.into(),
        }
    }

    pub fn wraps_year(&self) -> bool {
        self.end_month < self.start_month
    }

    pub fn contains_month(&self, month: u32) -> bool {
        if self.wraps_year() {
            month >= self.start_month || month <= self.end_month
        } else {
            month >= self.start_month && month <= self.end_month
        }
    }

    pub fn has_valid_months(&self) -> bool {
        (1..=12).contains(&self.start_month) && (1..=12).contains(&self.end_month)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonTable {
    #[serde(default)]
    pub northern: Vec<SeasonWindow>,
    #[serde(default)]
    pub southern: Vec<SeasonWindow>,
}

impl SeasonTable {
    pub fn for_hemisphere(&self, hemisphere: Hemisphere) -> &[SeasonWindow] {
        match hemisphere {
            Hemisphere::Northern => &self.northern,
            Hemisphere::Southern => &self.southern,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedYield {
    pub amount_per_hectare: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostHarvest {
    #[serde(default)]
    pub harvesting_method: String,
    #[serde(default)]
    pub post_harvest_care: Vec<String>,
    #[serde(default)]
    pub storage: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropModel {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub scientific_name: String,
    pub category: CropCategory,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub growing_period_days: u32,
    pub stages: Vec<GrowthStage>,
    #[serde(default)]
    pub fertilization: Vec<FertilizationEvent>,
    /// Liters per square meter per week.
    #[serde(default)]
    pub water_requirement: Option<f64>,
    #[serde(default)]
    pub irrigation_timing: Option<String>,
    pub tolerances: Tolerances,
    pub seasons: SeasonTable,
    pub expected_yield: ExpectedYield,
    #[serde(default)]
    pub post_harvest: PostHarvest,
}

impl CropModel {
    /// Case-insensitive match against the name or any alias.
    pub fn matches(&self, identifier: &str) -> bool {
        let needle = identifier.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        self.name.to_lowercase() == needle || self.aliases.iter().any(|a| a.to_lowercase() == needle)
    }

    /// Sum of stage durations, the ground truth for the growing span.
    pub fn stage_total_days(&self) -> u32 {
        self.stages
            .iter()
            .fold(0u32, |total, s| total.saturating_add(s.duration_days))
    }

    pub fn info(&self) -> CropInfo {
        CropInfo {
            name: self.name.clone(),
            scientific_name: self.scientific_name.clone(),
            category: self.category,
            growing_period_days: self.growing_period_days,
            difficulty: self.difficulty,
        }
    }
}

/// Public catalog metadata; schedule templates stay internal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropInfo {
    pub name: String,
    pub scientific_name: String,
    pub category: CropCategory,
    pub growing_period_days: u32,
    pub difficulty: Difficulty,
}
