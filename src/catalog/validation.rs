use crate::models::{CropModel, Hemisphere, ToleranceRange};

/// Longest season, and furthest fertilizer offset, a record may describe.
pub const MAX_SEASON_DAYS: u32 = 3650;

/// A data-integrity problem found in a catalog record.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogIssue {
    NoStages,
    StageSumMismatch { stage_days: u32, declared: u32 },
    SeasonTooLong { stage_days: u32 },
    ZeroLengthStage(String),
    MalformedTolerance { field: &'static str, range: ToleranceRange },
    InvalidSeasonMonths { hemisphere: Hemisphere, season: String },
    NoSeasons,
    FertilizationBeyondSeason { nutrient: String, offset_days: i64 },
    FertilizationOffsetOutOfRange { nutrient: String, offset_days: i64 },
    NegativeAmount(String),
    NonPositiveYield,
}

impl CatalogIssue {
    /// Issues that make a record unusable.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CatalogIssue::NoStages
                | CatalogIssue::SeasonTooLong { .. }
                | CatalogIssue::FertilizationOffsetOutOfRange { .. }
        )
    }
}

impl std::fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogIssue::NoStages => write!(f, "no growth stages defined"),
            CatalogIssue::StageSumMismatch {
                stage_days,
                declared,
            } => write!(
                f,
                "stage durations sum to {} days but growing period is {} days",
                stage_days, declared
            ),
            CatalogIssue::SeasonTooLong { stage_days } => write!(
                f,
                "stage durations sum to {} days, more than the {} day limit",
                stage_days, MAX_SEASON_DAYS
            ),
            CatalogIssue::ZeroLengthStage(name) => {
                write!(f, "stage '{}' has zero duration and occupies no dates", name)
            }
            CatalogIssue::MalformedTolerance { field, range } => write!(
                f,
                "{} tolerance is not min <= optimal <= max ({} / {} / {})",
                field, range.min, range.optimal, range.max
            ),
            CatalogIssue::InvalidSeasonMonths { hemisphere, season } => write!(
                f,
                "{} season '{}' has months outside 1-12",
                hemisphere, season
            ),
            CatalogIssue::NoSeasons => write!(f, "no planting seasons for either hemisphere"),
            CatalogIssue::FertilizationBeyondSeason {
                nutrient,
                offset_days,
            } => write!(
                f,
                "{} application at day {} falls after the last stage",
                nutrient, offset_days
            ),
            CatalogIssue::FertilizationOffsetOutOfRange {
                nutrient,
                offset_days,
            } => write!(
                f,
                "{} application at day {} is more than {} days from planting",
                nutrient, offset_days, MAX_SEASON_DAYS
            ),
            CatalogIssue::NegativeAmount(nutrient) => {
                write!(f, "{} application has a negative amount", nutrient)
            }
            CatalogIssue::NonPositiveYield => write!(f, "expected yield is not positive"),
        }
    }
}

/// Check a crop record for integrity problems. Never fails; callers decide.
pub fn validate_crop(crop: &CropModel) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();

    if crop.stages.is_empty() {
        issues.push(CatalogIssue::NoStages);
    }

    let stage_days = crop.stage_total_days();
    if !crop.stages.is_empty() && stage_days != crop.growing_period_days {
        issues.push(CatalogIssue::StageSumMismatch {
            stage_days,
            declared: crop.growing_period_days,
        });
    }

    if stage_days > MAX_SEASON_DAYS {
        issues.push(CatalogIssue::SeasonTooLong { stage_days });
    }

    for stage in crop.stages.iter().filter(|s| s.duration_days == 0) {
        issues.push(CatalogIssue::ZeroLengthStage(stage.name.clone()));
    }

    let tolerances = [
        ("temperature", crop.tolerances.temperature_c),
        ("soil moisture", crop.tolerances.soil_moisture_percent),
        ("soil pH", crop.tolerances.soil_ph),
    ];
    for (field, range) in tolerances {
        if !range.is_well_formed() {
            issues.push(CatalogIssue::MalformedTolerance { field, range });
        }
    }

    for hemisphere in [Hemisphere::Northern, Hemisphere::Southern] {
        for window in crop.seasons.for_hemisphere(hemisphere) {
            if !window.has_valid_months() {
                issues.push(CatalogIssue::InvalidSeasonMonths {
                    hemisphere,
                    season: window.season.clone(),
                });
            }
        }
    }

    if crop.seasons.northern.is_empty() && crop.seasons.southern.is_empty() {
        issues.push(CatalogIssue::NoSeasons);
    }

    for event in &crop.fertilization {
        if event.offset_days.unsigned_abs() > u64::from(MAX_SEASON_DAYS) {
            issues.push(CatalogIssue::FertilizationOffsetOutOfRange {
                nutrient: event.nutrient.clone(),
                offset_days: event.offset_days,
            });
        } else if event.offset_days >= i64::from(stage_days) && !crop.stages.is_empty() {
            issues.push(CatalogIssue::FertilizationBeyondSeason {
                nutrient: event.nutrient.clone(),
                offset_days: event.offset_days,
            });
        }
        if event.amount_per_hectare < 0.0 {
            issues.push(CatalogIssue::NegativeAmount(event.nutrient.clone()));
        }
    }

    if crop.expected_yield.amount_per_hectare <= 0.0 {
        issues.push(CatalogIssue::NonPositiveYield);
    }

    issues
}
