//! External advisories merged alongside the engine's own recommendations.
//!
//! An advisory source (a text-generation service, an extension office feed)
//! is never called by the engine. Callers fetch its output after a calendar is
//! generated and merge the two lists for presentation.

use crate::error::Result;
use crate::models::{GeneratedCalendar, Location, ReadinessLevel, Recommendation};
use chrono::NaiveDate;

/// What an advisory source is told about a generated calendar.
#[derive(Debug, Clone)]
pub struct AdvisoryContext {
    pub crop: String,
    pub location: Location,
    pub area_hectares: f64,
    pub planting_date: NaiveDate,
    pub harvest_date: NaiveDate,
    pub readiness: ReadinessLevel,
    pub overall_score: f64,
    /// Issues recorded by the assessor, across all dimensions.
    pub issues: Vec<String>,
    pub stages: Vec<String>,
}

impl AdvisoryContext {
    pub fn from_calendar(calendar: &GeneratedCalendar) -> Self {
        Self {
            crop: calendar.crop.clone(),
            location: calendar.request.location,
            area_hectares: calendar.request.area_hectares,
            planting_date: calendar.timeline.planting_date,
            harvest_date: calendar.harvest.earliest,
            readiness: calendar.suitability.readiness,
            overall_score: calendar.suitability.overall_score,
            issues: calendar
                .suitability
                .dimensions()
                .iter()
                .flat_map(|d| d.issues.iter().cloned())
                .collect(),
            stages: calendar.timeline.stages.iter().map(|s| s.name.clone()).collect(),
        }
    }
}

pub trait AdvisorySource: Send + Sync {
    fn name(&self) -> &str;

    fn advisories(&self, context: &AdvisoryContext) -> Result<Vec<Recommendation>>;
}

/// Fixed advisories, used when no external service is configured.
#[derive(Debug, Clone, Default)]
pub struct StaticAdvisories {
    items: Vec<Recommendation>,
}

impl StaticAdvisories {
    pub fn new(items: Vec<Recommendation>) -> Self {
        Self { items }
    }
}

impl AdvisorySource for StaticAdvisories {
    fn name(&self) -> &str {
        "static"
    }

    fn advisories(&self, _context: &AdvisoryContext) -> Result<Vec<Recommendation>> {
        Ok(self.items.clone())
    }
}

/// Engine recommendations first, in rule order, then external advisories by
/// descending priority. External items reusing an engine id are dropped. The
/// calendar itself is left untouched.
pub fn merge_advisories(
    calendar: &GeneratedCalendar,
    external: Vec<Recommendation>,
) -> Vec<Recommendation> {
    let mut merged = calendar.recommendations.clone();

    let mut extra: Vec<Recommendation> = Vec::new();
    for rec in external {
        if merged.iter().chain(extra.iter()).any(|r| r.id == rec.id) {
            tracing::debug!(id = %rec.id, "duplicate advisory dropped");
            continue;
        }
        extra.push(rec);
    }
    extra.sort_by(|a, b| b.priority.cmp(&a.priority));

    merged.extend(extra);
    merged
}

/// Ask `source` for advisories and merge them. A failing source is logged and
/// contributes nothing.
pub fn collect_advisories(
    calendar: &GeneratedCalendar,
    source: &dyn AdvisorySource,
) -> Vec<Recommendation> {
    let context = AdvisoryContext::from_calendar(calendar);
    match source.advisories(&context) {
        Ok(external) => merge_advisories(calendar, external),
        Err(e) => {
            tracing::warn!(source = source.name(), "Advisory source failed: {}", e);
            calendar.recommendations.clone()
        }
    }
}
