use super::{Rule, RuleContext};
use crate::models::{Priority, Recommendation, RecommendationCategory};

/// Drainage rule
///
/// Soil moisture above the crop's maximum tolerance means waterlogged roots,
/// poor germination and nutrient leaching.
pub struct DrainageRule;

impl Rule for DrainageRule {
    fn id(&self) -> &'static str {
        "drainage"
    }

    fn name(&self) -> &'static str {
        "Excess Soil Moisture"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let moisture = ctx.telemetry.soil_moisture.percent;
        let max = ctx.crop.tolerances.soil_moisture_percent.max;
        if moisture <= max {
            return None;
        }

        Some(
            Recommendation::new(
                self.id(),
                RecommendationCategory::Drainage,
                Priority::Medium,
                "Improve Field Drainage",
                format!(
                    "Soil moisture ({:.1}%) is above the {:.1}% maximum for {}.",
                    moisture, max, ctx.crop.name
                ),
            )
            .with_data_point(
                "Soil Moisture",
                format!("{:.1}%", moisture),
                ctx.telemetry.source.as_str(),
            )
            .with_data_point("Crop Maximum", format!("{:.1}%", max), "Crop catalog")
            .with_action(
                "Open drainage channels or raise beds, and hold irrigation until the \
                 topsoil drains. Postpone basal fertilizer so it is not leached.",
            ),
        )
    }
}
