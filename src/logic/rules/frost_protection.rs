use super::{Rule, RuleContext};
use crate::models::{Priority, Recommendation, RecommendationCategory};

/// Frost protection rule
///
/// Fires when the current temperature is below the crop's minimum tolerance.
pub struct FrostProtectionRule;

impl Rule for FrostProtectionRule {
    fn id(&self) -> &'static str {
        "frost_protection"
    }

    fn name(&self) -> &'static str {
        "Frost Protection"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let temp = ctx.telemetry.temperature.current_c;
        let min = ctx.crop.tolerances.temperature_c.min;
        if temp >= min {
            return None;
        }

        Some(
            Recommendation::new(
                self.id(),
                RecommendationCategory::FrostProtection,
                Priority::Medium,
                "Protect Seedlings From Cold",
                format!(
                    "Current temperature ({:.1}°C) is below the {:.1}°C minimum for {}.",
                    temp, min, ctx.crop.name
                ),
            )
            .with_data_point(
                "Temperature",
                format!("{:.1}°C", temp),
                ctx.telemetry.source.as_str(),
            )
            .with_data_point(
                "Overnight Low",
                format!("{:.1}°C", ctx.telemetry.temperature.min_c),
                ctx.telemetry.source.as_str(),
            )
            .with_data_point("Crop Minimum", format!("{:.1}°C", min), "Crop catalog")
            .with_action(
                "Use mulch or row covers on young plants, irrigate lightly before \
                 expected frost nights, and avoid sowing until temperatures recover.",
            ),
        )
    }
}
