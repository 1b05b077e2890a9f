use super::{Rule, RuleContext};
use crate::models::{Priority, Recommendation, RecommendationCategory, RiskFlag};

/// Out-of-season rule
///
/// The resolver flags a calendar out of season when no planting window is
/// open and the next one is more than 60 days away. Planting now would put
/// every later stage outside the conditions the crop model assumes.
pub struct OutOfSeasonRule;

impl Rule for OutOfSeasonRule {
    fn id(&self) -> &'static str {
        "out_of_season"
    }

    fn name(&self) -> &'static str {
        "Out of Planting Season"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let window = ctx.planting_window;
        if !window.has_risk(RiskFlag::OutOfSeason) {
            return None;
        }

        Some(
            Recommendation::new(
                self.id(),
                RecommendationCategory::PlantingTiming,
                Priority::High,
                "Delay Planting to the Next Window",
                format!(
                    "{} is out of season in the {} hemisphere. The next {} window opens on {} ({} days away).",
                    ctx.crop.name,
                    window.hemisphere,
                    window.window.season,
                    window.optimal_start.format("%b %d, %Y"),
                    window.days_from_now
                ),
            )
            .with_data_point(
                "Window",
                format!(
                    "{} to {}",
                    window.optimal_start.format("%b %d"),
                    window.optimal_end.format("%b %d")
                ),
                "Crop catalog",
            )
            .with_data_point("Days Until Window", window.days_from_now, "Calendar")
            .with_action(self.action(ctx)),
        )
    }
}

impl OutOfSeasonRule {
    fn action(&self, ctx: &RuleContext<'_>) -> String {
        let hold = format!(
            "Hold seed until {}.",
            ctx.planting_window.earliest_start.format("%b %d, %Y")
        );
        match ctx.timeline.stages.first() {
            Some(first) => format!(
                "{} Finish land preparation and soil testing before {} begins on {}.",
                hold,
                first.name,
                first.start_date.format("%b %d")
            ),
            None => format!("{} Use the time for land preparation and soil testing.", hold),
        }
    }
}
