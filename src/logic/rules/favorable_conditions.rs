use super::{Rule, RuleContext};
use crate::models::{Priority, Recommendation, RecommendationCategory};

pub const FAVORABLE_SCORE: f64 = 80.0;

/// Affirms the plan when every dimension scores 80 or better.
pub struct FavorableConditionsRule;

impl Rule for FavorableConditionsRule {
    fn id(&self) -> &'static str {
        "favorable_conditions"
    }

    fn name(&self) -> &'static str {
        "Favorable Conditions"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        if !ctx
            .assessment
            .dimensions()
            .iter()
            .all(|d| d.score >= FAVORABLE_SCORE)
        {
            return None;
        }

        Some(
            Recommendation::new(
                self.id(),
                RecommendationCategory::General,
                Priority::Low,
                "Conditions Favorable",
                "Conditions favorable, proceed as scheduled.",
            )
            .with_data_point(
                "Overall Readiness",
                format!("{:.0}/100", ctx.assessment.overall_score),
                "Assessment",
            )
            .with_action(format!(
                "Plant {} between {} and {} as planned.",
                ctx.crop.name,
                ctx.planting_window.optimal_start.format("%b %d"),
                ctx.planting_window.optimal_end.format("%b %d")
            )),
        )
    }
}
