use super::{Rule, RuleContext};
use crate::models::{DimensionScore, Priority, Recommendation, RecommendationCategory};

/// Dimensions scoring below this are critical.
pub const CRITICAL_SCORE: f64 = 40.0;

/// Low suitability rule
///
/// Fires when any assessment dimension (vegetation, soil, weather) scores
/// below 40. One recommendation names every failing dimension and carries
/// the issues the assessor recorded for each.
pub struct LowSuitabilityRule;

impl Rule for LowSuitabilityRule {
    fn id(&self) -> &'static str {
        "low_suitability"
    }

    fn name(&self) -> &'static str {
        "Critical Suitability Dimension"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        let failing: Vec<&DimensionScore> = ctx
            .assessment
            .dimensions()
            .into_iter()
            .filter(|d| d.score < CRITICAL_SCORE)
            .collect();

        if failing.is_empty() {
            return None;
        }

        let names: Vec<&str> = failing.iter().map(|d| d.dimension.as_str()).collect();
        let title = if failing.len() == 1 {
            format!("{} Is Critically Low", names[0])
        } else {
            "Multiple Field Conditions Critically Low".to_string()
        };

        let mut rec = Recommendation::new(
            self.id(),
            RecommendationCategory::Suitability,
            Priority::High,
            title,
            format!(
                "{} scored below {:.0} for {}. Address these conditions before planting.",
                names.join(", "),
                CRITICAL_SCORE,
                ctx.crop.name
            ),
        );

        for d in &failing {
            rec = rec.with_data_point(
                d.dimension.as_str(),
                format!("{:.0}/100", d.score),
                ctx.assessment.data_source.as_str(),
            );
            for issue in &d.issues {
                rec = rec.with_detail(issue.clone());
            }
        }

        Some(rec.with_action(
            "Correct the listed conditions (drainage, irrigation or timing) and re-check \
             field telemetry before committing seed and fertilizer.",
        ))
    }
}
