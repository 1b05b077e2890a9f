use super::{
    drainage::DrainageRule, favorable_conditions::FavorableConditionsRule,
    frost_protection::FrostProtectionRule, low_suitability::LowSuitabilityRule,
    out_of_season::OutOfSeasonRule, Rule, RuleContext,
};
use crate::models::Recommendation;

/// Evaluates rules in registration order; each rule fires at most once.
pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(LowSuitabilityRule),
            Box::new(OutOfSeasonRule),
            Box::new(DrainageRule),
            Box::new(FrostProtectionRule),
            Box::new(FavorableConditionsRule),
        ];

        Self { rules }
    }

    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<Recommendation> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let rec = rule.evaluate(ctx);
                if rec.is_some() {
                    tracing::debug!(rule = rule.id(), "rule fired");
                }
                rec
            })
            .collect()
    }

    pub fn evaluate_rule(&self, rule_id: &str, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        self.rules
            .iter()
            .find(|r| r.id() == rule_id)
            .and_then(|rule| rule.evaluate(ctx))
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}
