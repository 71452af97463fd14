use serde::{Deserialize, Serialize};

use super::application::AttributeKind;
use super::scorecard::ScoreBreakdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightTone {
    Strength,
    Caution,
}

/// Condition on a factor's awarded points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointsTrigger {
    Below(i32),
    AtLeast(i32),
    Above(i32),
}

impl PointsTrigger {
    fn matches(&self, points: i32) -> bool {
        match *self {
            PointsTrigger::Below(limit) => points < limit,
            PointsTrigger::AtLeast(limit) => points >= limit,
            PointsTrigger::Above(limit) => points > limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightRule {
    pub attribute: AttributeKind,
    pub trigger: PointsTrigger,
    pub tone: InsightTone,
    pub message: &'static str,
}

/// Narrative note attached to a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub attribute: AttributeKind,
    pub tone: InsightTone,
    pub message: String,
}

pub fn derive_insights(breakdown: &ScoreBreakdown, rules: &[InsightRule]) -> Vec<Insight> {
    rules
        .iter()
        .filter(|rule| {
            breakdown
                .points_for(rule.attribute)
                .is_some_and(|points| rule.trigger.matches(points))
        })
        .map(|rule| Insight {
            attribute: rule.attribute,
            tone: rule.tone,
            message: rule.message.to_string(),
        })
        .collect()
}
