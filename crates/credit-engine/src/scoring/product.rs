//! Scorecards, rating tables, default policies, and insight rules for each
//! product line. Both products run through the same engine; only this data differs.

use std::collections::BTreeSet;

use super::application::{AttributeKind, ProductKind};
use super::insights::{InsightRule, InsightTone, PointsTrigger};
use super::policy::PolicyConfig;
use super::rating::{Rating, RatingScale, RatingTier};
use super::scorecard::{AffineTransform, ClampBand, ScoreFactor, Scorecard};

/// Everything the decision engine needs to evaluate one product line.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductProfile {
    pub kind: ProductKind,
    pub scorecard: Scorecard,
    pub rating_scale: RatingScale,
    pub default_policy: PolicyConfig,
    pub insight_rules: Vec<InsightRule>,
}

impl ProductProfile {
    pub fn for_kind(kind: ProductKind) -> Self {
        match kind {
            ProductKind::Individual => Self::individual(),
            ProductKind::Enterprise => Self::enterprise(),
        }
    }

    /// Consumer scorecard.
    pub fn individual() -> Self {
        let scorecard = Scorecard::new(
            "Base score",
            200,
            vec![
                ScoreFactor {
                    attribute: AttributeKind::Age,
                    label: "Age",
                    transform: AffineTransform::scaled(0.5),
                    band: ClampBand::UNBOUNDED,
                },
                ScoreFactor {
                    attribute: AttributeKind::PriorCreditScore,
                    label: "Prior credit score",
                    transform: AffineTransform::scaled(0.5),
                    band: ClampBand::UNBOUNDED,
                },
                ScoreFactor {
                    attribute: AttributeKind::AverageBalance,
                    label: "Average balance",
                    transform: AffineTransform::scaled(0.01),
                    band: ClampBand::UNBOUNDED,
                },
                ScoreFactor {
                    attribute: AttributeKind::DebtToIncome,
                    label: "Debt-to-income ratio",
                    transform: AffineTransform::around(100.0, -2.0),
                    band: ClampBand::UNBOUNDED,
                },
                ScoreFactor {
                    attribute: AttributeKind::CardCount,
                    label: "Open credit cards",
                    transform: AffineTransform::around(5.0, -10.0),
                    band: ClampBand::UNBOUNDED,
                },
            ],
        );

        let rating_scale = RatingScale::new(
            vec![
                RatingTier::new(750, Rating::new("A")),
                RatingTier::new(650, Rating::new("B")),
                RatingTier::new(550, Rating::new("C")),
                RatingTier::new(450, Rating::new("D")),
            ],
            Rating::new("E"),
        );

        Self {
            kind: ProductKind::Individual,
            scorecard,
            rating_scale,
            default_policy: PolicyConfig {
                max_days_past_due: 30,
                minimum_capacity: 5000.0,
                restriction_enabled: true,
                auto_reject_ratings: grades(&["D", "E"]),
            },
            insight_rules: vec![
                InsightRule {
                    attribute: AttributeKind::DebtToIncome,
                    trigger: PointsTrigger::Below(60),
                    tone: InsightTone::Caution,
                    message: "Debt service consumes most of the applicant's income.",
                },
                InsightRule {
                    attribute: AttributeKind::PriorCreditScore,
                    trigger: PointsTrigger::AtLeast(350),
                    tone: InsightTone::Strength,
                    message: "Prior credit history is strong.",
                },
            ],
        }
    }

    /// SME scorecard.
    pub fn enterprise() -> Self {
        let scorecard = Scorecard::new(
            "Base score",
            300,
            vec![
                ScoreFactor {
                    attribute: AttributeKind::YearsOperating,
                    label: "Years in operation",
                    transform: AffineTransform::scaled(10.0),
                    band: ClampBand::at_most(100),
                },
                ScoreFactor {
                    attribute: AttributeKind::BureauScore,
                    label: "Credit history (CIC)",
                    transform: AffineTransform::around(300.0, 0.4),
                    band: ClampBand::UNBOUNDED,
                },
                ScoreFactor {
                    attribute: AttributeKind::ProfitMargin,
                    label: "Profitability",
                    transform: AffineTransform::scaled(5.0),
                    band: ClampBand::at_least(0),
                },
                ScoreFactor {
                    attribute: AttributeKind::DebtToEquity,
                    label: "Capital structure (D/E)",
                    transform: AffineTransform::offset(100.0, -0.3),
                    band: ClampBand::at_least(0),
                },
                ScoreFactor {
                    attribute: AttributeKind::CollateralCoverage,
                    label: "Collateral coverage",
                    transform: AffineTransform::scaled(0.5),
                    band: ClampBand::at_most(100),
                },
            ],
        );

        let rating_scale = RatingScale::new(
            vec![
                RatingTier::new(800, Rating::described("AAA", "Excellent")),
                RatingTier::new(700, Rating::described("AA", "Very Good")),
                RatingTier::new(600, Rating::described("A", "Good")),
                RatingTier::new(500, Rating::described("BBB", "Average")),
                RatingTier::new(400, Rating::described("BB", "Speculative")),
            ],
            Rating::described("C", "High Risk"),
        );

        Self {
            kind: ProductKind::Enterprise,
            scorecard,
            rating_scale,
            default_policy: PolicyConfig {
                max_days_past_due: 10,
                minimum_capacity: 2.0,
                restriction_enabled: true,
                auto_reject_ratings: grades(&["C", "BB"]),
            },
            insight_rules: vec![
                InsightRule {
                    attribute: AttributeKind::DebtToEquity,
                    trigger: PointsTrigger::Below(30),
                    tone: InsightTone::Caution,
                    message: "Leverage is high: the debt/equity ratio is large.",
                },
                InsightRule {
                    attribute: AttributeKind::DebtToEquity,
                    trigger: PointsTrigger::AtLeast(30),
                    tone: InsightTone::Strength,
                    message: "Debt level is within a safe range.",
                },
                InsightRule {
                    attribute: AttributeKind::ProfitMargin,
                    trigger: PointsTrigger::Above(80),
                    tone: InsightTone::Strength,
                    message: "Strong net margins support repayment from operating cash flow.",
                },
            ],
        }
    }
}

fn grades(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}
