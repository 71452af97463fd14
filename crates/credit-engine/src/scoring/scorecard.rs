use serde::{Deserialize, Serialize};
use tracing::warn;

use super::application::{Application, AttributeKind};

/// Lowest total a scorecard can report.
pub const MIN_SCORE: i32 = 0;
/// Highest total a scorecard can report.
pub const MAX_SCORE: i32 = 1000;

// Absorbs binary noise such as `0.29 * 100.0 == 28.999999999999996` before flooring.
const FLOOR_TOLERANCE: f64 = 1e-9;
// Keeps a breakdown summable in i32 whatever the inputs.
const FACTOR_POINT_LIMIT: f64 = 1_000_000.0;

/// `intercept + slope * (value - pivot)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub pivot: f64,
    pub slope: f64,
    pub intercept: f64,
}

impl AffineTransform {
    /// Points proportional to the raw value.
    pub const fn scaled(slope: f64) -> Self {
        Self {
            pivot: 0.0,
            slope,
            intercept: 0.0,
        }
    }

    /// Points proportional to the distance from `pivot`.
    pub const fn around(pivot: f64, slope: f64) -> Self {
        Self {
            pivot,
            slope,
            intercept: 0.0,
        }
    }

    /// Starts at `intercept` and moves by `slope` per unit.
    pub const fn offset(intercept: f64, slope: f64) -> Self {
        Self {
            pivot: 0.0,
            slope,
            intercept,
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        self.intercept + self.slope * (value - self.pivot)
    }
}

/// Optional bounds applied to a single factor after truncation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClampBand {
    pub floor: Option<i32>,
    pub ceiling: Option<i32>,
}

impl ClampBand {
    pub const UNBOUNDED: Self = Self {
        floor: None,
        ceiling: None,
    };

    pub const fn at_least(floor: i32) -> Self {
        Self {
            floor: Some(floor),
            ceiling: None,
        }
    }

    pub const fn at_most(ceiling: i32) -> Self {
        Self {
            floor: None,
            ceiling: Some(ceiling),
        }
    }

    pub fn apply(&self, points: i32) -> i32 {
        let points = self.floor.map_or(points, |floor| points.max(floor));
        self.ceiling.map_or(points, |ceiling| points.min(ceiling))
    }
}

/// One scorecard row: which attribute, how it converts to points, and its band.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreFactor {
    pub attribute: AttributeKind,
    pub label: &'static str,
    pub transform: AffineTransform,
    pub band: ClampBand,
}

impl ScoreFactor {
    pub fn points(&self, value: f64) -> i32 {
        let raw = (self.transform.apply(value) + FLOOR_TOLERANCE)
            .floor()
            .clamp(-FACTOR_POINT_LIMIT, FACTOR_POINT_LIMIT);
        self.band.apply(raw as i32)
    }
}

/// What produced a breakdown entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "attribute", rename_all = "snake_case")]
pub enum ComponentKind {
    Base,
    Factor(AttributeKind),
    /// Difference introduced by clamping the total into the reportable range.
    RangeAdjustment,
}

/// Discrete contribution to a total score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub kind: ComponentKind,
    pub label: String,
    pub points: i32,
}

/// Ordered per-factor decomposition of a total score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreBreakdown {
    components: Vec<ScoreComponent>,
}

impl ScoreBreakdown {
    pub fn components(&self) -> &[ScoreComponent] {
        &self.components
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreComponent> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn total(&self) -> i32 {
        self.components.iter().map(|component| component.points).sum()
    }

    pub fn points_for(&self, attribute: AttributeKind) -> Option<i32> {
        self.components
            .iter()
            .find(|component| component.kind == ComponentKind::Factor(attribute))
            .map(|component| component.points)
    }

    fn push(&mut self, kind: ComponentKind, label: impl Into<String>, points: i32) {
        self.components.push(ScoreComponent {
            kind,
            label: label.into(),
            points,
        });
    }
}

/// Additive points table converting application attributes into a score.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    base_label: &'static str,
    base_score: i32,
    factors: Vec<ScoreFactor>,
}

impl Scorecard {
    pub fn new(base_label: &'static str, base_score: i32, factors: Vec<ScoreFactor>) -> Self {
        Self {
            base_label,
            base_score,
            factors,
        }
    }

    pub fn base_score(&self) -> i32 {
        self.base_score
    }

    pub fn factors(&self) -> &[ScoreFactor] {
        &self.factors
    }

    /// Score an application. The breakdown always sums to the returned total.
    pub fn compute(&self, application: &Application) -> (i32, ScoreBreakdown) {
        let mut breakdown = ScoreBreakdown::default();
        breakdown.push(ComponentKind::Base, self.base_label, self.base_score);

        let mut raw_total = self.base_score;
        for factor in &self.factors {
            let value = match application.attribute(factor.attribute) {
                Some(value) => value,
                None => {
                    warn!(
                        attribute = factor.attribute.field_name(),
                        product = %application.product(),
                        "application is missing a scorecard attribute; scoring it as zero"
                    );
                    0.0
                }
            };

            let points = factor.points(value);
            raw_total += points;
            breakdown.push(ComponentKind::Factor(factor.attribute), factor.label, points);
        }

        let total = raw_total.clamp(MIN_SCORE, MAX_SCORE);
        if total != raw_total {
            breakdown.push(
                ComponentKind::RangeAdjustment,
                "Score range adjustment",
                total - raw_total,
            );
        }

        (total, breakdown)
    }
}
