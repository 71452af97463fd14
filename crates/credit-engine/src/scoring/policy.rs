use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::application::{Application, IndustryCategory, ProductKind, RestrictionInput};
use super::rating::{Rating, RatingScale};

/// Hard-rule thresholds and risk appetite for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub max_days_past_due: u32,
    /// Minimum income (individual) or registered capital (enterprise).
    pub minimum_capacity: f64,
    /// Enables the blacklist check (individual) or the restricted-industry check (enterprise).
    pub restriction_enabled: bool,
    #[serde(default)]
    pub auto_reject_ratings: BTreeSet<String>,
}

impl PolicyConfig {
    /// Runs every hard rule; each violated rule contributes one reason, in rule order.
    pub fn evaluate(&self, application: &Application, rating: &Rating) -> Vec<RejectionReason> {
        let screening = application.screening();
        let mut reasons = Vec::new();

        if screening.days_past_due > self.max_days_past_due {
            reasons.push(RejectionReason::DaysPastDue {
                actual: screening.days_past_due,
                maximum: self.max_days_past_due,
            });
        }

        if screening.financial_capacity < self.minimum_capacity {
            reasons.push(RejectionReason::InsufficientCapacity {
                measure: CapacityMeasure::for_product(application.product()),
                actual: screening.financial_capacity,
                minimum: self.minimum_capacity,
            });
        }

        if self.restriction_enabled && screening.restriction.is_matched() {
            reasons.push(match screening.restriction {
                RestrictionInput::Blacklist { .. } => RejectionReason::Blacklisted,
                RestrictionInput::Industry { category } => {
                    RejectionReason::RestrictedIndustry { industry: category }
                }
            });
        }

        if self.auto_reject_ratings.iter().any(|entry| rating.matches_label(entry)) {
            reasons.push(RejectionReason::RatingCutoff {
                rating: rating.to_string(),
            });
        }

        reasons
    }

    /// Checks the config against the product's rating scale, normalizing
    /// auto-reject entries given as full labels down to bare grades.
    pub fn validated(self, scale: &RatingScale) -> Result<Self, PolicyConfigError> {
        if !self.minimum_capacity.is_finite() {
            return Err(PolicyConfigError::NonFiniteMinimum);
        }
        if self.minimum_capacity < 0.0 {
            return Err(PolicyConfigError::NegativeMinimum(self.minimum_capacity));
        }

        let mut auto_reject_ratings = BTreeSet::new();
        for entry in &self.auto_reject_ratings {
            let rating = scale
                .find_grade(entry)
                .ok_or_else(|| PolicyConfigError::UnknownRating(entry.clone()))?;
            auto_reject_ratings.insert(rating.grade.clone());
        }

        Ok(Self {
            auto_reject_ratings,
            ..self
        })
    }
}

/// What the capacity threshold measures for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityMeasure {
    Income,
    RegisteredCapital,
}

impl CapacityMeasure {
    pub fn for_product(product: ProductKind) -> Self {
        match product {
            ProductKind::Individual => CapacityMeasure::Income,
            ProductKind::Enterprise => CapacityMeasure::RegisteredCapital,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CapacityMeasure::Income => "income",
            CapacityMeasure::RegisteredCapital => "registered capital",
        }
    }
}

/// Hard-rule violation explaining a rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RejectionReason {
    DaysPastDue {
        actual: u32,
        maximum: u32,
    },
    InsufficientCapacity {
        measure: CapacityMeasure,
        actual: f64,
        minimum: f64,
    },
    Blacklisted,
    RestrictedIndustry {
        industry: IndustryCategory,
    },
    RatingCutoff {
        rating: String,
    },
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            RejectionReason::DaysPastDue { actual, maximum } => {
                format!("dpd {actual} > {maximum}")
            }
            RejectionReason::InsufficientCapacity {
                measure,
                actual,
                minimum,
            } => format!(
                "{} {} below required minimum {}",
                measure.label(),
                actual,
                minimum
            ),
            RejectionReason::Blacklisted => "applicant is on the credit blacklist".to_string(),
            RejectionReason::RestrictedIndustry { industry } => {
                format!("industry {} is on the restricted list", industry.label())
            }
            RejectionReason::RatingCutoff { rating } => {
                format!("rating {rating} is below the lending cutoff")
            }
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Internally inconsistent policy rejected at save time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyConfigError {
    #[error("minimum capacity must be a finite number")]
    NonFiniteMinimum,
    #[error("minimum capacity must not be negative (found {0})")]
    NegativeMinimum(f64),
    #[error("auto-reject rating '{0}' is not part of this product's rating scale")]
    UnknownRating(String),
}
