use serde::{Deserialize, Serialize};
use tracing::debug;

use super::application::{Application, ProductKind};
use super::insights::{derive_insights, Insight};
use super::policy::{PolicyConfig, RejectionReason};
use super::product::ProductProfile;
use super::rating::Rating;
use super::scorecard::ScoreBreakdown;

/// Final verdict for an evaluated application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Approve,
    Reject,
}

impl Verdict {
    pub fn from_reasons(reasons: &[RejectionReason]) -> Self {
        if reasons.is_empty() {
            Verdict::Approve
        } else {
            Verdict::Reject
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Approve => "APPROVE",
            Verdict::Reject => "REJECT",
        }
    }
}

/// Auditable output of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub product: ProductKind,
    pub total_score: i32,
    pub rating: Rating,
    pub breakdown: ScoreBreakdown,
    pub verdict: Verdict,
    pub reasons: Vec<RejectionReason>,
    #[serde(default)]
    pub insights: Vec<Insight>,
}

impl Decision {
    pub fn is_approved(&self) -> bool {
        self.verdict == Verdict::Approve
    }

    pub fn reason_messages(&self) -> Vec<String> {
        self.reasons.iter().map(RejectionReason::summary).collect()
    }

    pub fn summary(&self) -> String {
        match self.verdict {
            Verdict::Approve => format!(
                "approved with score {} and rating {}",
                self.total_score, self.rating
            ),
            Verdict::Reject => format!(
                "rejected with score {} and rating {}: {}",
                self.total_score,
                self.rating,
                self.reason_messages().join("; ")
            ),
        }
    }
}

/// Stateless evaluator composing scorecard, rating scale, and policy rules.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    profile: ProductProfile,
}

impl DecisionEngine {
    pub fn new(profile: ProductProfile) -> Self {
        Self { profile }
    }

    pub fn for_product(kind: ProductKind) -> Self {
        Self::new(ProductProfile::for_kind(kind))
    }

    pub fn profile(&self) -> &ProductProfile {
        &self.profile
    }

    pub fn product(&self) -> ProductKind {
        self.profile.kind
    }

    pub fn decide(
        &self,
        application: &Application,
        policy: &PolicyConfig,
    ) -> Result<Decision, DecisionError> {
        if application.product() != self.profile.kind {
            return Err(DecisionError::ProductMismatch {
                engine: self.profile.kind,
                application: application.product(),
            });
        }

        let (total_score, breakdown) = self.profile.scorecard.compute(application);
        let rating = self.profile.rating_scale.map(total_score);
        let reasons = policy.evaluate(application, &rating);
        let verdict = Verdict::from_reasons(&reasons);
        let insights = derive_insights(&breakdown, &self.profile.insight_rules);

        debug!(
            product = %self.profile.kind,
            total_score,
            rating = %rating,
            verdict = verdict.label(),
            reasons = reasons.len(),
            "application evaluated"
        );

        Ok(Decision {
            product: self.profile.kind,
            total_score,
            rating,
            breakdown,
            verdict,
            reasons,
            insights,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecisionError {
    #[error("{application} application cannot be scored by the {engine} engine")]
    ProductMismatch {
        engine: ProductKind,
        application: ProductKind,
    },
}
