//! Credit scoring and decisioning.
//!
//! A [`Submission`] is validated into an [`Application`], scored by the product's
//! [`Scorecard`], mapped onto its [`RatingScale`], and checked against a
//! [`PolicyConfig`]. [`DecisionEngine::decide`] composes those steps and returns a
//! [`Decision`] whose verdict is `REJECT` exactly when a hard rule produced a reason.

pub mod application;
mod engine;
mod insights;
mod policy;
mod product;
mod rating;
mod scorecard;

#[cfg(test)]
mod tests;

pub use application::{
    Application, AttributeKind, EnterpriseSubmission, IndividualSubmission, IndustryCategory,
    InvalidInput, ProductKind, RestrictionInput, ScreeningFacts, Submission,
};
pub use engine::{Decision, DecisionEngine, DecisionError, Verdict};
pub use insights::{derive_insights, Insight, InsightRule, InsightTone, PointsTrigger};
pub use policy::{CapacityMeasure, PolicyConfig, PolicyConfigError, RejectionReason};
pub use product::ProductProfile;
pub use rating::{Rating, RatingScale, RatingTier};
pub use scorecard::{
    AffineTransform, ClampBand, ComponentKind, ScoreBreakdown, ScoreComponent, ScoreFactor,
    Scorecard, MAX_SCORE, MIN_SCORE,
};
