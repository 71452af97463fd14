use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{
    Decision, Insight, PolicyConfig, ProductKind, ScoreComponent, Verdict, MAX_SCORE,
};

/// Identifier wrapper for operator sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Decision stamped with the moment it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub decision: Decision,
    pub decided_at: DateTime<Utc>,
}

impl DecisionRecord {
    pub fn view(&self, session_id: &SessionId) -> DecisionView {
        let decision = &self.decision;
        DecisionView {
            session_id: session_id.clone(),
            product: decision.product,
            total_score: decision.total_score,
            max_score: MAX_SCORE,
            rating: decision.rating.to_string(),
            verdict: decision.verdict,
            reasons: decision.reason_messages(),
            breakdown: decision.breakdown.components().to_vec(),
            insights: decision.insights.clone(),
            decided_at: self.decided_at,
        }
    }
}

/// Isolated operator state: one product, its policy, and its latest decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditSession {
    pub id: SessionId,
    pub product: ProductKind,
    pub policy: PolicyConfig,
    pub last_decision: Option<DecisionRecord>,
    pub opened_at: DateTime<Utc>,
}

impl CreditSession {
    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id.clone(),
            product: self.product,
            policy: self.policy.clone(),
            last_verdict: self
                .last_decision
                .as_ref()
                .map(|record| record.decision.verdict),
            opened_at: self.opened_at,
        }
    }
}

/// Storage abstraction so the service can be exercised in isolation.
///
/// Writes touch a single field of the stored session so a policy save and a
/// concurrent evaluation never overwrite each other.
pub trait SessionStore: Send + Sync {
    fn insert(&self, session: CreditSession) -> Result<CreditSession, RepositoryError>;
    fn replace_policy(&self, id: &SessionId, policy: PolicyConfig) -> Result<(), RepositoryError>;
    fn record_decision(
        &self,
        id: &SessionId,
        record: DecisionRecord,
    ) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<CreditSession>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Public representation of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub product: ProductKind,
    pub policy: PolicyConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_verdict: Option<Verdict>,
    pub opened_at: DateTime<Utc>,
}

/// Presentation payload for a decision: score, rating, verdict, reasons, breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionView {
    pub session_id: SessionId,
    pub product: ProductKind,
    pub total_score: i32,
    pub max_score: i32,
    pub rating: String,
    pub verdict: Verdict,
    pub reasons: Vec<String>,
    pub breakdown: Vec<ScoreComponent>,
    pub insights: Vec<Insight>,
    pub decided_at: DateTime<Utc>,
}
