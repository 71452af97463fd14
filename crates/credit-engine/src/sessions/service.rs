use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::repository::{CreditSession, DecisionRecord, RepositoryError, SessionId, SessionStore};
use crate::scoring::{
    Application, DecisionEngine, DecisionError, InvalidInput, PolicyConfig, PolicyConfigError,
    ProductKind, Submission,
};

/// Service owning the decision engines and per-session policy state.
pub struct CreditSessionService<S> {
    store: Arc<S>,
    default_product: ProductKind,
    individual: DecisionEngine,
    enterprise: DecisionEngine,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("sess-{id:06}"))
}

impl<S> CreditSessionService<S>
where
    S: SessionStore + 'static,
{
    pub fn new(store: Arc<S>, default_product: ProductKind) -> Self {
        Self {
            store,
            default_product,
            individual: DecisionEngine::for_product(ProductKind::Individual),
            enterprise: DecisionEngine::for_product(ProductKind::Enterprise),
        }
    }

    pub fn default_product(&self) -> ProductKind {
        self.default_product
    }

    pub fn engine(&self, product: ProductKind) -> &DecisionEngine {
        match product {
            ProductKind::Individual => &self.individual,
            ProductKind::Enterprise => &self.enterprise,
        }
    }

    /// Open a session seeded with the product's default policy.
    pub fn open(&self, product: Option<ProductKind>) -> Result<CreditSession, SessionServiceError> {
        let product = product.unwrap_or(self.default_product);
        let session = CreditSession {
            id: next_session_id(),
            product,
            policy: self.engine(product).profile().default_policy.clone(),
            last_decision: None,
            opened_at: Utc::now(),
        };

        let stored = self.store.insert(session)?;
        info!(session = %stored.id.0, %product, "credit session opened");
        Ok(stored)
    }

    pub fn get(&self, id: &SessionId) -> Result<CreditSession, SessionServiceError> {
        let session = self.store.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(session)
    }

    pub fn policy(&self, id: &SessionId) -> Result<PolicyConfig, SessionServiceError> {
        Ok(self.get(id)?.policy)
    }

    /// Validate and replace the session's policy wholesale.
    pub fn save_policy(
        &self,
        id: &SessionId,
        policy: PolicyConfig,
    ) -> Result<PolicyConfig, SessionServiceError> {
        let session = self.get(id)?;
        let policy = policy.validated(&self.engine(session.product).profile().rating_scale)?;

        self.store.replace_policy(id, policy.clone())?;

        info!(
            session = %id.0,
            max_days_past_due = policy.max_days_past_due,
            minimum_capacity = policy.minimum_capacity,
            restriction_enabled = policy.restriction_enabled,
            auto_reject = ?policy.auto_reject_ratings,
            "credit policy saved"
        );
        Ok(policy)
    }

    /// Evaluate a submission under the session's current policy and keep it as the last decision.
    pub fn evaluate(
        &self,
        id: &SessionId,
        submission: Submission,
    ) -> Result<DecisionRecord, SessionServiceError> {
        let session = self.get(id)?;
        let application = Application::from_submission(submission)?;
        let decision = self
            .engine(session.product)
            .decide(&application, &session.policy)?;

        let record = DecisionRecord {
            decision,
            decided_at: Utc::now(),
        };
        self.store.record_decision(id, record.clone())?;

        Ok(record)
    }

    pub fn last_decision(
        &self,
        id: &SessionId,
    ) -> Result<Option<DecisionRecord>, SessionServiceError> {
        Ok(self.get(id)?.last_decision)
    }
}

/// Error raised by the session service.
#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    #[error(transparent)]
    Input(#[from] InvalidInput),
    #[error(transparent)]
    Policy(#[from] PolicyConfigError),
    #[error(transparent)]
    Decision(#[from] DecisionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
