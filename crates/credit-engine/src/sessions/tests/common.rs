use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::scoring::{
    EnterpriseSubmission, IndividualSubmission, IndustryCategory, PolicyConfig, ProductKind,
    Submission,
};
use crate::sessions::repository::{
    CreditSession, DecisionRecord, RepositoryError, SessionId, SessionStore,
};
use crate::sessions::{session_router, CreditSessionService};

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) sessions: Arc<Mutex<HashMap<SessionId, CreditSession>>>,
}

impl SessionStore for MemoryStore {
    fn insert(&self, session: CreditSession) -> Result<CreditSession, RepositoryError> {
        let mut guard = self.sessions.lock().expect("store mutex poisoned");
        if guard.contains_key(&session.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn replace_policy(&self, id: &SessionId, policy: PolicyConfig) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("store mutex poisoned");
        let session = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        session.policy = policy;
        Ok(())
    }

    fn record_decision(
        &self,
        id: &SessionId,
        record: DecisionRecord,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("store mutex poisoned");
        let session = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        session.last_decision = Some(record);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<CreditSession>, RepositoryError> {
        let guard = self.sessions.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableStore;

impl SessionStore for UnavailableStore {
    fn insert(&self, _session: CreditSession) -> Result<CreditSession, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn replace_policy(
        &self,
        _id: &SessionId,
        _policy: PolicyConfig,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn record_decision(
        &self,
        _id: &SessionId,
        _record: DecisionRecord,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<CreditSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn build_service() -> (CreditSessionService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = CreditSessionService::new(store.clone(), ProductKind::Individual);
    (service, store)
}

pub(super) fn router_with_service(service: CreditSessionService<MemoryStore>) -> axum::Router {
    session_router(Arc::new(service))
}

pub(super) fn individual_submission() -> Submission {
    Submission::Individual(IndividualSubmission {
        age: 35.0,
        prior_credit_score: 650.0,
        average_balance: 2000.0,
        debt_to_income: 30.0,
        card_count: 2,
        days_past_due: 0,
        income: 8000.0,
        blacklisted: false,
    })
}

pub(super) fn enterprise_submission() -> Submission {
    Submission::Enterprise(EnterpriseSubmission {
        years_operating: 3.0,
        bureau_score: 650.0,
        profit_margin: 10.0,
        debt_to_equity: 120.0,
        collateral_coverage: 80.0,
        max_days_past_due: 0,
        registered_capital: 5.0,
        industry: IndustryCategory::Manufacturing,
    })
}

pub(super) fn late_individual_submission(days_past_due: u32) -> Submission {
    match individual_submission() {
        Submission::Individual(mut submission) => {
            submission.days_past_due = days_past_due;
            Submission::Individual(submission)
        }
        other => other,
    }
}

pub(super) fn json_request(method: &str, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(payload).expect("payload serializes"),
        ))
        .expect("request builds")
}

pub(super) fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Applies a queued write right after a read, as if another request had
/// landed between the service loading a session and writing back to it.
#[derive(Default)]
pub(super) struct InterleavingStore {
    pub(super) inner: MemoryStore,
    queued_policy: Mutex<Option<PolicyConfig>>,
    queued_decision: Mutex<Option<DecisionRecord>>,
}

impl InterleavingStore {
    pub(super) fn queue_policy(&self, policy: PolicyConfig) {
        *self.queued_policy.lock().expect("queue mutex poisoned") = Some(policy);
    }

    pub(super) fn queue_decision(&self, record: DecisionRecord) {
        *self.queued_decision.lock().expect("queue mutex poisoned") = Some(record);
    }
}

impl SessionStore for InterleavingStore {
    fn insert(&self, session: CreditSession) -> Result<CreditSession, RepositoryError> {
        self.inner.insert(session)
    }

    fn replace_policy(&self, id: &SessionId, policy: PolicyConfig) -> Result<(), RepositoryError> {
        self.inner.replace_policy(id, policy)
    }

    fn record_decision(
        &self,
        id: &SessionId,
        record: DecisionRecord,
    ) -> Result<(), RepositoryError> {
        self.inner.record_decision(id, record)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<CreditSession>, RepositoryError> {
        let snapshot = self.inner.fetch(id)?;
        let policy = self.queued_policy.lock().expect("queue mutex poisoned").take();
        if let Some(policy) = policy {
            self.inner.replace_policy(id, policy)?;
        }
        let decision = self.queued_decision.lock().expect("queue mutex poisoned").take();
        if let Some(record) = decision {
            self.inner.record_decision(id, record)?;
        }
        Ok(snapshot)
    }
}
