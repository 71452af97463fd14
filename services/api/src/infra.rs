use credit_engine::scoring::{IndustryCategory, PolicyConfig};
use credit_engine::sessions::{
    CreditSession, DecisionRecord, RepositoryError, SessionId, SessionStore,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local session storage; sessions vanish on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, CreditSession>>>,
}

impl InMemorySessionStore {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SessionId, CreditSession>>, RepositoryError>
    {
        self.sessions
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session store lock poisoned".to_string()))
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, session: CreditSession) -> Result<CreditSession, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&session.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn replace_policy(&self, id: &SessionId, policy: PolicyConfig) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        let session = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        session.policy = policy;
        Ok(())
    }

    fn record_decision(
        &self,
        id: &SessionId,
        record: DecisionRecord,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        let session = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        session.last_decision = Some(record);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<CreditSession>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }
}

pub(crate) fn parse_industry(raw: &str) -> Result<IndustryCategory, String> {
    match raw.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
        "manufacturing" => Ok(IndustryCategory::Manufacturing),
        "trading" => Ok(IndustryCategory::Trading),
        "services" => Ok(IndustryCategory::Services),
        "commercial_real_estate" | "real_estate" => Ok(IndustryCategory::CommercialRealEstate),
        "restricted_entertainment" | "karaoke" | "bar" => {
            Ok(IndustryCategory::RestrictedEntertainment)
        }
        _ => Err(format!(
            "unknown industry '{raw}' (expected manufacturing, trading, services, commercial_real_estate, or restricted_entertainment)"
        )),
    }
}
