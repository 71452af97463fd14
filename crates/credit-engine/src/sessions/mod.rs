//! Per-operator sessions: each owns its policy and its latest decision, so
//! concurrent operators never observe one another's configuration.

pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use repository::{
    CreditSession, DecisionRecord, DecisionView, RepositoryError, SessionId, SessionStore,
    SessionView,
};
pub use router::{session_router, OpenSessionRequest};
pub use service::{CreditSessionService, SessionServiceError};
