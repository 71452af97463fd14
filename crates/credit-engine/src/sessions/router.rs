use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::repository::{RepositoryError, SessionId, SessionStore};
use super::service::{CreditSessionService, SessionServiceError};
use crate::scoring::{DecisionError, PolicyConfig, ProductKind, Submission};

#[derive(Debug, Default, Deserialize)]
pub struct OpenSessionRequest {
    #[serde(default)]
    pub product: Option<ProductKind>,
}

/// Router builder exposing session, policy, and decision endpoints.
pub fn session_router<S>(service: Arc<CreditSessionService<S>>) -> Router
where
    S: SessionStore + 'static,
{
    Router::new()
        .route("/api/v1/sessions", post(open_handler::<S>))
        .route("/api/v1/sessions/:session_id", get(session_handler::<S>))
        .route(
            "/api/v1/sessions/:session_id/policy",
            get(policy_handler::<S>).put(save_policy_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/decisions",
            post(evaluate_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/decisions/latest",
            get(latest_decision_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn open_handler<S>(
    State(service): State<Arc<CreditSessionService<S>>>,
    axum::Json(request): axum::Json<OpenSessionRequest>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.open(request.product) {
        Ok(session) => (StatusCode::CREATED, axum::Json(session.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn session_handler<S>(
    State(service): State<Arc<CreditSessionService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.get(&SessionId(session_id)) {
        Ok(session) => (StatusCode::OK, axum::Json(session.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn policy_handler<S>(
    State(service): State<Arc<CreditSessionService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.policy(&SessionId(session_id)) {
        Ok(policy) => (StatusCode::OK, axum::Json(policy)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn save_policy_handler<S>(
    State(service): State<Arc<CreditSessionService<S>>>,
    Path(session_id): Path<String>,
    axum::Json(policy): axum::Json<PolicyConfig>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.save_policy(&SessionId(session_id), policy) {
        Ok(saved) => (StatusCode::OK, axum::Json(saved)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn evaluate_handler<S>(
    State(service): State<Arc<CreditSessionService<S>>>,
    Path(session_id): Path<String>,
    axum::Json(submission): axum::Json<Submission>,
) -> Response
where
    S: SessionStore + 'static,
{
    let id = SessionId(session_id);
    match service.evaluate(&id, submission) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view(&id))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn latest_decision_handler<S>(
    State(service): State<Arc<CreditSessionService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    let id = SessionId(session_id);
    match service.last_decision(&id) {
        Ok(Some(record)) => (StatusCode::OK, axum::Json(record.view(&id))).into_response(),
        Ok(None) => {
            let payload = json!({
                "session_id": id.0,
                "error": "no decision recorded for this session",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: SessionServiceError) -> Response {
    let status = match &err {
        SessionServiceError::Input(_) | SessionServiceError::Policy(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SessionServiceError::Decision(DecisionError::ProductMismatch { .. }) => {
            StatusCode::CONFLICT
        }
        SessionServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        SessionServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        SessionServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
