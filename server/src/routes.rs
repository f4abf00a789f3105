//! HTTP entry points.
//!
//! Three export routes, one per visibility mode, each with an optional
//! subject-id path parameter. The handlers differ only in the mode
//! constant they pin; everything else goes through the orchestrator.

use crate::export::run_export;
use crate::resolver::SubjectResolver;
use axum::extract::{Path, State};
use axum::http::header;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use eval_model::Visibility;
use std::sync::Arc;
use store::EvalStore;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across handlers
pub struct AppState {
    /// Evaluation-record store
    pub store: Arc<dyn EvalStore>,
    /// Subject resolver
    pub resolver: Arc<dyn SubjectResolver>,
}

/// Build the axum router with all routes
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/export/full", get(export_full))
        .route("/export/full/{id}", get(export_full_for))
        .route("/export/self", get(export_self))
        .route("/export/self/{id}", get(export_self_for))
        .route("/export/validator", get(export_validator))
        .route("/export/validator/{id}", get(export_validator_for))
        .layer(cors)
        .with_state(state)
}

/// GET /export/full - full record of the authenticated requester
async fn export_full(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    export(state, Visibility::Full, None, &headers).await
}

/// GET /export/full/{id} - full record of an identified user
async fn export_full_for(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    export(state, Visibility::Full, Some(id), &headers).await
}

/// GET /export/self - self-evaluated record of the requester
async fn export_self(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    export(state, Visibility::SelfOnly, None, &headers).await
}

/// GET /export/self/{id} - self-evaluated record of an identified user
async fn export_self_for(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    export(state, Visibility::SelfOnly, Some(id), &headers).await
}

/// GET /export/validator - validator-evaluated record of the requester
async fn export_validator(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    export(state, Visibility::ValidatorOnly, None, &headers).await
}

/// GET /export/validator/{id} - validator-evaluated record of an identified user
async fn export_validator_for(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    export(state, Visibility::ValidatorOnly, Some(id), &headers).await
}

async fn export(
    state: Arc<AppState>,
    visibility: Visibility,
    subject: Option<String>,
    headers: &HeaderMap,
) -> Response {
    let token = bearer_token(headers);
    match run_export(
        state.store.clone(),
        state.resolver.clone(),
        visibility,
        subject,
        token,
    )
    .await
    {
        Ok(response) => response,
        Err(fault) => fault.into_response(),
    }
}

/// Extract the opaque session token from the Authorization header
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}
