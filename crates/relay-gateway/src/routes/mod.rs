//! Route handlers and the query-string extractor they share.

pub mod chat;
pub mod github;
pub mod health;

use std::sync::Arc;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;

use crate::error::{ErrorBody, GatewayError};
use crate::server::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/mcp", get(chat::process_request))
        .route("/github-user", get(github::fetch_user))
        .route("/github-repos", get(github::fetch_repos))
        .route("/github-issues", get(github::fetch_issues))
        .route("/create-issue", post(github::create_issue))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .with_state(state)
}

async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::new("Method not allowed", None)),
    )
}

async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not found", None)))
}

/// Query-string parameters, rejected with the gateway's error body instead
/// of axum's plain-text rejection.
#[derive(Debug, Clone)]
pub struct Params<T>(pub T);

impl<T, S> FromRequestParts<S> for Params<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| GatewayError::InvalidParams(rejection.body_text()))?;
        Ok(Params(value))
    }
}
