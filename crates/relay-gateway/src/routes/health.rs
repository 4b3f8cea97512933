use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::server::AppState;

pub const STATUS_MESSAGE: &str = "MCP server is running";

#[derive(Debug, Serialize)]
pub struct StatusMessage {
    message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_secs: u64,
}

/// `GET /`
pub async fn root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: STATUS_MESSAGE,
    })
}

/// `GET /health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
