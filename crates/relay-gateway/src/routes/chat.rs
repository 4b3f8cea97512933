use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::Params;
use crate::error::GatewayError;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatParams {
    pub query: String,
}

/// `GET /mcp?query=`
///
/// The upstream body is relayed as-is, without an envelope.
pub async fn process_request(
    State(state): State<Arc<AppState>>,
    Params(params): Params<ChatParams>,
) -> Result<Json<Value>, GatewayError> {
    info!(model = state.openai.model(), "chat completion");
    let body = state.openai.chat_completion(&params.query).await?;
    Ok(Json(body))
}
