//! Route-boundary errors and their HTTP mapping.
//!
//! | Cause | Status |
//! |---|---|
//! | missing credential, bad upstream setup | 500 |
//! | upstream transport failure or non-2xx | 400 |
//! | bad query parameters or path segment | 422 |
//! | upstream body is not JSON | 502 |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use relay_upstream::UpstreamError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// The one error body every route returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            error: error.into(),
            details,
        }
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidParams(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Upstream(e) => match e {
                UpstreamError::MissingCredential { .. }
                | UpstreamError::ClientBuild(_)
                | UpstreamError::InvalidUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
                UpstreamError::InvalidSegment(_) => StatusCode::UNPROCESSABLE_ENTITY,
                UpstreamError::Transport { .. } | UpstreamError::Status { .. } => {
                    StatusCode::BAD_REQUEST
                }
                UpstreamError::Decode { .. } => StatusCode::BAD_GATEWAY,
            },
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            Self::InvalidParams(details) => {
                ErrorBody::new("Invalid request parameters", Some(details.clone()))
            }
            Self::Upstream(e) => match e {
                UpstreamError::MissingCredential { .. } => ErrorBody::new(e.to_string(), None),
                UpstreamError::ClientBuild(_) | UpstreamError::InvalidUrl(_) => {
                    ErrorBody::new("Upstream misconfigured", Some(e.to_string()))
                }
                UpstreamError::InvalidSegment(_) => {
                    ErrorBody::new("Invalid request parameters", Some(e.to_string()))
                }
                UpstreamError::Transport { provider, source }
                | UpstreamError::Status {
                    provider, source, ..
                } => ErrorBody::new(
                    format!("{provider} API request failed"),
                    Some(source.to_string()),
                ),
                UpstreamError::Decode { source, .. } => {
                    ErrorBody::new("Failed to parse response", Some(source.to_string()))
                }
            },
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let upstream_status = match &self {
            Self::Upstream(e) => e.upstream_status(),
            Self::InvalidParams(_) => None,
        };
        if status.is_server_error() {
            error!(%status, ?upstream_status, error = %self, "request failed");
        } else {
            warn!(%status, ?upstream_status, error = %self, "request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}
