//! Shared request plumbing for the upstream clients.

use std::time::Duration;

use relay_config::ServerSettings;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{Provider, UpstreamError, UpstreamResult};

pub const USER_AGENT: &str = concat!("mcp-relay/", env!("CARGO_PKG_VERSION"));

/// Builds the connection pool shared by every upstream client.
///
/// Both timeouts are always set so a hanging upstream cannot hold a handler
/// forever.
pub fn build_http_client(settings: &ServerSettings) -> UpstreamResult<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .build()
        .map_err(UpstreamError::ClientBuild)
}

/// Joins `segments` onto `base_url`, percent-encoding each one so caller
/// input can never add, remove or escape path components.
pub fn endpoint(base_url: &str, segments: &[&str]) -> UpstreamResult<Url> {
    for segment in segments {
        if matches!(*segment, "" | "." | "..") {
            return Err(UpstreamError::InvalidSegment(segment.to_string()));
        }
    }

    let mut url =
        Url::parse(base_url).map_err(|e| UpstreamError::InvalidUrl(format!("{base_url}: {e}")))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| UpstreamError::InvalidUrl(format!("{base_url}: not a base URL")))?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}

/// Sends `request` and decodes a 2xx body as JSON.
pub(crate) async fn send_json(provider: Provider, request: RequestBuilder) -> UpstreamResult<Value> {
    let response = request
        .send()
        .await
        .map_err(|source| UpstreamError::Transport { provider, source })?;

    let status = response.status();
    debug!(%provider, %status, "upstream responded");

    let response = response
        .error_for_status()
        .map_err(|source| UpstreamError::Status {
            provider,
            status,
            source,
        })?;

    let body = response
        .bytes()
        .await
        .map_err(|source| UpstreamError::Transport { provider, source })?;

    serde_json::from_slice(&body).map_err(|source| UpstreamError::Decode { provider, source })
}
