//! Upstream error types

use std::fmt;

use thiserror::Error;

pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// The third-party API a call is made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAI,
    GitHub,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAI => f.write_str("OpenAI"),
            Provider::GitHub => f.write_str("GitHub"),
        }
    }
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The credential for `provider` was not configured. No call was made.
    #[error("{provider} API key not found")]
    MissingCredential { provider: Provider },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("invalid upstream URL: {0}")]
    InvalidUrl(String),

    /// A caller-supplied path segment that would change the upstream path.
    #[error("invalid path segment {0:?}")]
    InvalidSegment(String),

    /// DNS, connect, timeout or body read failure.
    #[error("{provider} API request failed: {source}")]
    Transport {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with a non-2xx status.
    #[error("{provider} API request failed: {source}")]
    Status {
        provider: Provider,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse {provider} response: {source}")]
    Decode {
        provider: Provider,
        #[source]
        source: serde_json::Error,
    },
}

impl UpstreamError {
    pub fn provider(&self) -> Option<Provider> {
        match self {
            Self::MissingCredential { provider }
            | Self::Transport { provider, .. }
            | Self::Status { provider, .. }
            | Self::Decode { provider, .. } => Some(*provider),
            Self::ClientBuild(_) | Self::InvalidUrl(_) | Self::InvalidSegment(_) => None,
        }
    }

    /// Status reported by the upstream, when it answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(status.as_u16()),
            _ => None,
        }
    }
}
