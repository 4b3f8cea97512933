//! Upstream clients for the mcp-relay gateway.
//!
//! Each client maps one gateway operation onto exactly one upstream HTTP
//! call, injects the static bearer credential, and hands back the parsed
//! JSON body. Nothing is retried or cached.

mod client;
mod error;
mod github;
mod openai;

pub use client::{build_http_client, endpoint, USER_AGENT};
pub use error::{Provider, UpstreamError, UpstreamResult};
pub use github::{GitHubClient, NewIssue};
pub use openai::{ChatCompletionRequest, ChatMessage, OpenAIClient};
