//! mcp-relay gateway.
//!
//! Maps each inbound route onto exactly one upstream call:
//! - `GET /` and `GET /health`
//! - `GET /mcp` (OpenAI chat completions, body relayed verbatim)
//! - `GET /github-user`, `GET /github-repos`, `GET /github-issues`
//! - `POST /create-issue`
//!
//! GitHub responses are wrapped in an [`envelope::Envelope`]. Every failure is
//! converted to the single error body in [`error::ErrorBody`].

pub mod envelope;
pub mod error;
pub mod routes;
pub mod server;

pub use envelope::{Action, Envelope};
pub use error::{ErrorBody, GatewayError};
pub use server::{serve, GatewayServer};
