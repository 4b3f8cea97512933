//! Relay configuration.
//!
//! Settings come from three layers, later layers winning:
//! 1. Built-in defaults
//! 2. An optional `relay.yml` / `relay.yaml` settings file
//! 3. Environment variables (after loading the env file, `.env` by default)
//!
//! Upstream credentials (`OPENAI_API_KEY`, `GITHUB_API_KEY`) are only ever
//! read from the environment, once, and are held as [`Credential`]s.

pub mod credential;
pub mod error;
pub mod loader;
pub mod schema;

pub use credential::Credential;
pub use error::ConfigError;
pub use loader::{
    find_settings_file, load_config, load_settings_from_file, resolve, LoadOptions, GITHUB_API_KEY,
    OPENAI_API_KEY,
};
pub use schema::{
    Credentials, GitHubSettings, OpenAiSettings, RelayConfig, RelaySettings, ServerSettings,
};
