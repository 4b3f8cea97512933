use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("failed to load env file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("invalid value for {key}: {value:?}")]
    InvalidEnv { key: String, value: String },

    #[error("invalid {name} base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        name: &'static str,
        url: String,
        reason: String,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
