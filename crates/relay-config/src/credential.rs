//! Upstream bearer credentials.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// A static bearer token for an upstream API.
///
/// Read once at startup and never logged; `Debug` output is redacted.
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Builds a credential from a raw environment value. Blank values count
    /// as absent.
    pub fn from_env_value(value: Option<String>) -> Option<Self> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(Self::new)
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}
