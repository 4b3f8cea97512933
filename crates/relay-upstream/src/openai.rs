//! OpenAI chat completion client

use relay_config::{Credential, OpenAiSettings};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::client::{endpoint, send_json};
use crate::{Provider, UpstreamError, UpstreamResult};

/// Body of `POST /v1/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatCompletionRequest {
    /// A single user turn carrying `query`.
    pub fn single_user_message(model: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: query.into(),
            }],
        }
    }
}

/// Forwards free-text queries to the chat completion endpoint.
#[derive(Clone)]
pub struct OpenAIClient {
    http: Client,
    settings: OpenAiSettings,
    credential: Option<Credential>,
}

impl OpenAIClient {
    pub fn new(http: Client, settings: OpenAiSettings, credential: Option<Credential>) -> Self {
        Self {
            http,
            settings,
            credential,
        }
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Sends `query` as one user message and returns the upstream JSON body
    /// unmodified.
    pub async fn chat_completion(&self, query: &str) -> UpstreamResult<Value> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(UpstreamError::MissingCredential {
                provider: Provider::OpenAI,
            })?;

        let url = endpoint(&self.settings.base_url, &["v1", "chat", "completions"])?;
        let body = ChatCompletionRequest::single_user_message(&self.settings.model, query);

        debug!(url = %url, model = %body.model, "forwarding chat completion");

        let request = self
            .http
            .post(url)
            .bearer_auth(credential.expose())
            .header("Accept", "application/json")
            .json(&body);

        send_json(Provider::OpenAI, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_user_message_shape() {
        let body = ChatCompletionRequest::single_user_message("gpt-4o-mini", "hello");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "user", "content": "hello"}]
            })
        );
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_request() {
        let settings = OpenAiSettings {
            base_url: "http://127.0.0.1:1".to_string(),
            ..OpenAiSettings::default()
        };
        let client = OpenAIClient::new(Client::new(), settings, None);

        let err = client.chat_completion("hi").await.unwrap_err();
        assert!(matches!(
            err,
            UpstreamError::MissingCredential {
                provider: Provider::OpenAI
            }
        ));
        assert_eq!(err.to_string(), "OpenAI API key not found");
    }
}
