//! GitHub REST client

use relay_config::{Credential, GitHubSettings};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::client::{endpoint, send_json};
use crate::{Provider, UpstreamError, UpstreamResult};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Body of `POST /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
}

/// User, repository and issue endpoints of the GitHub REST API.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    settings: GitHubSettings,
    credential: Option<Credential>,
}

impl GitHubClient {
    pub fn new(http: Client, settings: GitHubSettings, credential: Option<Credential>) -> Self {
        Self {
            http,
            settings,
            credential,
        }
    }

    /// `GET /users/{username}`
    pub async fn fetch_user(&self, username: &str) -> UpstreamResult<Value> {
        self.call(Method::GET, &["users", username], None::<&()>)
            .await
    }

    /// `GET /users/{username}/repos`
    pub async fn fetch_repos(&self, username: &str) -> UpstreamResult<Value> {
        self.call(Method::GET, &["users", username, "repos"], None::<&()>)
            .await
    }

    /// `GET /repos/{owner}/{repo}/issues`
    pub async fn fetch_issues(&self, owner: &str, repo: &str) -> UpstreamResult<Value> {
        self.call(Method::GET, &["repos", owner, repo, "issues"], None::<&()>)
            .await
    }

    /// `POST /repos/{owner}/{repo}/issues`
    ///
    /// Not idempotent: every call creates a new issue.
    pub async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        issue: &NewIssue,
    ) -> UpstreamResult<Value> {
        self.call(Method::POST, &["repos", owner, repo, "issues"], Some(issue))
            .await
    }

    async fn call<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> UpstreamResult<Value> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(UpstreamError::MissingCredential {
                provider: Provider::GitHub,
            })?;

        let url = endpoint(&self.settings.base_url, segments)?;
        debug!(%method, url = %url, "forwarding GitHub request");

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(credential.expose())
            .header("Accept", GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", &self.settings.api_version);

        if let Some(body) = body {
            request = request.json(body);
        }

        send_json(Provider::GitHub, request).await
    }
}
