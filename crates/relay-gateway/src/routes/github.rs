use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use relay_upstream::NewIssue;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::Params;
use crate::envelope::{Action, Envelope};
use crate::error::GatewayError;
use crate::server::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserParams {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoParams {
    pub owner: String,
    pub repo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIssueParams {
    pub owner: String,
    pub repo: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

type EnvelopeResult<P> = Result<Json<Envelope<P>>, GatewayError>;

/// `GET /github-user?username=`
pub async fn fetch_user(
    State(state): State<Arc<AppState>>,
    Params(params): Params<UserParams>,
) -> EnvelopeResult<UserParams> {
    let action = Action::FetchGithubUser;
    info!(action = action.as_str(), username = %params.username, "forwarding");
    let output = state.github.fetch_user(&params.username).await?;
    Ok(Json(Envelope::new(action, params, output)))
}

/// `GET /github-repos?username=`
pub async fn fetch_repos(
    State(state): State<Arc<AppState>>,
    Params(params): Params<UserParams>,
) -> EnvelopeResult<UserParams> {
    let action = Action::FetchGithubRepos;
    info!(action = action.as_str(), username = %params.username, "forwarding");
    let output = state.github.fetch_repos(&params.username).await?;
    Ok(Json(Envelope::new(action, params, output)))
}

/// `GET /github-issues?owner=&repo=`
pub async fn fetch_issues(
    State(state): State<Arc<AppState>>,
    Params(params): Params<RepoParams>,
) -> EnvelopeResult<RepoParams> {
    let action = Action::FetchGithubIssues;
    info!(action = action.as_str(), owner = %params.owner, repo = %params.repo, "forwarding");
    let output = state
        .github
        .fetch_issues(&params.owner, &params.repo)
        .await?;
    Ok(Json(Envelope::new(action, params, output)))
}

/// `POST /create-issue?owner=&repo=&title=&body=`
///
/// Every call creates a new issue upstream.
pub async fn create_issue(
    State(state): State<Arc<AppState>>,
    Params(params): Params<CreateIssueParams>,
) -> EnvelopeResult<CreateIssueParams> {
    let action = Action::CreateIssue;
    info!(action = action.as_str(), owner = %params.owner, repo = %params.repo, "forwarding");
    let issue = NewIssue {
        title: params.title.clone(),
        body: params.body.clone(),
    };
    let output = state
        .github
        .create_issue(&params.owner, &params.repo, &issue)
        .await?;
    Ok(Json(Envelope::new(action, params, output)))
}
