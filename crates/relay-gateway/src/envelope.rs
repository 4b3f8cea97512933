//! The `{input, output}` response envelope for GitHub routes.

use serde::Serialize;
use serde_json::Value;

/// Name of the operation echoed in `input.action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    FetchGithubUser,
    FetchGithubRepos,
    FetchGithubIssues,
    CreateIssue,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::FetchGithubUser => "fetch_github_user",
            Action::FetchGithubRepos => "fetch_github_repos",
            Action::FetchGithubIssues => "fetch_github_issues",
            Action::CreateIssue => "create_issue",
        }
    }
}

/// `input` half of the envelope: the action plus the caller's parameters,
/// flattened next to it.
#[derive(Debug, Clone, Serialize)]
pub struct Input<P> {
    pub action: Action,
    #[serde(flatten)]
    pub params: P,
}

#[derive(Debug, Clone, Serialize)]
pub struct Envelope<P> {
    pub input: Input<P>,
    pub output: Value,
}

impl<P: Serialize> Envelope<P> {
    pub fn new(action: Action, params: P, output: Value) -> Self {
        Self {
            input: Input { action, params },
            output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct User {
        username: String,
    }

    #[test]
    fn test_envelope_flattens_params_next_to_action() {
        let envelope = Envelope::new(
            Action::FetchGithubUser,
            User {
                username: "octocat".to_string(),
            },
            json!({"login": "octocat", "id": 1}),
        );

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "input": {"action": "fetch_github_user", "username": "octocat"},
                "output": {"login": "octocat", "id": 1}
            })
        );
    }

    #[test]
    fn test_output_keeps_upstream_order_and_numbers() {
        let upstream = r#"{"zeta":1,"alpha":18446744073709551616,"mid":[3,2,1]}"#;
        let output: Value = serde_json::from_str(upstream).unwrap();
        let envelope = Envelope::new(
            Action::FetchGithubUser,
            User {
                username: "octocat".to_string(),
            },
            output,
        );

        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            format!(r#"{{"input":{{"action":"fetch_github_user","username":"octocat"}},"output":{upstream}}}"#)
        );
    }

    #[test]
    fn test_action_serializes_as_str() {
        for action in [
            Action::FetchGithubUser,
            Action::FetchGithubRepos,
            Action::FetchGithubIssues,
            Action::CreateIssue,
        ] {
            assert_eq!(serde_json::to_value(action).unwrap(), json!(action.as_str()));
        }
    }
}
