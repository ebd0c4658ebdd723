use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::client::LinearClient;
use crate::error::{LinearError, Result};
use crate::lenient;
use crate::queries::{
    page_size, CREATE_ISSUE_MUTATION, GET_ISSUE_BY_IDENTIFIER_QUERY, GET_ISSUE_CHILDREN_QUERY,
    GET_ISSUE_QUERY, GET_TEAM_ISSUES_QUERY, UPDATE_ISSUE_MUTATION,
};
use crate::responses::{required, Connection, MutationPayload};
use crate::types::Issue;

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z0-9_]*)-(\d+)\s*$").expect("identifier pattern is valid")
});

#[derive(Debug, Default, Clone, Copy)]
pub struct GetIssueOptions {
    /// Follow up with a children fetch and nest the results.
    pub include_children: bool,
    pub children_first: Option<i64>,
}

/// Fields for `issueCreate`. Empty strings and a non-positive priority are not sent.
#[derive(Serialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueInput {
    pub team_id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "not_positive")]
    pub priority: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub assignee_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub project_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parent_id: String,
}

#[derive(Serialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIssueInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

fn not_positive(value: &i32) -> bool {
    *value <= 0
}

#[derive(Deserialize)]
struct IssueResponse {
    #[serde(default, deserialize_with = "lenient::optional")]
    issue: Option<Issue>,
}

#[derive(Deserialize)]
struct IssueChildrenResponse {
    #[serde(default, deserialize_with = "lenient::optional")]
    issue: Option<IssueChildren>,
}

#[derive(Deserialize)]
struct IssueChildren {
    #[serde(default, deserialize_with = "lenient::optional")]
    children: Option<Connection<Issue>>,
}

#[derive(Deserialize)]
struct TeamIssuesResponse {
    #[serde(default, deserialize_with = "lenient::optional")]
    team: Option<TeamIssues>,
}

#[derive(Deserialize)]
struct TeamIssues {
    #[serde(default, deserialize_with = "lenient::optional")]
    issues: Option<Connection<Issue>>,
}

#[derive(Deserialize)]
struct IssuesResponse {
    #[serde(default, deserialize_with = "lenient::optional")]
    issues: Option<Connection<Issue>>,
}

#[derive(Deserialize)]
struct CreateIssueResponse {
    #[serde(
        rename = "issueCreate",
        default,
        deserialize_with = "lenient::optional"
    )]
    issue_create: Option<MutationPayload<Issue>>,
}

#[derive(Deserialize)]
struct UpdateIssueResponse {
    #[serde(
        rename = "issueUpdate",
        default,
        deserialize_with = "lenient::optional"
    )]
    issue_update: Option<MutationPayload<Issue>>,
}

/// Split `ENG-123` into its team key and issue number.
pub fn parse_identifier(identifier: &str) -> Result<(String, i64)> {
    let captures = IDENTIFIER_RE
        .captures(identifier)
        .ok_or_else(|| LinearError::InvalidIdentifier(identifier.to_string()))?;

    let number = captures[2]
        .parse::<i64>()
        .map_err(|_| LinearError::InvalidIdentifier(identifier.to_string()))?;

    Ok((captures[1].to_uppercase(), number))
}

impl LinearClient {
    pub async fn get_issue(&self, id: &str, options: GetIssueOptions) -> Result<Issue> {
        let response: IssueResponse = self
            .query("GetIssue", GET_ISSUE_QUERY, Some(json!({ "id": id })))
            .await?;

        let mut issue = required(response.issue, "GetIssue", "issue")?;

        if options.include_children {
            issue.children = self
                .get_issue_children(id, options.children_first)
                .await
                .map_err(|e| LinearError::Children {
                    id: id.to_string(),
                    source: Box::new(e),
                })?;
        }

        Ok(issue)
    }

    pub async fn get_issue_children(&self, id: &str, first: Option<i64>) -> Result<Vec<Issue>> {
        let variables = json!({
            "id": id,
            "first": page_size(first),
        });

        let response: IssueChildrenResponse = self
            .query("GetIssueChildren", GET_ISSUE_CHILDREN_QUERY, Some(variables))
            .await?;

        let issue = required(response.issue, "GetIssueChildren", "issue")?;
        required(issue.children, "GetIssueChildren", "children")?.into_nodes("GetIssueChildren")
    }

    pub async fn get_issue_by_identifier(&self, identifier: &str) -> Result<Issue> {
        let (team_key, number) = parse_identifier(identifier)?;
        debug!(%team_key, number, "Looking up issue by identifier");

        let variables = json!({
            "teamKey": team_key,
            "number": number,
        });

        let response: IssuesResponse = self
            .query(
                "GetIssueByIdentifier",
                GET_ISSUE_BY_IDENTIFIER_QUERY,
                Some(variables),
            )
            .await?;

        required(response.issues, "GetIssueByIdentifier", "issues")?
            .into_nodes("GetIssueByIdentifier")?
            .into_iter()
            .next()
            .ok_or_else(|| LinearError::IssueNotFound(identifier.to_string()))
    }

    pub async fn get_team_issues(&self, team_id: &str, first: Option<i64>) -> Result<Vec<Issue>> {
        let variables = json!({
            "teamId": team_id,
            "first": page_size(first),
        });

        let response: TeamIssuesResponse = self
            .query("GetTeamIssues", GET_TEAM_ISSUES_QUERY, Some(variables))
            .await?;

        let team = required(response.team, "GetTeamIssues", "team")?;
        required(team.issues, "GetTeamIssues", "issues")?.into_nodes("GetTeamIssues")
    }

    pub async fn create_issue(&self, input: &CreateIssueInput) -> Result<Issue> {
        let variables = json!({ "input": input });

        let response: CreateIssueResponse = self
            .query("CreateIssue", CREATE_ISSUE_MUTATION, Some(variables))
            .await?;

        required(response.issue_create, "CreateIssue", "issueCreate")?
            .into_record("CreateIssue", "issue")
    }

    pub async fn update_issue(&self, id: &str, input: &UpdateIssueInput) -> Result<Issue> {
        let variables = json!({
            "id": id,
            "input": input,
        });

        let response: UpdateIssueResponse = self
            .query("UpdateIssue", UPDATE_ISSUE_MUTATION, Some(variables))
            .await?;

        required(response.issue_update, "UpdateIssue", "issueUpdate")?
            .into_record("UpdateIssue", "issue")
    }
}
