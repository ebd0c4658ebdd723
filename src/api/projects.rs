use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::LinearClient;
use crate::error::Result;
use crate::lenient;
use crate::queries::{
    page_size, CREATE_PROJECT_MUTATION, GET_PROJECTS_QUERY, GET_PROJECT_ISSUES_QUERY,
    GET_PROJECT_QUERY, GET_TEAM_PROJECTS_QUERY, UPDATE_PROJECT_MUTATION,
};
use crate::responses::{required, Connection, MutationPayload};
use crate::types::{Project, ProjectWithIssues};

#[derive(Debug, Default, Clone)]
pub struct GetProjectsOptions {
    pub first: Option<i64>,
    /// started, planned, paused, completed or canceled
    pub state: Option<String>,
}

/// Fields for `projectCreate`. Empty strings and an empty team list are not sent.
#[derive(Serialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectInput {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub color: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub team_ids: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lead_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub start_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub target_date: String,
}

#[derive(Serialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub team_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
}

#[derive(Deserialize)]
struct ProjectsResponse {
    #[serde(default, deserialize_with = "lenient::optional")]
    projects: Option<Connection<Project>>,
}

#[derive(Deserialize)]
struct ProjectResponse {
    #[serde(default, deserialize_with = "lenient::optional")]
    project: Option<Project>,
}

#[derive(Deserialize)]
struct ProjectIssuesResponse {
    #[serde(default, deserialize_with = "lenient::optional")]
    project: Option<ProjectWithIssues>,
}

#[derive(Deserialize)]
struct TeamProjectsResponse {
    #[serde(default, deserialize_with = "lenient::optional")]
    team: Option<TeamProjects>,
}

#[derive(Deserialize)]
struct TeamProjects {
    #[serde(default, deserialize_with = "lenient::optional")]
    projects: Option<Connection<Project>>,
}

#[derive(Deserialize)]
struct CreateProjectResponse {
    #[serde(
        rename = "projectCreate",
        default,
        deserialize_with = "lenient::optional"
    )]
    project_create: Option<MutationPayload<Project>>,
}

#[derive(Deserialize)]
struct UpdateProjectResponse {
    #[serde(
        rename = "projectUpdate",
        default,
        deserialize_with = "lenient::optional"
    )]
    project_update: Option<MutationPayload<Project>>,
}

impl LinearClient {
    pub async fn get_projects(&self, options: &GetProjectsOptions) -> Result<Vec<Project>> {
        let filter = options
            .state
            .as_deref()
            .filter(|state| !state.is_empty())
            .map(|state| json!({ "state": { "eq": state } }));

        let variables = json!({
            "first": page_size(options.first),
            "filter": filter,
        });

        let response: ProjectsResponse = self
            .query("GetProjects", GET_PROJECTS_QUERY, Some(variables))
            .await?;

        required(response.projects, "GetProjects", "projects")?.into_nodes("GetProjects")
    }

    pub async fn get_project(&self, id: &str) -> Result<Project> {
        let response: ProjectResponse = self
            .query("GetProject", GET_PROJECT_QUERY, Some(json!({ "id": id })))
            .await?;

        required(response.project, "GetProject", "project")
    }

    pub async fn create_project(&self, input: &CreateProjectInput) -> Result<Project> {
        let variables = json!({ "input": input });

        let response: CreateProjectResponse = self
            .query("CreateProject", CREATE_PROJECT_MUTATION, Some(variables))
            .await?;

        required(response.project_create, "CreateProject", "projectCreate")?
            .into_record("CreateProject", "project")
    }

    pub async fn update_project(&self, id: &str, input: &UpdateProjectInput) -> Result<Project> {
        let variables = json!({
            "id": id,
            "input": input,
        });

        let response: UpdateProjectResponse = self
            .query("UpdateProject", UPDATE_PROJECT_MUTATION, Some(variables))
            .await?;

        required(response.project_update, "UpdateProject", "projectUpdate")?
            .into_record("UpdateProject", "project")
    }

    pub async fn get_project_issues(
        &self,
        project_id: &str,
        first: Option<i64>,
    ) -> Result<ProjectWithIssues> {
        let variables = json!({
            "projectId": project_id,
            "first": page_size(first),
        });

        let response: ProjectIssuesResponse = self
            .query("GetProjectIssues", GET_PROJECT_ISSUES_QUERY, Some(variables))
            .await?;

        required(response.project, "GetProjectIssues", "project")
    }

    pub async fn get_team_projects(
        &self,
        team_id: &str,
        first: Option<i64>,
    ) -> Result<Vec<Project>> {
        let variables = json!({
            "teamId": team_id,
            "first": page_size(first),
        });

        let response: TeamProjectsResponse = self
            .query("GetTeamProjects", GET_TEAM_PROJECTS_QUERY, Some(variables))
            .await?;

        let team = required(response.team, "GetTeamProjects", "team")?;
        required(team.projects, "GetTeamProjects", "projects")?.into_nodes("GetTeamProjects")
    }
}
