//! MCP tool surface over the Linear operations.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, ErrorData as McpError, Implementation, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ServerHandler,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::{
    CreateIssueInput, CreateProjectInput, GetIssueOptions, GetProjectsOptions, UpdateIssueInput,
    UpdateProjectInput,
};
use crate::client::LinearClient;
use crate::error::LinearError;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetIssueRequest {
    #[schemars(description = "The Linear issue ID to fetch")]
    pub id: String,
    #[schemars(description = "Whether to include children (sub-issues) in the response")]
    pub include_children: Option<bool>,
    #[schemars(description = "Number of children to fetch when include_children is set (max 100)")]
    pub children_first: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetIssueByIdentifierRequest {
    #[schemars(description = "The issue identifier to search for (e.g., 'ENG-123')")]
    pub identifier: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetIssueChildrenRequest {
    #[schemars(description = "The Linear parent issue ID to fetch children for")]
    pub issue_id: String,
    #[schemars(description = "Number of children to fetch (max 100)")]
    pub first: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetTeamIssuesRequest {
    #[schemars(description = "The Linear team ID to fetch issues for")]
    pub team_id: String,
    #[schemars(description = "Number of issues to fetch (max 100)")]
    pub first: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateIssueRequest {
    #[schemars(description = "The Linear team ID to create the issue in")]
    pub team_id: String,
    #[schemars(description = "The title of the issue")]
    pub title: String,
    #[schemars(description = "The description of the issue")]
    pub description: Option<String>,
    #[schemars(description = "The priority of the issue (1-4)")]
    pub priority: Option<i32>,
    #[schemars(description = "The state ID for the issue")]
    pub state_id: Option<String>,
    #[schemars(description = "The user ID to assign the issue to")]
    pub assignee_id: Option<String>,
    #[schemars(description = "The project ID to associate the issue with")]
    pub project_id: Option<String>,
    #[schemars(description = "The parent issue ID to create this as a sub-issue of")]
    pub parent_id: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateIssueRequest {
    #[schemars(description = "The Linear issue ID to update")]
    pub issue_id: String,
    #[schemars(description = "The new title for the issue")]
    pub title: Option<String>,
    #[schemars(description = "The new description for the issue")]
    pub description: Option<String>,
    #[schemars(description = "The new priority for the issue (1-4)")]
    pub priority: Option<i32>,
    #[schemars(description = "The new state ID for the issue")]
    pub state_id: Option<String>,
    #[schemars(description = "The new assignee user ID")]
    pub assignee_id: Option<String>,
    #[schemars(description = "The new project ID")]
    pub project_id: Option<String>,
    #[schemars(description = "The new parent issue ID")]
    pub parent_id: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetProjectsRequest {
    #[schemars(description = "Number of projects to fetch (max 100)")]
    pub first: Option<i64>,
    #[schemars(
        description = "Only return projects in this state (planned, started, paused, completed, canceled)"
    )]
    pub state: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetProjectRequest {
    #[schemars(description = "The Linear project ID to fetch")]
    pub project_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateProjectRequest {
    #[schemars(description = "The name of the project")]
    pub name: String,
    #[schemars(description = "The description of the project")]
    pub description: Option<String>,
    #[schemars(description = "The icon for the project")]
    pub icon: Option<String>,
    #[schemars(description = "The color for the project")]
    pub color: Option<String>,
    #[schemars(
        description = "The state of the project (planned, started, paused, completed, canceled)"
    )]
    pub state: Option<String>,
    #[schemars(description = "The team IDs to associate with the project")]
    pub team_ids: Option<Vec<String>>,
    #[schemars(description = "The user ID of the project lead")]
    pub lead_id: Option<String>,
    #[schemars(description = "Start date (YYYY-MM-DD)")]
    pub start_date: Option<String>,
    #[schemars(description = "Target date (YYYY-MM-DD)")]
    pub target_date: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateProjectRequest {
    #[schemars(description = "The Linear project ID to update")]
    pub project_id: String,
    #[schemars(description = "The new name for the project")]
    pub name: Option<String>,
    #[schemars(description = "The new description for the project")]
    pub description: Option<String>,
    #[schemars(description = "The new icon for the project")]
    pub icon: Option<String>,
    #[schemars(description = "The new color for the project")]
    pub color: Option<String>,
    #[schemars(
        description = "The new state of the project (planned, started, paused, completed, canceled)"
    )]
    pub state: Option<String>,
    #[schemars(description = "The new team IDs to associate with the project")]
    pub team_ids: Option<Vec<String>>,
    #[schemars(description = "The new user ID of the project lead")]
    pub lead_id: Option<String>,
    #[schemars(description = "New start date (YYYY-MM-DD)")]
    pub start_date: Option<String>,
    #[schemars(description = "New target date (YYYY-MM-DD)")]
    pub target_date: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetTeamProjectsRequest {
    #[schemars(description = "The Linear team ID to fetch projects for")]
    pub team_id: String,
    #[schemars(description = "Number of projects to fetch (max 100)")]
    pub first: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetProjectIssuesRequest {
    #[schemars(description = "The Linear project ID to fetch issues for")]
    pub project_id: String,
    #[schemars(description = "Number of issues to fetch (max 100)")]
    pub first: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DownloadAttachmentRequest {
    #[schemars(description = "URL of the attachment to download (must be from uploads.linear.app)")]
    pub url: String,
    #[schemars(description = "Local file path to save the downloaded attachment to")]
    pub file_path: String,
}

/// Empty strings from the caller mean "leave unchanged".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn json_result<T: Serialize>(
    action: &str,
    result: Result<T, LinearError>,
) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => {
            let text = serde_json::to_string_pretty(&value).map_err(|e| {
                McpError::internal_error(format!("failed to marshal {action} result: {e}"), None)
            })?;
            Ok(CallToolResult::success(vec![Content::text(text)]))
        }
        Err(e) => {
            warn!(action, error = %e, "Tool call failed");
            Ok(CallToolResult::error(vec![Content::text(format!(
                "failed to {action}: {e}"
            ))]))
        }
    }
}

#[derive(Clone)]
pub struct LinearMcp {
    client: Arc<LinearClient>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl LinearMcp {
    pub fn new(client: LinearClient) -> Self {
        Self {
            client: Arc::new(client),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(name = "get_issue", description = "Get a Linear issue by ID")]
    async fn get_issue(
        &self,
        Parameters(request): Parameters<GetIssueRequest>,
    ) -> Result<CallToolResult, McpError> {
        let options = GetIssueOptions {
            include_children: request.include_children.unwrap_or(false),
            children_first: request.children_first,
        };
        json_result(
            "get issue",
            self.client.get_issue(&request.id, options).await,
        )
    }

    #[tool(
        name = "get_issue_by_identifier",
        description = "Get a Linear issue by its identifier (e.g., 'ENG-123')"
    )]
    async fn get_issue_by_identifier(
        &self,
        Parameters(request): Parameters<GetIssueByIdentifierRequest>,
    ) -> Result<CallToolResult, McpError> {
        json_result(
            "get issue by identifier",
            self.client.get_issue_by_identifier(&request.identifier).await,
        )
    }

    #[tool(
        name = "get_issue_children",
        description = "Get sub-issues for a Linear issue"
    )]
    async fn get_issue_children(
        &self,
        Parameters(request): Parameters<GetIssueChildrenRequest>,
    ) -> Result<CallToolResult, McpError> {
        json_result(
            "get issue children",
            self.client
                .get_issue_children(&request.issue_id, request.first)
                .await,
        )
    }

    #[tool(name = "get_team_issues", description = "Get issues for a Linear team")]
    async fn get_team_issues(
        &self,
        Parameters(request): Parameters<GetTeamIssuesRequest>,
    ) -> Result<CallToolResult, McpError> {
        json_result(
            "get team issues",
            self.client
                .get_team_issues(&request.team_id, request.first)
                .await,
        )
    }

    #[tool(name = "create_issue", description = "Create a new Linear issue")]
    async fn create_issue(
        &self,
        Parameters(request): Parameters<CreateIssueRequest>,
    ) -> Result<CallToolResult, McpError> {
        let input = CreateIssueInput {
            team_id: request.team_id,
            title: request.title,
            description: request.description.unwrap_or_default(),
            priority: request.priority.unwrap_or(0),
            state_id: request.state_id.unwrap_or_default(),
            assignee_id: request.assignee_id.unwrap_or_default(),
            project_id: request.project_id.unwrap_or_default(),
            parent_id: request.parent_id.unwrap_or_default(),
        };
        json_result("create issue", self.client.create_issue(&input).await)
    }

    #[tool(name = "update_issue", description = "Update an existing Linear issue")]
    async fn update_issue(
        &self,
        Parameters(request): Parameters<UpdateIssueRequest>,
    ) -> Result<CallToolResult, McpError> {
        let input = UpdateIssueInput {
            title: request.title,
            description: request.description,
            priority: request.priority,
            state_id: request.state_id,
            assignee_id: request.assignee_id,
            project_id: request.project_id,
            parent_id: request.parent_id,
        };
        json_result(
            "update issue",
            self.client.update_issue(&request.issue_id, &input).await,
        )
    }

    #[tool(
        name = "get_projects",
        description = "List Linear projects, optionally filtered by state"
    )]
    async fn get_projects(
        &self,
        Parameters(request): Parameters<GetProjectsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let options = GetProjectsOptions {
            first: request.first,
            state: request.state,
        };
        json_result("get projects", self.client.get_projects(&options).await)
    }

    #[tool(name = "get_project", description = "Get a Linear project by ID")]
    async fn get_project(
        &self,
        Parameters(request): Parameters<GetProjectRequest>,
    ) -> Result<CallToolResult, McpError> {
        json_result(
            "get project",
            self.client.get_project(&request.project_id).await,
        )
    }

    #[tool(name = "create_project", description = "Create a new Linear project")]
    async fn create_project(
        &self,
        Parameters(request): Parameters<CreateProjectRequest>,
    ) -> Result<CallToolResult, McpError> {
        let input = CreateProjectInput {
            name: request.name,
            description: request.description.unwrap_or_default(),
            icon: request.icon.unwrap_or_default(),
            color: request.color.unwrap_or_default(),
            state: request.state.unwrap_or_default(),
            team_ids: request.team_ids.unwrap_or_default(),
            lead_id: request.lead_id.unwrap_or_default(),
            start_date: request.start_date.unwrap_or_default(),
            target_date: request.target_date.unwrap_or_default(),
        };
        json_result("create project", self.client.create_project(&input).await)
    }

    #[tool(
        name = "update_project",
        description = "Update an existing Linear project"
    )]
    async fn update_project(
        &self,
        Parameters(request): Parameters<UpdateProjectRequest>,
    ) -> Result<CallToolResult, McpError> {
        let input = UpdateProjectInput {
            name: non_empty(request.name),
            description: non_empty(request.description),
            icon: non_empty(request.icon),
            color: non_empty(request.color),
            state: non_empty(request.state),
            team_ids: request.team_ids.unwrap_or_default(),
            lead_id: non_empty(request.lead_id),
            start_date: non_empty(request.start_date),
            target_date: non_empty(request.target_date),
        };
        json_result(
            "update project",
            self.client
                .update_project(&request.project_id, &input)
                .await,
        )
    }

    #[tool(name = "get_teams", description = "Get all Linear teams")]
    async fn get_teams(&self) -> Result<CallToolResult, McpError> {
        json_result("get teams", self.client.get_teams().await)
    }

    #[tool(
        name = "get_team_projects",
        description = "Get projects for a Linear team"
    )]
    async fn get_team_projects(
        &self,
        Parameters(request): Parameters<GetTeamProjectsRequest>,
    ) -> Result<CallToolResult, McpError> {
        json_result(
            "get team projects",
            self.client
                .get_team_projects(&request.team_id, request.first)
                .await,
        )
    }

    #[tool(
        name = "get_project_issues",
        description = "Get issues for a Linear project"
    )]
    async fn get_project_issues(
        &self,
        Parameters(request): Parameters<GetProjectIssuesRequest>,
    ) -> Result<CallToolResult, McpError> {
        json_result(
            "get project issues",
            self.client
                .get_project_issues(&request.project_id, request.first)
                .await,
        )
    }

    #[tool(
        name = "get_viewer",
        description = "Get the Linear user the API key belongs to"
    )]
    async fn get_viewer(&self) -> Result<CallToolResult, McpError> {
        json_result("get viewer", self.client.get_viewer().await)
    }

    #[tool(
        name = "download_attachment",
        description = "Download a Linear attachment file"
    )]
    async fn download_attachment(
        &self,
        Parameters(request): Parameters<DownloadAttachmentRequest>,
    ) -> Result<CallToolResult, McpError> {
        let target = PathBuf::from(&request.file_path);
        match self.client.download_attachment(&request.url, &target).await {
            Ok(path) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Successfully downloaded attachment to {}",
                path.display()
            ))])),
            Err(e) => {
                warn!(url = %request.url, error = %e, "Attachment download failed");
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "failed to download attachment: {e}"
                ))]))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for LinearMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "linear-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                website_url: None,
                icons: None,
            },
            instructions: Some(
                "Linear issue tracking tools. Use get_teams to discover team IDs, \
                 get_team_issues or get_project_issues to browse work, get_issue or \
                 get_issue_by_identifier for details, and create_issue / update_issue to \
                 change issues. Projects are managed with get_projects, get_project, \
                 create_project and update_project."
                    .to_string(),
            ),
        }
    }
}
