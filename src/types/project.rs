use serde::{Deserialize, Serialize};

use super::{Issue, Team, User};
use crate::lenient;

/// A project. `state` is free-form: planned, started, paused, completed or canceled.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub icon: String,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub color: String,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub state: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<ProjectStatus>,
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub lead: Option<User>,
    #[serde(
        default,
        deserialize_with = "lenient::nodes",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub teams: Vec<Team>,
    #[serde(
        default,
        deserialize_with = "lenient::nodes",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub issues: Vec<Issue>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub created_at: String,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub updated_at: String,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub started_at: String,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub target_date: String,
    #[serde(
        default,
        deserialize_with = "lenient::float",
        skip_serializing_if = "is_zero"
    )]
    pub sort_order: f64,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub url: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ProjectStatus {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
}

/// A project trimmed down to its status and issue list.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ProjectWithIssues {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<ProjectStatus>,
    #[serde(default, deserialize_with = "lenient::nodes")]
    pub issues: Vec<Issue>,
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_with_nested_connections() {
        let project: Project = serde_json::from_value(json!({
            "id": "project-1",
            "name": "Launch",
            "state": "started",
            "sortOrder": 12.5,
            "lead": { "id": "user-1", "name": "Ada", "email": "ada@example.com" },
            "status": { "id": "status-1", "name": "On track" },
            "teams": { "nodes": [
                { "id": "team-1", "name": "Engineering", "key": "ENG" },
                "not a team"
            ] },
            "issues": { "nodes": [{ "id": "issue-1", "identifier": "ENG-1", "title": "Ship" }] }
        }))
        .unwrap();

        assert_eq!(project.sort_order, 12.5);
        assert_eq!(project.lead.unwrap().name, "Ada");
        assert_eq!(project.status.unwrap().name, "On track");
        assert_eq!(project.teams.len(), 1);
        assert_eq!(project.teams[0].key, "ENG");
        assert_eq!(project.issues[0].identifier, "ENG-1");
    }

    #[test]
    fn test_missing_lead_and_teams() {
        let project: Project =
            serde_json::from_value(json!({ "id": "project-1", "name": "Launch" })).unwrap();
        assert!(project.lead.is_none());
        assert!(project.teams.is_empty());
    }

    #[test]
    fn test_project_with_issues_always_serializes_issues() {
        let value = serde_json::to_value(ProjectWithIssues {
            id: "project-1".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(value["issues"], json!([]));
        assert!(value.get("status").is_none());
    }
}
