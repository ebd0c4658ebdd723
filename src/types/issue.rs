use serde::{Deserialize, Serialize};

use super::{Project, User};
use crate::lenient;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub identifier: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub state: Option<WorkflowState>,
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub assignee: Option<User>,
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub project: Option<Project>,
    /// Only id, identifier and title are requested for the parent.
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent: Option<Box<Issue>>,
    #[serde(
        default,
        deserialize_with = "lenient::nodes",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<Issue>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub priority: i32,
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
    pub url: String,
    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub branch_name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_issue() -> serde_json::Value {
        json!({
            "id": "issue-1",
            "identifier": "ENG-1",
            "title": "Crash on start",
            "description": "Stack trace attached",
            "priority": 2,
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-02T00:00:00.000Z",
            "url": "https://linear.app/acme/issue/ENG-1",
            "branchName": "eng-1-crash-on-start",
            "state": { "id": "state-1", "name": "In Progress" },
            "assignee": { "id": "user-1", "name": "Ada", "email": "ada@example.com" },
            "project": { "id": "project-1", "name": "Launch" },
            "parent": { "id": "issue-0", "identifier": "ENG-0", "title": "Epic" }
        })
    }

    #[test]
    fn test_all_associations_populated() {
        let issue: Issue = serde_json::from_value(full_issue()).unwrap();

        assert_eq!(issue.identifier, "ENG-1");
        assert_eq!(issue.priority, 2);
        assert_eq!(issue.branch_name, "eng-1-crash-on-start");
        assert_eq!(issue.state.unwrap().name, "In Progress");
        assert_eq!(issue.assignee.unwrap().email, "ada@example.com");
        assert_eq!(issue.project.unwrap().name, "Launch");
        assert_eq!(issue.parent.unwrap().identifier, "ENG-0");
    }

    #[test]
    fn test_array_association_is_unset() {
        let mut payload = full_issue();
        let object = payload.as_object_mut().unwrap();
        object.insert("assignee".into(), json!(["u1", "Ada", "ada@example.com"]));
        object.insert("state".into(), json!([]));

        let issue: Issue = serde_json::from_value(payload).unwrap();
        assert!(issue.assignee.is_none());
        assert!(issue.state.is_none());
        assert!(issue.project.is_some());
    }

    #[test]
    fn test_removed_association_is_unset() {
        for key in ["state", "assignee", "project", "parent"] {
            let mut payload = full_issue();
            payload.as_object_mut().unwrap().remove(key);

            let issue: Issue = serde_json::from_value(payload).unwrap();
            let present = match key {
                "state" => issue.state.is_some(),
                "assignee" => issue.assignee.is_some(),
                "project" => issue.project.is_some(),
                _ => issue.parent.is_some(),
            };
            assert!(!present, "{key} should be unset");
        }
    }

    #[test]
    fn test_null_assignee_is_unset() {
        let mut payload = full_issue();
        payload["assignee"] = serde_json::Value::Null;
        let issue: Issue = serde_json::from_value(payload).unwrap();
        assert!(issue.assignee.is_none());
    }

    #[test]
    fn test_serialize_omits_empty_fields() {
        let issue = Issue {
            id: "issue-1".to_string(),
            identifier: "ENG-1".to_string(),
            title: "Title".to_string(),
            created_at: "2024-01-01".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&issue).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object["createdAt"], "2024-01-01");
        assert_eq!(object["priority"], 0);
        for key in ["description", "state", "children", "updatedAt", "url", "branchName"] {
            assert!(!object.contains_key(key), "{key} should be omitted");
        }
    }
}
