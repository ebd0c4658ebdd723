//! GraphQL documents for every API operation.
//!
//! The issue documents live next to this file as `.graphql` files; the
//! project, team and user ones are composed here from shared field lists.

use const_format::concatcp;

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Resolve a requested page size.
///
/// Anything outside `1..=100` (or absent) falls back to the default rather than
/// being clamped to the nearest bound.
pub fn page_size(first: Option<i64>) -> i64 {
    match first {
        Some(n) if (1..=MAX_PAGE_SIZE).contains(&n) => n,
        _ => DEFAULT_PAGE_SIZE,
    }
}

pub const GET_ISSUE_QUERY: &str = include_str!("graphql/get_issue.graphql");
pub const GET_ISSUE_CHILDREN_QUERY: &str = include_str!("graphql/get_issue_children.graphql");
pub const GET_TEAM_ISSUES_QUERY: &str = include_str!("graphql/get_team_issues.graphql");
pub const CREATE_ISSUE_MUTATION: &str = include_str!("graphql/create_issue.graphql");
pub const UPDATE_ISSUE_MUTATION: &str = include_str!("graphql/update_issue.graphql");
pub const GET_PROJECT_ISSUES_QUERY: &str = include_str!("graphql/get_project_issues.graphql");

const USER_FIELDS: &str = "
    id
    name
    email
";

const TEAM_FIELDS: &str = "
    id
    name
    key
";

const ISSUE_FIELDS: &str = concatcp!(
    "
    id
    identifier
    title
    description
    priority
    createdAt
    updatedAt
    url
    branchName
    state {
        id
        name
    }
    assignee {",
    USER_FIELDS,
    "}
"
);

const PROJECT_FIELDS: &str = concatcp!(
    "
    id
    name
    description
    icon
    color
    state
    createdAt
    updatedAt
    startedAt
    targetDate
    sortOrder
    url
    status {
        id
        name
    }
    lead {",
    USER_FIELDS,
    "}
    teams {
        nodes {",
    TEAM_FIELDS,
    "}
    }
"
);

pub const GET_ISSUE_BY_IDENTIFIER_QUERY: &str = concatcp!(
    "
query GetIssueByIdentifier($teamKey: String!, $number: Float!) {
    issues(filter: { team: { key: { eq: $teamKey } }, number: { eq: $number } }, first: 1) {
        nodes {",
    ISSUE_FIELDS,
    "
            project {
                id
                name
            }
            parent {
                id
                identifier
                title
            }
        }
    }
}
"
);

pub const GET_PROJECTS_QUERY: &str = concatcp!(
    "
query GetProjects($first: Int!, $filter: ProjectFilter) {
    projects(first: $first, filter: $filter) {
        nodes {",
    PROJECT_FIELDS,
    "}
    }
}
"
);

pub const GET_PROJECT_QUERY: &str = concatcp!(
    "
query GetProject($id: String!) {
    project(id: $id) {",
    PROJECT_FIELDS,
    "
        issues {
            nodes {
                id
                identifier
                title
            }
        }
    }
}
"
);

pub const CREATE_PROJECT_MUTATION: &str = concatcp!(
    "
mutation CreateProject($input: ProjectCreateInput!) {
    projectCreate(input: $input) {
        success
        project {",
    PROJECT_FIELDS,
    "}
    }
}
"
);

pub const UPDATE_PROJECT_MUTATION: &str = concatcp!(
    "
mutation UpdateProject($id: String!, $input: ProjectUpdateInput!) {
    projectUpdate(id: $id, input: $input) {
        success
        project {",
    PROJECT_FIELDS,
    "}
    }
}
"
);

pub const GET_TEAM_PROJECTS_QUERY: &str = concatcp!(
    "
query GetTeamProjects($teamId: String!, $first: Int!) {
    team(id: $teamId) {
        projects(first: $first) {
            nodes {",
    PROJECT_FIELDS,
    "}
        }
    }
}
"
);

pub const GET_TEAMS_QUERY: &str = concatcp!(
    "
query GetTeams {
    teams {
        nodes {",
    TEAM_FIELDS,
    "}
    }
}
"
);

pub const GET_VIEWER_QUERY: &str = concatcp!(
    "
query GetViewer {
    viewer {",
    USER_FIELDS,
    "}
}
"
);
