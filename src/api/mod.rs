//! One `LinearClient` method per Linear API operation.

mod issues;
mod projects;
mod teams;
mod users;

pub use issues::{CreateIssueInput, GetIssueOptions, UpdateIssueInput};
pub use projects::{CreateProjectInput, GetProjectsOptions, UpdateProjectInput};
