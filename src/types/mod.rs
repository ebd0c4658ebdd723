mod issue;
mod project;
mod team;
mod user;

pub use issue::Issue;
pub use project::{Project, ProjectWithIssues};
pub use team::Team;
pub use user::User;
