//! Repository layer over the Taiga REST API.
//!
//! Each repository is a trait the view-models depend on plus a `Taiga*`
//! implementation that builds requests for a [`Transport`] and maps the
//! wire responses into [`crate::entities`]. View-models only ever see the
//! traits, so tests swap in fakes.
//!
//! [`Transport`]: crate::api::Transport

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::api::ApiError;
use crate::entities::{AuthResult, Comment, CommonTask, CommonTaskType, Project, Sprint, Status, TeamMember, User};
use crate::session::Session;

pub mod auth;
pub mod search;
pub mod sprints;
pub mod tasks;
pub mod users;

pub use auth::TaigaAuthRepository;
pub use search::TaigaSearchRepository;
pub use sprints::TaigaSprintsRepository;
pub use tasks::TaigaTasksRepository;
pub use users::TaigaUsersRepository;

#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Log in with username and password; stores the result in the session
    async fn auth(&self, server: &str, username: &str, password: &str) -> Result<AuthResult, ApiError>;
}

#[async_trait]
pub trait SearchRepository: Send + Sync {
    async fn search_projects(&self, query: &str, page: u32) -> Result<Vec<Project>, ApiError>;
}

#[async_trait]
pub trait TasksRepository: Send + Sync {
    /// User stories of the current project that are not in any sprint
    async fn get_backlog_user_stories(&self, page: u32, query: &str) -> Result<Vec<CommonTask>, ApiError>;

    async fn get_epics(&self, page: u32, query: &str) -> Result<Vec<CommonTask>, ApiError>;

    /// Open items assigned to the current user, across projects
    async fn get_working_on(&self) -> Result<Vec<CommonTask>, ApiError>;

    /// Open items the current user watches, across projects
    async fn get_watching(&self) -> Result<Vec<CommonTask>, ApiError>;

    async fn get_statuses(&self, task_type: CommonTaskType) -> Result<Vec<Status>, ApiError>;

    async fn get_comments(&self, id: i64, task_type: CommonTaskType) -> Result<Vec<Comment>, ApiError>;

    async fn create_comment(&self, id: i64, task_type: CommonTaskType, text: &str, version: i64) -> Result<(), ApiError>;

    async fn change_status(
        &self,
        id: i64,
        task_type: CommonTaskType,
        status_id: i64,
        version: i64,
    ) -> Result<(), ApiError>;

    async fn delete_task(&self, id: i64, task_type: CommonTaskType) -> Result<(), ApiError>;

    async fn get_task(&self, id: i64, task_type: CommonTaskType) -> Result<CommonTask, ApiError>;

    /// Create an item in the current project. `parent_story` only applies to tasks.
    async fn create_task(
        &self,
        task_type: CommonTaskType,
        title: &str,
        description: &str,
        parent_story: Option<i64>,
    ) -> Result<CommonTask, ApiError>;

    async fn edit_task(
        &self,
        id: i64,
        task_type: CommonTaskType,
        title: &str,
        description: &str,
        version: i64,
    ) -> Result<(), ApiError>;

    /// Move into a sprint, or back to the backlog with `None`
    async fn change_sprint(
        &self,
        id: i64,
        task_type: CommonTaskType,
        sprint_id: Option<i64>,
        version: i64,
    ) -> Result<(), ApiError>;

    /// Replace the assignees. Only user stories keep more than the first one.
    async fn change_assignees(
        &self,
        id: i64,
        task_type: CommonTaskType,
        assignees: &[i64],
        version: i64,
    ) -> Result<(), ApiError>;

    async fn change_watchers(
        &self,
        id: i64,
        task_type: CommonTaskType,
        watchers: &[i64],
        version: i64,
    ) -> Result<(), ApiError>;

    async fn delete_comment(&self, id: i64, task_type: CommonTaskType, comment_id: Uuid) -> Result<(), ApiError>;
}

#[async_trait]
pub trait SprintsRepository: Send + Sync {
    async fn get_sprints(&self, page: u32) -> Result<Vec<Sprint>, ApiError>;

    async fn create_sprint(&self, name: &str, start: NaiveDate, end: NaiveDate) -> Result<(), ApiError>;
}

#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn get_me(&self) -> Result<User, ApiError>;

    async fn get_user(&self, id: i64) -> Result<User, ApiError>;

    /// Members of the current project, strongest contributors first
    async fn get_team(&self) -> Result<Vec<TeamMember>, ApiError>;
}

/// Id of the selected project, or the error every project-scoped call fails with
pub(crate) fn require_project(session: &Session) -> Result<i64, ApiError> {
    session.current_project_id().ok_or(ApiError::NoProjectSelected)
}

/// Id of the logged-in user
pub(crate) fn require_user(session: &Session) -> Result<i64, ApiError> {
    session.current_user_id().ok_or(ApiError::Unauthorized)
}
