//! Request bodies sent to the Taiga API.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
    #[serde(rename = "type")]
    pub auth_type: &'static str,
}

impl AuthRequest {
    pub fn normal(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            auth_type: "normal",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangeStatusRequest {
    pub status: i64,
    pub version: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCommentRequest {
    pub comment: String,
    pub version: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateSprintRequest {
    pub name: String,
    pub estimated_start: NaiveDate,
    pub estimated_finish: NaiveDate,
    pub project: i64,
}

/// Moves a story or task into a sprint, or back to the backlog with `None`
#[derive(Debug, Clone, Serialize)]
pub struct ChangeSprintRequest {
    pub milestone: Option<i64>,
    pub version: i64,
}

/// User stories take any number of assignees
#[derive(Debug, Clone, Serialize)]
pub struct ChangeAssigneesRequest {
    pub assigned_to: Option<i64>,
    pub assigned_users: Vec<i64>,
    pub version: i64,
}

/// Tasks, epics and issues take a single assignee
#[derive(Debug, Clone, Serialize)]
pub struct ChangeTaskAssigneesRequest {
    pub assigned_to: Option<i64>,
    pub version: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangeWatchersRequest {
    pub watchers: Vec<i64>,
    pub version: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EditTaskRequest {
    pub subject: String,
    pub description: String,
    pub version: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateTaskRequest {
    pub project: i64,
    pub subject: String,
    pub description: String,
    /// Parent story of a new task
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_story: Option<i64>,
}
