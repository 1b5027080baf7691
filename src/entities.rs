//! Domain entities handed to view-models.
//!
//! These are the shapes the rest of the crate works with. Wire formats live
//! in [`crate::api::responses`] and are mapped into these by the
//! repositories.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::datetime::format_date_range;

/// Outcome of a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResult {
    pub user_id: i64,
    pub token: String,
    pub refresh_token: Option<String>,
}

/// Role of the current user within a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectRole {
    Owner,
    Admin,
    Member,
}

/// Project as returned by project search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub is_member: bool,
    pub is_admin: bool,
    pub is_owner: bool,
}

impl Project {
    /// Strongest role the user holds, owner first
    pub fn role(&self) -> Option<ProjectRole> {
        if self.is_owner {
            Some(ProjectRole::Owner)
        } else if self.is_admin {
            Some(ProjectRole::Admin)
        } else if self.is_member {
            Some(ProjectRole::Member)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub full_name: Option<String>,
    pub username: String,
    pub photo: Option<String>,
    pub big_photo: Option<String>,
}

impl User {
    /// Full name if set, username otherwise
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub role: String,
    pub total_power: i64,
}

/// What kind of attribute a [`Status`] describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusType {
    Status,
    Type,
    Severity,
    Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub status_type: StatusType,
}

/// The Taiga item kinds that share the "common task" shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommonTaskType {
    UserStory,
    Task,
    Epic,
    Issue,
}

impl CommonTaskType {
    /// REST collection segment, e.g. `userstories`
    pub fn path_segment(self) -> &'static str {
        match self {
            CommonTaskType::UserStory => "userstories",
            CommonTaskType::Task => "tasks",
            CommonTaskType::Epic => "epics",
            CommonTaskType::Issue => "issues",
        }
    }

    /// Segment used by the history (comments) endpoints
    pub fn history_segment(self) -> &'static str {
        match self {
            CommonTaskType::UserStory => "userstory",
            CommonTaskType::Task => "task",
            CommonTaskType::Epic => "epic",
            CommonTaskType::Issue => "issue",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// A user story, task, epic or issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonTask {
    pub id: i64,
    pub reference: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub status: Option<Status>,
    pub assigned_ids: Vec<i64>,
    pub watcher_ids: Vec<i64>,
    pub is_closed: bool,
    pub project: ProjectInfo,
    pub task_type: CommonTaskType,
    /// Epics carry a color
    pub color: Option<String>,
    /// Optimistic locking token required by PATCH requests
    pub version: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    pub id: i64,
    pub name: String,
    pub order: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub stories_count: usize,
    pub is_closed: bool,
}

impl Sprint {
    /// Whether `day` falls within the sprint's bounds
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Bounds for display, e.g. "Jan 15 - Jan 29"
    pub fn date_range(&self) -> String {
        format_date_range(self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author: User,
    pub text: String,
    pub posted_at: DateTime<Utc>,
    /// The current user wrote it and may delete it
    pub can_delete: bool,
}
