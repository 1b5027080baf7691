//! Wire formats of Taiga API responses.
//!
//! Only the fields the crate reads are declared; serde ignores the rest.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub id: i64,
    pub auth_token: String,
    pub refresh: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInSearchResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub i_am_member: bool,
    #[serde(default)]
    pub i_am_admin: bool,
    #[serde(default)]
    pub i_am_owner: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectResponse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub members: Vec<MemberResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberResponse {
    pub id: i64,
    pub full_name_display: String,
    pub username: String,
    pub photo: Option<String>,
    pub role_name: String,
}

/// Per-user contribution counters, keyed by user id
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MemberStatsResponse {
    pub closed_bugs: HashMap<String, i64>,
    pub closed_tasks: HashMap<String, i64>,
    pub created_bugs: HashMap<String, i64>,
    pub iocaine_tasks: HashMap<String, i64>,
    pub wiki_changes: HashMap<String, i64>,
}

impl MemberStatsResponse {
    /// Sum of every counter for one user
    pub fn total_power(&self, user_id: i64) -> i64 {
        let key = user_id.to_string();
        [
            &self.closed_bugs,
            &self.closed_tasks,
            &self.created_bugs,
            &self.iocaine_tasks,
            &self.wiki_changes,
        ]
        .iter()
        .filter_map(|stats| stats.get(&key))
        .sum()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub full_name: Option<String>,
    pub full_name_display: Option<String>,
    pub username: String,
    pub photo: Option<String>,
    pub big_photo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusExtraInfo {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectExtraInfo {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// Shared shape of user stories, tasks, epics and issues
#[derive(Debug, Clone, Deserialize)]
pub struct CommonTaskResponse {
    pub id: i64,
    #[serde(rename = "ref")]
    pub reference: i64,
    pub subject: String,
    pub created_date: DateTime<Utc>,
    pub status: Option<i64>,
    pub status_extra_info: Option<StatusExtraInfo>,
    pub assigned_to: Option<i64>,
    pub assigned_users: Option<Vec<i64>>,
    #[serde(default)]
    pub watchers: Vec<i64>,
    #[serde(default)]
    pub is_closed: bool,
    pub project_extra_info: ProjectExtraInfo,
    pub color: Option<String>,
    pub version: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SprintResponse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub order: i64,
    pub estimated_start: NaiveDate,
    pub estimated_finish: NaiveDate,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub user_stories: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilterOption {
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// `*/filters_data`; issues add types, severities and priorities
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FiltersDataResponse {
    pub statuses: Vec<FilterOption>,
    pub types: Vec<FilterOption>,
    pub severities: Vec<FilterOption>,
    pub priorities: Vec<FilterOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryUser {
    pub pk: i64,
    pub username: String,
    pub name: Option<String>,
    pub photo: Option<String>,
}

/// Entry of `history/{type}/{id}?type=comment`
#[derive(Debug, Clone, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub user: HistoryUser,
    #[serde(default)]
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub delete_comment_date: Option<DateTime<Utc>>,
}
