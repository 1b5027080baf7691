//! Repository for user stories, tasks, epics and issues.

use async_trait::async_trait;
use log::{debug, info};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::{require_project, require_user, TasksRepository};
use crate::api::requests::{
    ChangeAssigneesRequest, ChangeSprintRequest, ChangeStatusRequest, ChangeTaskAssigneesRequest,
    ChangeWatchersRequest, CreateCommentRequest, CreateTaskRequest, EditTaskRequest,
};
use crate::api::responses::{CommentResponse, CommonTaskResponse, FilterOption, FiltersDataResponse};
use crate::api::{decode, ApiError, Transport};
use crate::entities::{Comment, CommonTask, CommonTaskType, ProjectInfo, Status, StatusType, User};
use crate::session::Session;

pub struct TaigaTasksRepository {
    transport: Arc<dyn Transport>,
    session: Arc<Session>,
}

impl TaigaTasksRepository {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<Session>) -> Self {
        Self { transport, session }
    }

    // Helper: Transform API task → domain task
    fn task_to_domain(response: CommonTaskResponse, task_type: CommonTaskType) -> CommonTask {
        let status = match (response.status, response.status_extra_info) {
            (Some(id), Some(info)) => Some(Status {
                id,
                name: info.name,
                color: info.color,
                status_type: StatusType::Status,
            }),
            _ => None,
        };

        // Stories list every assignee in `assigned_users`, other kinds only `assigned_to`.
        let assigned_ids = response
            .assigned_users
            .unwrap_or_else(|| response.assigned_to.into_iter().collect());

        CommonTask {
            id: response.id,
            reference: response.reference,
            title: response.subject,
            created_at: response.created_date,
            status,
            assigned_ids,
            watcher_ids: response.watchers,
            is_closed: response.is_closed,
            project: ProjectInfo {
                id: response.project_extra_info.id,
                name: response.project_extra_info.name,
                slug: response.project_extra_info.slug,
            },
            task_type,
            color: response.color,
            version: response.version,
        }
    }

    fn options_to_statuses(options: Vec<FilterOption>, status_type: StatusType) -> impl Iterator<Item = Status> {
        options.into_iter().filter_map(move |option| {
            option.id.map(|id| Status {
                id,
                name: option.name,
                color: option.color.unwrap_or_default(),
                status_type,
            })
        })
    }

    fn comment_to_domain(response: CommentResponse, current_user: Option<i64>) -> Comment {
        Comment {
            id: response.id,
            author: User {
                id: response.user.pk,
                full_name: response.user.name,
                username: response.user.username,
                photo: response.user.photo.clone(),
                big_photo: response.user.photo,
            },
            text: response.comment,
            posted_at: response.created_at,
            can_delete: current_user == Some(response.user.pk),
        }
    }

    async fn fetch_tasks(
        &self,
        task_type: CommonTaskType,
        query: &[(&str, String)],
    ) -> Result<Vec<CommonTask>, ApiError> {
        let value = self.transport.get(task_type.path_segment(), query).await?;
        let tasks: Vec<CommonTaskResponse> = decode(value)?;
        debug!("Fetched {} {}", tasks.len(), task_type.path_segment());
        Ok(tasks.into_iter().map(|t| Self::task_to_domain(t, task_type)).collect())
    }

    /// Open stories, tasks and issues matching one user filter, concatenated
    async fn fetch_dashboard(&self, story_filter: &str, task_filter: &str) -> Result<Vec<CommonTask>, ApiError> {
        let user = require_user(&self.session)?.to_string();
        let open_stories = [(story_filter, user.clone()), ("is_closed", "false".to_string())];
        let open_others = [(task_filter, user), ("status__is_closed", "false".to_string())];

        let (stories, tasks, issues) = tokio::try_join!(
            self.fetch_tasks(CommonTaskType::UserStory, &open_stories),
            self.fetch_tasks(CommonTaskType::Task, &open_others),
            self.fetch_tasks(CommonTaskType::Issue, &open_others),
        )?;

        Ok(stories.into_iter().chain(tasks).chain(issues).collect())
    }

    fn item_path(id: i64, task_type: CommonTaskType) -> String {
        format!("{}/{}", task_type.path_segment(), id)
    }

    fn to_body<B: Serialize>(body: B) -> Result<serde_json::Value, ApiError> {
        serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// PATCH one item and signal the edit
    async fn patch_item<B: Serialize + Send>(&self, id: i64, task_type: CommonTaskType, body: B) -> Result<(), ApiError> {
        let body = Self::to_body(body)?;
        self.transport.patch(&Self::item_path(id, task_type), body).await?;
        self.session.notify_task_edited();
        Ok(())
    }
}

#[async_trait]
impl TasksRepository for TaigaTasksRepository {
    async fn get_backlog_user_stories(&self, page: u32, query: &str) -> Result<Vec<CommonTask>, ApiError> {
        let project = require_project(&self.session)?;
        self.fetch_tasks(
            CommonTaskType::UserStory,
            &[
                ("project", project.to_string()),
                ("milestone", "null".to_string()),
                ("q", query.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    async fn get_epics(&self, page: u32, query: &str) -> Result<Vec<CommonTask>, ApiError> {
        let project = require_project(&self.session)?;
        self.fetch_tasks(
            CommonTaskType::Epic,
            &[
                ("project", project.to_string()),
                ("q", query.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    async fn get_working_on(&self) -> Result<Vec<CommonTask>, ApiError> {
        self.fetch_dashboard("assigned_users", "assigned_to").await
    }

    async fn get_watching(&self) -> Result<Vec<CommonTask>, ApiError> {
        self.fetch_dashboard("watchers", "watchers").await
    }

    async fn get_statuses(&self, task_type: CommonTaskType) -> Result<Vec<Status>, ApiError> {
        let project = require_project(&self.session)?;
        let path = format!("{}/filters_data", task_type.path_segment());
        let value = self.transport.get(&path, &[("project", project.to_string())]).await?;
        let filters: FiltersDataResponse = decode(value)?;

        let mut statuses: Vec<Status> = Self::options_to_statuses(filters.statuses, StatusType::Status).collect();
        if task_type == CommonTaskType::Issue {
            statuses.extend(Self::options_to_statuses(filters.types, StatusType::Type));
            statuses.extend(Self::options_to_statuses(filters.severities, StatusType::Severity));
            statuses.extend(Self::options_to_statuses(filters.priorities, StatusType::Priority));
        }
        Ok(statuses)
    }

    async fn get_comments(&self, id: i64, task_type: CommonTaskType) -> Result<Vec<Comment>, ApiError> {
        let path = format!("history/{}/{}", task_type.history_segment(), id);
        let value = self.transport.get(&path, &[("type", "comment".to_string())]).await?;
        let entries: Vec<CommentResponse> = decode(value)?;

        let current_user = self.session.current_user_id();
        Ok(entries
            .into_iter()
            .filter(|entry| entry.delete_comment_date.is_none())
            .map(|entry| Self::comment_to_domain(entry, current_user))
            .collect())
    }

    async fn create_comment(&self, id: i64, task_type: CommonTaskType, text: &str, version: i64) -> Result<(), ApiError> {
        let request = CreateCommentRequest {
            comment: text.to_string(),
            version,
        };
        self.patch_item(id, task_type, request).await
    }

    async fn change_status(
        &self,
        id: i64,
        task_type: CommonTaskType,
        status_id: i64,
        version: i64,
    ) -> Result<(), ApiError> {
        let request = ChangeStatusRequest {
            status: status_id,
            version,
        };
        self.patch_item(id, task_type, request).await?;
        info!("Changed status of {} {} to {}", task_type.history_segment(), id, status_id);
        Ok(())
    }

    async fn delete_task(&self, id: i64, task_type: CommonTaskType) -> Result<(), ApiError> {
        self.transport.delete(&Self::item_path(id, task_type)).await?;
        info!("Deleted {} {}", task_type.history_segment(), id);
        self.session.notify_task_edited();
        Ok(())
    }

    async fn get_task(&self, id: i64, task_type: CommonTaskType) -> Result<CommonTask, ApiError> {
        let value = self.transport.get(&Self::item_path(id, task_type), &[]).await?;
        Ok(Self::task_to_domain(decode(value)?, task_type))
    }

    async fn create_task(
        &self,
        task_type: CommonTaskType,
        title: &str,
        description: &str,
        parent_story: Option<i64>,
    ) -> Result<CommonTask, ApiError> {
        let project = require_project(&self.session)?;
        let request = CreateTaskRequest {
            project,
            subject: title.to_string(),
            description: description.to_string(),
            user_story: parent_story.filter(|_| task_type == CommonTaskType::Task),
        };
        let value = self
            .transport
            .post(task_type.path_segment(), &[], Some(Self::to_body(request)?))
            .await?;
        let task = Self::task_to_domain(decode(value)?, task_type);

        info!("Created {} {} in project {}", task_type.history_segment(), task.id, project);
        self.session.notify_task_edited();
        Ok(task)
    }

    async fn edit_task(
        &self,
        id: i64,
        task_type: CommonTaskType,
        title: &str,
        description: &str,
        version: i64,
    ) -> Result<(), ApiError> {
        let request = EditTaskRequest {
            subject: title.to_string(),
            description: description.to_string(),
            version,
        };
        self.patch_item(id, task_type, request).await
    }

    async fn change_sprint(
        &self,
        id: i64,
        task_type: CommonTaskType,
        sprint_id: Option<i64>,
        version: i64,
    ) -> Result<(), ApiError> {
        let request = ChangeSprintRequest {
            milestone: sprint_id,
            version,
        };
        self.patch_item(id, task_type, request).await
    }

    async fn change_assignees(
        &self,
        id: i64,
        task_type: CommonTaskType,
        assignees: &[i64],
        version: i64,
    ) -> Result<(), ApiError> {
        let first = assignees.first().copied();
        if task_type == CommonTaskType::UserStory {
            let request = ChangeAssigneesRequest {
                assigned_to: first,
                assigned_users: assignees.to_vec(),
                version,
            };
            self.patch_item(id, task_type, request).await
        } else {
            let request = ChangeTaskAssigneesRequest {
                assigned_to: first,
                version,
            };
            self.patch_item(id, task_type, request).await
        }
    }

    async fn change_watchers(
        &self,
        id: i64,
        task_type: CommonTaskType,
        watchers: &[i64],
        version: i64,
    ) -> Result<(), ApiError> {
        let request = ChangeWatchersRequest {
            watchers: watchers.to_vec(),
            version,
        };
        self.patch_item(id, task_type, request).await
    }

    async fn delete_comment(&self, id: i64, task_type: CommonTaskType, comment_id: Uuid) -> Result<(), ApiError> {
        let path = format!("history/{}/{}/delete_comment", task_type.history_segment(), id);
        self.transport
            .post(&path, &[("id", comment_id.to_string())], None)
            .await?;
        self.session.notify_task_edited();
        Ok(())
    }
}
