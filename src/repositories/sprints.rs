//! Sprint (milestone) repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::info;
use std::sync::Arc;

use super::{require_project, SprintsRepository};
use crate::api::requests::CreateSprintRequest;
use crate::api::responses::SprintResponse;
use crate::api::{decode, ApiError, Transport};
use crate::entities::Sprint;
use crate::session::Session;
use crate::utils::datetime::format_ymd;

pub struct TaigaSprintsRepository {
    transport: Arc<dyn Transport>,
    session: Arc<Session>,
}

impl TaigaSprintsRepository {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<Session>) -> Self {
        Self { transport, session }
    }

    fn sprint_to_domain(response: SprintResponse) -> Sprint {
        Sprint {
            id: response.id,
            name: response.name,
            order: response.order,
            start: response.estimated_start,
            end: response.estimated_finish,
            stories_count: response.user_stories.len(),
            is_closed: response.closed,
        }
    }
}

#[async_trait]
impl SprintsRepository for TaigaSprintsRepository {
    async fn get_sprints(&self, page: u32) -> Result<Vec<Sprint>, ApiError> {
        let project = require_project(&self.session)?;
        let value = self
            .transport
            .get("milestones", &[("project", project.to_string()), ("page", page.to_string())])
            .await?;

        let sprints: Vec<SprintResponse> = decode(value)?;
        Ok(sprints.into_iter().map(Self::sprint_to_domain).collect())
    }

    async fn create_sprint(&self, name: &str, start: NaiveDate, end: NaiveDate) -> Result<(), ApiError> {
        if end < start {
            return Err(ApiError::Validation("Sprint cannot end before it starts".to_string()));
        }

        let project = require_project(&self.session)?;
        let request = CreateSprintRequest {
            name: name.to_string(),
            estimated_start: start,
            estimated_finish: end,
            project,
        };
        let body = serde_json::to_value(request).map_err(|e| ApiError::Decode(e.to_string()))?;

        self.transport.post("milestones", &[], Some(body)).await?;
        info!(
            "Created sprint '{}' ({} to {}) in project {}",
            name,
            format_ymd(start),
            format_ymd(end),
            project
        );
        Ok(())
    }
}
