//! Project search repository.

use async_trait::async_trait;
use std::sync::Arc;

use super::SearchRepository;
use crate::api::responses::ProjectInSearchResponse;
use crate::api::{decode, ApiError, Transport};
use crate::entities::Project;

pub struct TaigaSearchRepository {
    transport: Arc<dyn Transport>,
}

impl TaigaSearchRepository {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    fn project_to_domain(response: ProjectInSearchResponse) -> Project {
        Project {
            id: response.id,
            name: response.name,
            slug: response.slug,
            is_member: response.i_am_member,
            is_admin: response.i_am_admin,
            is_owner: response.i_am_owner,
        }
    }
}

#[async_trait]
impl SearchRepository for TaigaSearchRepository {
    async fn search_projects(&self, query: &str, page: u32) -> Result<Vec<Project>, ApiError> {
        let value = self
            .transport
            .get(
                "projects",
                &[
                    ("order_by", "user_order".to_string()),
                    ("discover_mode", "true".to_string()),
                    ("q", query.to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?;

        let projects: Vec<ProjectInSearchResponse> = decode(value)?;
        Ok(projects.into_iter().map(Self::project_to_domain).collect())
    }
}
