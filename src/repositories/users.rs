//! Users and project team repository.

use async_trait::async_trait;
use std::sync::Arc;

use super::{require_project, UsersRepository};
use crate::api::responses::{MemberResponse, MemberStatsResponse, ProjectResponse, UserResponse};
use crate::api::{decode, ApiError, Transport};
use crate::entities::{TeamMember, User};
use crate::session::Session;

pub struct TaigaUsersRepository {
    transport: Arc<dyn Transport>,
    session: Arc<Session>,
}

impl TaigaUsersRepository {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<Session>) -> Self {
        Self { transport, session }
    }

    fn user_to_domain(response: UserResponse) -> User {
        User {
            id: response.id,
            full_name: response.full_name_display.or(response.full_name),
            username: response.username,
            photo: response.photo,
            big_photo: response.big_photo,
        }
    }

    fn member_to_domain(response: MemberResponse, stats: &MemberStatsResponse) -> TeamMember {
        TeamMember {
            total_power: stats.total_power(response.id),
            id: response.id,
            name: response.full_name_display,
            username: response.username,
            avatar_url: response.photo,
            role: response.role_name,
        }
    }

    async fn fetch_user(&self, path: &str) -> Result<User, ApiError> {
        let value = self.transport.get(path, &[]).await?;
        Ok(Self::user_to_domain(decode(value)?))
    }
}

#[async_trait]
impl UsersRepository for TaigaUsersRepository {
    async fn get_me(&self) -> Result<User, ApiError> {
        self.fetch_user("users/me").await
    }

    async fn get_user(&self, id: i64) -> Result<User, ApiError> {
        self.fetch_user(&format!("users/{}", id)).await
    }

    async fn get_team(&self) -> Result<Vec<TeamMember>, ApiError> {
        let project = require_project(&self.session)?;
        let project_path = format!("projects/{}", project);
        let stats_path = format!("projects/{}/member_stats", project);

        let (project_value, stats_value) = tokio::try_join!(
            self.transport.get(&project_path, &[]),
            self.transport.get(&stats_path, &[]),
        )?;
        let project: ProjectResponse = decode(project_value)?;
        let stats: MemberStatsResponse = decode(stats_value)?;

        let mut team: Vec<TeamMember> = project
            .members
            .into_iter()
            .map(|member| Self::member_to_domain(member, &stats))
            .collect();
        team.sort_by(|a, b| b.total_power.cmp(&a.total_power));
        Ok(team)
    }
}
