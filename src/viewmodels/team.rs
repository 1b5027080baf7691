//! Team of the selected project.

use std::sync::Arc;

use crate::entities::TeamMember;
use crate::observable::ChangeWatcher;
use crate::repositories::UsersRepository;
use crate::result::ResultFlow;
use crate::session::{CurrentProject, Session};

/// Project members ordered by contribution.
pub struct TeamViewModel {
    users_repository: Arc<dyn UsersRepository>,
    session: Arc<Session>,
    pub team: ResultFlow<Vec<TeamMember>>,
    project: ChangeWatcher<Option<CurrentProject>>,
}

impl TeamViewModel {
    pub fn new(users_repository: Arc<dyn UsersRepository>, session: Arc<Session>) -> Self {
        let project = ChangeWatcher::new(session.subscribe_project());
        Self {
            users_repository,
            session,
            team: ResultFlow::new(),
            project,
        }
    }

    pub fn project_name(&self) -> String {
        self.session.current_project_name()
    }

    /// Load the team, starting over if the project changed
    pub async fn start(&mut self) {
        if self.project.take_change() {
            self.reset();
        }
        if self.team.current().is_nothing() {
            let repository = self.users_repository.clone();
            self.team.load_or_error(async move { repository.get_team().await }).await;
        }
    }

    pub fn reset(&mut self) {
        self.team.reset();
    }
}
