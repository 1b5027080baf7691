//! Scrum screen: backlog and sprints.

use chrono::NaiveDate;
use log::warn;
use std::sync::Arc;

use crate::constants::ERROR_PERMISSION;
use crate::entities::{CommonTask, Sprint};
use crate::observable::ChangeWatcher;
use crate::paging::PagedList;
use crate::repositories::{SprintsRepository, TasksRepository};
use crate::session::{CurrentProject, Session};

/// Backlog stories and sprints of the selected project.
pub struct ScrumViewModel {
    tasks_repository: Arc<dyn TasksRepository>,
    sprints_repository: Arc<dyn SprintsRepository>,
    session: Arc<Session>,
    pub stories: PagedList<CommonTask>,
    pub sprints: PagedList<Sprint>,
    project: ChangeWatcher<Option<CurrentProject>>,
}

impl ScrumViewModel {
    pub fn new(
        tasks_repository: Arc<dyn TasksRepository>,
        sprints_repository: Arc<dyn SprintsRepository>,
        session: Arc<Session>,
        page_size: usize,
    ) -> Self {
        let project = ChangeWatcher::new(session.subscribe_project());
        Self {
            tasks_repository,
            sprints_repository,
            session,
            stories: PagedList::new(page_size),
            sprints: PagedList::new(page_size),
            project,
        }
    }

    pub fn project_name(&self) -> String {
        self.session.current_project_name()
    }

    /// Reset if the project changed, then load the first pages if nothing is loaded
    pub async fn start(&mut self) {
        self.sync_project();

        if self.stories.result().current().is_nothing() {
            self.load_stories("").await;
            self.load_sprints().await;
        }
    }

    /// Load the next page of backlog stories matching `query`
    pub async fn load_stories(&mut self, query: &str) {
        self.sync_project();
        let repository = self.tasks_repository.clone();
        let owned_query = query.to_string();
        self.stories
            .load_next(query, move |page| async move {
                repository.get_backlog_user_stories(page, &owned_query).await
            })
            .await;
    }

    pub async fn load_sprints(&mut self) {
        self.sync_project();
        let repository = self.sprints_repository.clone();
        self.sprints
            .load_next("", move |page| async move { repository.get_sprints(page).await })
            .await;
    }

    /// Create a sprint and reload the sprint list from page 1.
    ///
    /// Any failure is reported as a permission problem, the common cause.
    pub async fn create_sprint(&mut self, name: &str, start: NaiveDate, end: NaiveDate) {
        self.sync_project();
        self.sprints.result().set_loading();
        match self.sprints_repository.create_sprint(name, start, end).await {
            Ok(()) => {
                self.sprints.reset();
                self.load_sprints().await;
            }
            Err(e) => {
                warn!("Failed to create sprint '{}': {}", name, e);
                self.sprints.result().set_error(ERROR_PERMISSION);
            }
        }
    }

    pub fn reset(&mut self) {
        self.stories.reset();
        self.sprints.reset();
    }

    // Lists loaded for a previous project must not be appended to.
    fn sync_project(&mut self) {
        if self.project.take_change() {
            self.reset();
        }
    }
}
