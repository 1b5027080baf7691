//! Dashboard: work across all projects.

use std::sync::Arc;

use crate::entities::CommonTask;
use crate::observable::ChangeWatcher;
use crate::repositories::TasksRepository;
use crate::result::ResultFlow;
use crate::session::{CurrentProject, Session};

/// Cross-project overview of what the user works on and watches.
pub struct DashboardViewModel {
    tasks_repository: Arc<dyn TasksRepository>,
    session: Arc<Session>,
    pub working_on: ResultFlow<Vec<CommonTask>>,
    pub watching: ResultFlow<Vec<CommonTask>>,
    project: ChangeWatcher<Option<CurrentProject>>,
    task_edits: ChangeWatcher<u64>,
    should_reload: bool,
}

impl DashboardViewModel {
    pub fn new(tasks_repository: Arc<dyn TasksRepository>, session: Arc<Session>) -> Self {
        let project = ChangeWatcher::new(session.subscribe_project());
        let task_edits = ChangeWatcher::new(session.subscribe_task_edits());
        Self {
            tasks_repository,
            session,
            working_on: ResultFlow::new(),
            watching: ResultFlow::new(),
            project,
            task_edits,
            should_reload: true,
        }
    }

    /// Load both lists on first open, after any task edit, and after the
    /// selected project changed, which includes logout. A failed load is
    /// retried on the next open.
    pub async fn on_open(&mut self) {
        if self.project.take_change() {
            // The lists may belong to a user who logged out.
            self.working_on.reset();
            self.watching.reset();
            self.should_reload = true;
        }
        if self.task_edits.take_change() {
            self.should_reload = true;
        }
        if !self.should_reload {
            return;
        }

        let repository = &self.tasks_repository;
        let (working_on, watching) = tokio::join!(
            self.working_on.load_or_error(repository.get_working_on()),
            self.watching.load_or_error(repository.get_watching()),
        );
        self.should_reload = working_on.is_none() || watching.is_none();
    }

    /// Switch the session to the project a dashboard item belongs to
    pub fn change_current_project(&self, task: &CommonTask) {
        self.session.change_current_project(task.project.id, task.project.name.clone());
    }

    pub fn is_loading(&self) -> bool {
        self.working_on.is_loading() || self.watching.is_loading()
    }
}
