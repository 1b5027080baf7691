//! Epics of the selected project.

use std::sync::Arc;

use crate::entities::{CommonTask, CommonTaskType, Status};
use crate::observable::ChangeWatcher;
use crate::paging::PagedList;
use crate::repositories::TasksRepository;
use crate::result::ResultFlow;
use crate::session::{CurrentProject, Session};

/// Paged, searchable epics plus the statuses they can move to.
pub struct EpicsViewModel {
    tasks_repository: Arc<dyn TasksRepository>,
    session: Arc<Session>,
    pub epics: PagedList<CommonTask>,
    pub statuses: ResultFlow<Vec<Status>>,
    project: ChangeWatcher<Option<CurrentProject>>,
    task_edits: ChangeWatcher<u64>,
}

impl EpicsViewModel {
    pub fn new(tasks_repository: Arc<dyn TasksRepository>, session: Arc<Session>, page_size: usize) -> Self {
        let project = ChangeWatcher::new(session.subscribe_project());
        let task_edits = ChangeWatcher::new(session.subscribe_task_edits());
        Self {
            tasks_repository,
            session,
            epics: PagedList::new(page_size),
            statuses: ResultFlow::new(),
            project,
            task_edits,
        }
    }

    pub fn project_name(&self) -> String {
        self.session.current_project_name()
    }

    /// Load statuses and the first page of epics unless already loaded
    pub async fn on_open(&mut self) {
        self.sync_project();

        if self.statuses.current().is_nothing() {
            let repository = self.tasks_repository.clone();
            self.statuses
                .load_or_error(async move { repository.get_statuses(CommonTaskType::Epic).await })
                .await;
        }
        if self.epics.result().current().is_nothing() {
            self.load_epics("").await;
        }
    }

    /// Load the next page of epics matching `query`
    pub async fn load_epics(&mut self, query: &str) {
        self.sync_project();
        let repository = self.tasks_repository.clone();
        let owned_query = query.to_string();
        self.epics
            .load_next(query, move |page| async move { repository.get_epics(page, &owned_query).await })
            .await;
    }

    /// Reload from page 1 if anything was edited since the last check
    pub async fn refresh_if_edited(&mut self) -> bool {
        if self.sync_project() {
            // Starting over anyway, the edit is covered by the reload.
            self.task_edits.take_change();
            self.load_epics("").await;
            return true;
        }
        if !self.task_edits.take_change() {
            return false;
        }
        let repository = self.tasks_repository.clone();
        let query = self.epics.paginator().query().to_string();
        self.epics
            .refresh(move |page| async move { repository.get_epics(page, &query).await })
            .await;
        true
    }

    pub fn reset(&mut self) {
        self.epics.reset();
        self.statuses.reset();
    }

    // Drop everything loaded for a previous project. Returns true if it did.
    fn sync_project(&mut self) -> bool {
        let changed = self.project.take_change();
        if changed {
            self.reset();
        }
        changed
    }
}
