//! Project selector.

use std::sync::Arc;

use crate::entities::Project;
use crate::observable::Observable;
use crate::paging::PagedList;
use crate::repositories::SearchRepository;
use crate::session::Session;

/// Searchable, paged list of projects the user can switch to.
pub struct ProjectSelectorViewModel {
    search_repository: Arc<dyn SearchRepository>,
    session: Arc<Session>,
    pub projects: PagedList<Project>,
    pub is_project_selected: Observable<bool>,
}

impl ProjectSelectorViewModel {
    pub fn new(search_repository: Arc<dyn SearchRepository>, session: Arc<Session>, page_size: usize) -> Self {
        Self {
            search_repository,
            session,
            projects: PagedList::new(page_size),
            is_project_selected: Observable::new(false),
        }
    }

    /// Open the screen fresh: forget earlier results and load page 1.
    pub async fn start(&mut self) {
        self.projects.reset();
        self.is_project_selected.set(false);
        self.load_data("").await;
    }

    /// Load the next page of projects matching `query`
    pub async fn load_data(&mut self, query: &str) {
        let repository = self.search_repository.clone();
        let owned_query = query.to_string();
        self.projects
            .load_next(query, move |page| async move { repository.search_projects(&owned_query, page).await })
            .await;
    }

    pub fn select_project(&self, project: &Project) {
        self.session.change_current_project(project.id, project.name.clone());
        self.is_project_selected.set(true);
    }
}
