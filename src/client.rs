//! Assembly of the client from configuration.
//!
//! [`TaigaClient`] builds the pieces a front-end needs: the logger, the
//! session (restored from disk when persistence is on), the HTTP transport
//! and one instance of each repository. Front-ends then construct the
//! view-models they show from these parts.

use anyhow::Result;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::http::HttpTransport;
use crate::api::Transport;
use crate::config::Config;
use crate::logger::Logger;
use crate::repositories::{
    AuthRepository, SearchRepository, SprintsRepository, TaigaAuthRepository, TaigaSearchRepository,
    TaigaSprintsRepository, TaigaTasksRepository, TaigaUsersRepository, TasksRepository, UsersRepository,
};
use crate::session::Session;
use crate::viewmodels::{
    DashboardViewModel, EpicsViewModel, LoginViewModel, ProjectSelectorViewModel, ScrumViewModel,
    SettingsViewModel, TeamViewModel,
};

/// One instance of every repository, sharing a transport and session
#[derive(Clone)]
pub struct Repositories {
    pub auth: Arc<dyn AuthRepository>,
    pub search: Arc<dyn SearchRepository>,
    pub tasks: Arc<dyn TasksRepository>,
    pub sprints: Arc<dyn SprintsRepository>,
    pub users: Arc<dyn UsersRepository>,
}

impl Repositories {
    pub fn taiga(transport: Arc<dyn Transport>, session: Arc<Session>) -> Self {
        Self {
            auth: Arc::new(TaigaAuthRepository::new(transport.clone(), session.clone())),
            search: Arc::new(TaigaSearchRepository::new(transport.clone())),
            tasks: Arc::new(TaigaTasksRepository::new(transport.clone(), session.clone())),
            sprints: Arc::new(TaigaSprintsRepository::new(transport.clone(), session.clone())),
            users: Arc::new(TaigaUsersRepository::new(transport, session)),
        }
    }
}

pub struct TaigaClient {
    config: Config,
    logger: Logger,
    session: Arc<Session>,
    repositories: Repositories,
    session_path: Option<PathBuf>,
}

impl TaigaClient {
    /// Build a client talking to the configured server
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        let logger = Logger::from_config(config.logging.enabled)?;

        let session_path = if config.session.persist {
            Some(Session::default_session_path()?)
        } else {
            None
        };
        let session = Arc::new(Self::restore_session(&config, session_path.as_ref()));

        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(session.clone(), &config.server)?);
        Ok(Self::with_parts(config, logger, session, transport, session_path))
    }

    /// Build a client over an existing transport and session
    pub fn with_parts(
        config: Config,
        logger: Logger,
        session: Arc<Session>,
        transport: Arc<dyn Transport>,
        session_path: Option<PathBuf>,
    ) -> Self {
        let repositories = Repositories::taiga(transport, session.clone());
        Self {
            config,
            logger,
            session,
            repositories,
            session_path,
        }
    }

    fn restore_session(config: &Config, path: Option<&PathBuf>) -> Session {
        let Some(path) = path.filter(|p| p.exists()) else {
            return Session::new(config.server.url.clone());
        };

        match Session::load_from(path) {
            Ok(session) => {
                info!("Restored session from {}", path.display());
                session
            }
            Err(e) => {
                warn!("Ignoring unreadable session file: {:#}", e);
                Session::new(config.server.url.clone())
            }
        }
    }

    /// Persist the session if persistence is enabled
    pub fn save_session(&self) -> Result<()> {
        if let Some(path) = &self.session_path {
            self.session.save_to(path)?;
        }
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn repositories(&self) -> &Repositories {
        &self.repositories
    }

    fn page_size(&self) -> usize {
        self.config.paging.page_size
    }

    pub fn login_view_model(&self) -> LoginViewModel {
        LoginViewModel::new(self.repositories.auth.clone())
    }

    pub fn project_selector_view_model(&self) -> ProjectSelectorViewModel {
        ProjectSelectorViewModel::new(self.repositories.search.clone(), self.session.clone(), self.page_size())
    }

    pub fn dashboard_view_model(&self) -> DashboardViewModel {
        DashboardViewModel::new(self.repositories.tasks.clone(), self.session.clone())
    }

    pub fn scrum_view_model(&self) -> ScrumViewModel {
        ScrumViewModel::new(
            self.repositories.tasks.clone(),
            self.repositories.sprints.clone(),
            self.session.clone(),
            self.page_size(),
        )
    }

    pub fn epics_view_model(&self) -> EpicsViewModel {
        EpicsViewModel::new(self.repositories.tasks.clone(), self.session.clone(), self.page_size())
    }

    pub fn team_view_model(&self) -> TeamViewModel {
        TeamViewModel::new(self.repositories.users.clone(), self.session.clone())
    }

    pub fn settings_view_model(&self) -> SettingsViewModel {
        SettingsViewModel::new(self.repositories.users.clone(), self.session.clone())
    }
}
