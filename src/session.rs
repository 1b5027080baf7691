//! Shared session context.
//!
//! The [`Session`] holds who is logged in, against which server, and which
//! project is selected. It is created once and passed around as
//! `Arc<Session>`. Repositories read the auth fields on every request;
//! view-models subscribe to project changes and task-edit signals and reset
//! their own state when either fires.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;

use crate::constants::{APP_DIR_NAME, DEFAULT_SERVER_URL, LOG_PROJECT_CHANGED, LOG_SESSION_RESET, SESSION_FILE_NAME};
use crate::entities::AuthResult;
use crate::observable::Observable;

/// The project currently selected by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentProject {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct AuthState {
    server: String,
    token: Option<String>,
    refresh_token: Option<String>,
    user_id: Option<i64>,
}

/// On-disk form of a session
#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    #[serde(flatten)]
    auth: AuthState,
    project: Option<CurrentProject>,
}

/// Process-wide auth and project state with change notification.
#[derive(Debug)]
pub struct Session {
    auth: RwLock<AuthState>,
    project: Observable<Option<CurrentProject>>,
    task_edits: Observable<u64>,
}

impl Session {
    /// A logged-out session pointing at `server`
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            auth: RwLock::new(AuthState {
                server: server.into(),
                ..AuthState::default()
            }),
            project: Observable::new(None),
            task_edits: Observable::new(0),
        }
    }

    pub fn server(&self) -> String {
        self.read_auth().server.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read_auth().token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read_auth().refresh_token.clone()
    }

    pub fn current_user_id(&self) -> Option<i64> {
        self.read_auth().user_id
    }

    pub fn is_logged_in(&self) -> bool {
        self.read_auth().token.is_some()
    }

    /// Store the outcome of a successful login
    pub fn set_auth(&self, server: impl Into<String>, auth: &AuthResult) {
        let mut state = self.write_auth();
        state.server = server.into();
        state.token = Some(auth.token.clone());
        state.refresh_token = auth.refresh_token.clone();
        state.user_id = Some(auth.user_id);
    }

    pub fn current_project(&self) -> Option<CurrentProject> {
        self.project.get()
    }

    pub fn current_project_id(&self) -> Option<i64> {
        self.project.with(|p| p.as_ref().map(|p| p.id))
    }

    /// Name of the selected project, empty when none is selected
    pub fn current_project_name(&self) -> String {
        self.project.with(|p| p.as_ref().map(|p| p.name.clone()).unwrap_or_default())
    }

    /// Select a project and notify project subscribers
    pub fn change_current_project(&self, id: i64, name: impl Into<String>) {
        let name = name.into();
        info!("{}: {} ({})", LOG_PROJECT_CHANGED, name, id);
        self.project.set(Some(CurrentProject { id, name }));
    }

    /// Receiver that fires whenever the selected project changes or the
    /// session is reset
    pub fn subscribe_project(&self) -> watch::Receiver<Option<CurrentProject>> {
        self.project.subscribe()
    }

    /// Signal that a task, story or epic was created, edited or deleted
    pub fn notify_task_edited(&self) {
        self.task_edits.update(|count| *count = count.wrapping_add(1));
    }

    pub fn subscribe_task_edits(&self) -> watch::Receiver<u64> {
        self.task_edits.subscribe()
    }

    /// Forget credentials and the selected project (logout)
    pub fn reset(&self) {
        info!("{}", LOG_SESSION_RESET);
        {
            let mut state = self.write_auth();
            state.token = None;
            state.refresh_token = None;
            state.user_id = None;
        }
        self.project.set(None);
    }

    /// Write the session to `path` as JSON
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = SessionFile {
            auth: self.read_auth().clone(),
            project: self.current_project(),
        };
        let content = serde_json::to_string_pretty(&file).context("Failed to serialize session")?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create session directory: {}", parent.display()))?;
        }

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write session file: {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Restore a session previously written with [`Session::save_to`]
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read session file: {}", path.as_ref().display()))?;
        let file: SessionFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session file: {}", path.as_ref().display()))?;

        let session = Self::new(file.auth.server.clone());
        *session.write_auth() = file.auth;
        session.project.set(file.project);
        Ok(session)
    }

    /// Default location of the session file
    pub fn default_session_path() -> Result<PathBuf> {
        dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join(APP_DIR_NAME).join(SESSION_FILE_NAME))
    }

    fn read_auth(&self) -> RwLockReadGuard<'_, AuthState> {
        self.auth.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_auth(&self) -> RwLockWriteGuard<'_, AuthState> {
        self.auth.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}
