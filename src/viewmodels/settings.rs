//! Settings screen: profile and logout.

use std::sync::Arc;

use crate::entities::User;
use crate::repositories::UsersRepository;
use crate::result::{LoadOptions, ResultFlow};
use crate::session::Session;

/// The logged-in user's profile and the logout action.
pub struct SettingsViewModel {
    users_repository: Arc<dyn UsersRepository>,
    session: Arc<Session>,
    pub user: ResultFlow<User>,
}

impl SettingsViewModel {
    pub fn new(users_repository: Arc<dyn UsersRepository>, session: Arc<Session>) -> Self {
        Self {
            users_repository,
            session,
            user: ResultFlow::new(),
        }
    }

    pub fn server_url(&self) -> String {
        self.session.server()
    }

    /// Load the current user, hiding any stale profile while loading
    pub async fn start(&mut self) {
        let options = LoadOptions {
            preserve_value: false,
            ..LoadOptions::default()
        };
        let repository = self.users_repository.clone();
        self.user.load_or_error_with(options, async move { repository.get_me().await }).await;
    }

    /// Log out. Other view-models reset on their next start because the
    /// session's project goes back to none.
    pub fn logout(&mut self) {
        self.session.reset();
        self.user.reset();
    }
}
