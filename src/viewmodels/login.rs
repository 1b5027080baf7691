//! Login screen.

use std::sync::Arc;

use crate::constants::ERROR_LOGIN_FAILED;
use crate::entities::AuthResult;
use crate::repositories::AuthRepository;
use crate::result::{LoadOptions, ResultFlow};

/// Username and password login against a chosen server.
pub struct LoginViewModel {
    auth_repository: Arc<dyn AuthRepository>,
    pub login_result: ResultFlow<AuthResult>,
}

impl LoginViewModel {
    pub fn new(auth_repository: Arc<dyn AuthRepository>) -> Self {
        Self {
            auth_repository,
            login_result: ResultFlow::new(),
        }
    }

    /// Log in; Success means the session now holds a token.
    pub async fn login(&mut self, server: &str, username: &str, password: &str) {
        if server.trim().is_empty() || username.trim().is_empty() || password.is_empty() {
            self.login_result.set_loading_without_value();
            self.login_result.set_error(ERROR_LOGIN_FAILED);
            return;
        }

        let options = LoadOptions {
            preserve_value: false,
            error_message: Some(ERROR_LOGIN_FAILED),
        };
        let repository = self.auth_repository.clone();
        self.login_result
            .load_or_error_with(options, async move { repository.auth(server, username.trim(), password).await })
            .await;
    }
}
