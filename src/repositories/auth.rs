//! Authentication repository.

use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use super::AuthRepository;
use crate::api::requests::AuthRequest;
use crate::api::responses::AuthResponse;
use crate::api::{decode, ApiError, Transport};
use crate::entities::AuthResult;
use crate::session::Session;

pub struct TaigaAuthRepository {
    transport: Arc<dyn Transport>,
    session: Arc<Session>,
}

impl TaigaAuthRepository {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<Session>) -> Self {
        Self { transport, session }
    }

    fn auth_to_domain(response: AuthResponse) -> AuthResult {
        AuthResult {
            user_id: response.id,
            token: response.auth_token,
            refresh_token: response.refresh,
        }
    }
}

#[async_trait]
impl AuthRepository for TaigaAuthRepository {
    async fn auth(&self, server: &str, username: &str, password: &str) -> Result<AuthResult, ApiError> {
        let server = server.trim().trim_end_matches('/');
        let body = serde_json::to_value(AuthRequest::normal(username, password))
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        // The session keeps its server and token until the new login succeeds.
        let response = match self.transport.post_anonymous(server, "auth", body).await {
            Ok(value) => decode::<AuthResponse>(value)?,
            Err(e) => {
                warn!("Login as '{}' on {} failed: {}", username, server, e);
                return Err(e);
            }
        };

        let auth = Self::auth_to_domain(response);
        self.session.set_auth(server, &auth);
        info!("Logged in as user {} on {}", auth.user_id, server);
        Ok(auth)
    }
}
