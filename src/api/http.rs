//! reqwest-backed [`Transport`].

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::{ApiError, Query, Transport};
use crate::config::ServerConfig;
use crate::session::Session;

/// Talks to the server the session currently points at, authenticating
/// with the session's token when there is one.
pub struct HttpTransport {
    client: Client,
    session: Arc<Session>,
    api_prefix: String,
}

impl HttpTransport {
    pub fn new(session: Arc<Session>, config: &ServerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            session,
            api_prefix: config.api_prefix.clone(),
        })
    }

    /// Absolute URL for an API path on the session's server
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.endpoint_on(&self.session.server(), path)
    }

    fn endpoint_on(&self, server: &str, path: &str) -> Result<Url, ApiError> {
        let prefix = self.api_prefix.trim_matches('/');
        let raw = format!("{}/{}/{}", server.trim_end_matches('/'), prefix, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|e| ApiError::Network(format!("invalid URL '{}': {}", raw, e)))
    }

    fn request(&self, method: Method, path: &str, query: &Query<'_>) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(path)?;
        debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &Query<'_>) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, path, query)?;
        self.send(request).await
    }

    async fn post(&self, path: &str, query: &Query<'_>, body: Option<Value>) -> Result<Value, ApiError> {
        let mut request = self.request(Method::POST, path, query)?;
        if let Some(body) = body {
            request = request.json(&body);
        }
        self.send(request).await
    }

    async fn patch(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        let request = self.request(Method::PATCH, path, &[])?.json(&body);
        self.send(request).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, path, &[])?;
        self.send(request).await.map(|_| ())
    }

    async fn post_anonymous(&self, server: &str, path: &str, body: Value) -> Result<Value, ApiError> {
        let url = self.endpoint_on(server, path)?;
        debug!("POST {} (anonymous)", url);
        self.send(self.client.post(url).json(&body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::AuthResult;

    fn transport(server: &str, api_prefix: &str) -> HttpTransport {
        let config = ServerConfig {
            url: server.to_string(),
            api_prefix: api_prefix.to_string(),
            timeout_seconds: 5,
        };
        HttpTransport::new(Arc::new(Session::new(server)), &config).unwrap()
    }

    #[test]
    fn test_endpoint_joins_prefix_and_path() {
        let transport = transport("https://taiga.example.com/", "/api/v1/");
        let url = transport.endpoint("userstories/42").unwrap();
        assert_eq!(url.as_str(), "https://taiga.example.com/api/v1/userstories/42");
    }

    #[test]
    fn test_endpoint_follows_session_server() {
        let transport = transport("https://taiga.example.com", "/api/v1");
        let auth = AuthResult {
            user_id: 1,
            token: "token".to_string(),
            refresh_token: None,
        };
        transport.session.set_auth("http://localhost:9000", &auth);

        let url = transport.endpoint("/auth").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/api/v1/auth");
    }

    #[test]
    fn test_endpoint_rejects_bad_server() {
        let transport = transport("not a server", "/api/v1/");
        assert!(matches!(transport.endpoint("auth"), Err(ApiError::Network(_))));
    }
}
