use serde_json::json;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use taigalist::api::http::HttpTransport;
use taigalist::api::{ApiError, Transport};
use taigalist::config::ServerConfig;
use taigalist::entities::AuthResult;
use taigalist::Session;

/// Serve one canned HTTP response on a local port. The handle yields the
/// raw request, lowercased.
async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let read = socket.read(&mut buf).await.unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buf[..read]);
            if request_is_complete(&request) {
                break;
            }
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8_lossy(&request).to_lowercase()
    });

    (url, handle)
}

fn request_is_complete(request: &[u8]) -> bool {
    let text = String::from_utf8_lossy(request);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .find_map(|line| line.to_lowercase().strip_prefix("content-length:").map(|v| v.trim().to_string()))
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    request.len() >= header_end + 4 + content_length
}

fn transport_for(url: &str, token: Option<&str>) -> HttpTransport {
    let session = Session::new(url);
    if let Some(token) = token {
        session.set_auth(
            url,
            &AuthResult {
                user_id: 3,
                token: token.to_string(),
                refresh_token: None,
            },
        );
    }
    let config = ServerConfig {
        url: url.to_string(),
        api_prefix: "/api/v1/".to_string(),
        timeout_seconds: 5,
    };
    HttpTransport::new(Arc::new(session), &config).unwrap()
}

#[tokio::test]
async fn test_get_sends_token_and_query() {
    let (url, server) = serve_once("200 OK", r#"[{"id": 1}]"#).await;
    let transport = transport_for(&url, Some("secret-token"));

    let value = transport.get("userstories", &[("project", "4".to_string())]).await.unwrap();

    assert_eq!(value, json!([{ "id": 1 }]));
    let request = server.await.unwrap();
    assert!(request.starts_with("get /api/v1/userstories?project=4 http/1.1"));
    assert!(request.contains("authorization: bearer secret-token"));
}

#[tokio::test]
async fn test_anonymous_post_has_no_token() {
    let (url, server) = serve_once("200 OK", r#"{"id": 9, "auth_token": "new"}"#).await;
    // Logged in elsewhere, the token must not follow the login request
    let transport = transport_for("http://127.0.0.1:9", Some("old-token"));

    transport
        .post_anonymous(&url, "auth", json!({ "username": "alice" }))
        .await
        .unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("post /api/v1/auth http/1.1"));
    assert!(!request.contains("authorization:"));
    assert!(request.contains(r#""username":"alice""#));
}

#[tokio::test]
async fn test_bad_request_carries_server_message() {
    let (url, server) = serve_once("400 Bad Request", r#"{"_error_message": "Name is taken"}"#).await;
    let transport = transport_for(&url, Some("token"));

    let result = transport.post("milestones", &[], Some(json!({ "name": "Sprint" }))).await;

    assert_eq!(result, Err(ApiError::Validation("Name is taken".to_string())));
    server.await.unwrap();
}

#[tokio::test]
async fn test_status_codes_map_to_errors() {
    let (url, server) = serve_once("404 Not Found", "").await;
    let transport = transport_for(&url, Some("token"));
    assert!(matches!(transport.get("tasks/1", &[]).await, Err(ApiError::NotFound(_))));
    server.await.unwrap();

    let (url, server) = serve_once("403 Forbidden", "{}").await;
    let transport = transport_for(&url, Some("token"));
    assert_eq!(transport.delete("tasks/1").await, Err(ApiError::Forbidden));
    server.await.unwrap();

    let (url, server) = serve_once("502 Bad Gateway", "").await;
    let transport = transport_for(&url, None);
    assert_eq!(transport.patch("tasks/1", json!({})).await, Err(ApiError::Status(502)));
    server.await.unwrap();
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let (url, server) = serve_once("204 No Content", "").await;
    let transport = transport_for(&url, Some("token"));

    let value = transport.post("history/task/1/delete_comment", &[], None).await.unwrap();

    assert_eq!(value, serde_json::Value::Null);
    server.await.unwrap();
}
