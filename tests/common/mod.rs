#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use taigalist::api::{ApiError, Query, Transport};
use taigalist::entities::{CommonTask, CommonTaskType, ProjectInfo, Sprint};

/// A request seen by [`FakeTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    /// Server targeted by anonymous requests; `None` means the session's
    pub server: Option<String>,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Recorded {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// In-memory transport: canned responses per path, requests recorded.
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<HashMap<String, VecDeque<Result<Value, ApiError>>>>,
    requests: Mutex<Vec<Recorded>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next request to `path`
    pub fn respond(&self, path: &str, value: Value) {
        self.push(path, Ok(value));
    }

    pub fn fail(&self, path: &str, error: ApiError) {
        self.push(path, Err(error));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }

    fn push(&self, path: &str, response: Result<Value, ApiError>) {
        self.responses
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(response);
    }

    fn handle(&self, method: &'static str, path: &str, query: &Query<'_>, body: Option<Value>) -> Result<Value, ApiError> {
        self.record(method, None, path, query, body)
    }

    fn record(
        &self,
        method: &'static str,
        server: Option<&str>,
        path: &str,
        query: &Query<'_>,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        self.requests.lock().unwrap().push(Recorded {
            method,
            server: server.map(str::to_string),
            path: path.to_string(),
            query: query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
            body,
        });
        self.responses
            .lock()
            .unwrap()
            .get_mut(path)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(ApiError::NotFound(path.to_string())))
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, path: &str, query: &Query<'_>) -> Result<Value, ApiError> {
        self.handle("GET", path, query, None)
    }

    async fn post(&self, path: &str, query: &Query<'_>, body: Option<Value>) -> Result<Value, ApiError> {
        self.handle("POST", path, query, body)
    }

    async fn patch(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.handle("PATCH", path, &[], Some(body))
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.handle("DELETE", path, &[], None).map(|_| ())
    }

    async fn post_anonymous(&self, server: &str, path: &str, body: Value) -> Result<Value, ApiError> {
        self.record("POST", Some(server), path, &[], Some(body))
    }
}

/// Wire JSON of a user story / task / epic / issue
pub fn task_json(id: i64, subject: &str) -> Value {
    json!({
        "id": id,
        "ref": id + 100,
        "subject": subject,
        "created_date": "2021-06-01T10:15:30Z",
        "status": 7,
        "status_extra_info": { "name": "New", "color": "#70728F" },
        "assigned_to": 3,
        "assigned_users": null,
        "watchers": [5],
        "is_closed": false,
        "project": 1,
        "project_extra_info": { "id": 1, "name": "Demo", "slug": "demo" },
        "color": null,
        "version": 2
    })
}

pub fn task(id: i64) -> CommonTask {
    CommonTask {
        id,
        reference: id + 100,
        title: format!("Story {}", id),
        created_at: Utc.with_ymd_and_hms(2021, 6, 1, 10, 15, 30).unwrap(),
        status: None,
        assigned_ids: vec![],
        watcher_ids: vec![],
        is_closed: false,
        project: ProjectInfo {
            id: 1,
            name: "Demo".to_string(),
            slug: "demo".to_string(),
        },
        task_type: CommonTaskType::UserStory,
        color: None,
        version: 1,
    }
}

/// `count` stories with ids starting at `first`
pub fn tasks(first: i64, count: usize) -> Vec<CommonTask> {
    (0..count as i64).map(|i| task(first + i)).collect()
}

pub fn sprint(id: i64) -> Sprint {
    Sprint {
        id,
        name: format!("Sprint {}", id),
        order: id,
        start: NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
        end: NaiveDate::from_ymd_opt(2021, 6, 14).unwrap(),
        stories_count: 0,
        is_closed: false,
    }
}
