// tests/common/mod.rs
//! Scripted network and clock capabilities shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use leafpad::{
    ClientConfig, ConfigOverrides, ContentService, Timer, Transport, TransportError,
    TransportResponse,
};
use parking_lot::Mutex;
use reqwest::header::HeaderMap;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// One scripted transport outcome.
#[derive(Debug, Clone)]
pub enum Step {
    /// Answer with this status and body.
    Respond(u16, String),
    /// Fail before any response arrives.
    Fail(String),
    /// Never answer.
    Hang,
}

impl Step {
    pub fn ok(body: Value) -> Self {
        Step::Respond(200, body.to_string())
    }

    pub fn status(status: u16) -> Self {
        Step::Respond(status, String::new())
    }
}

/// Replays [`Step`]s in order and records every requested URL.
#[derive(Default)]
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(
        &self,
        url: &str,
        _headers: &HeaderMap,
    ) -> Result<TransportResponse, TransportError> {
        self.requests.lock().push(url.to_string());
        let step = self.steps.lock().pop_front();
        match step {
            Some(Step::Respond(status, body)) => Ok(TransportResponse::new(status, body)),
            Some(Step::Fail(message)) => Err(TransportError::Network(message)),
            Some(Step::Hang) => std::future::pending().await,
            None => panic!("transport script exhausted at {}", url),
        }
    }
}

/// A clock that never really waits.
///
/// The request deadline either never fires or fires at once (`expiring`).
/// Backoff waits are recorded and complete at once.
#[derive(Default)]
pub struct FakeTimer {
    deadline_expires: bool,
    waits: Mutex<Vec<Duration>>,
}

impl FakeTimer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn expiring() -> Arc<Self> {
        Arc::new(Self {
            deadline_expires: true,
            ..Self::default()
        })
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().clone()
    }
}

#[async_trait]
impl Timer for FakeTimer {
    async fn sleep(&self, duration: Duration) {
        self.waits.lock().push(duration);
    }

    async fn deadline(&self, _duration: Duration) {
        if !self.deadline_expires {
            std::future::pending::<()>().await;
        }
    }
}

/// A service for organization `acme` with default settings.
pub fn service(transport: Arc<ScriptedTransport>, timer: Arc<FakeTimer>) -> ContentService {
    service_with(ConfigOverrides::default(), transport, timer)
}

/// A service for organization `acme` with `overrides` applied.
pub fn service_with(
    overrides: ConfigOverrides,
    transport: Arc<ScriptedTransport>,
    timer: Arc<FakeTimer>,
) -> ContentService {
    let config = ClientConfig::resolve("acme", overrides).expect("config should resolve");
    ContentService::with_capabilities(config, transport, timer)
        .expect("endpoint should parse")
}

pub fn organization_json() -> Value {
    json!({ "id": "org_1", "name": "Acme", "slug": "acme" })
}

pub fn item_json(id: u64, parent_id: Option<u64>) -> Value {
    json!({
        "id": id,
        "name": format!("Page {}", id),
        "slug": format!("page-{}", id),
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z",
        "published": true,
        "parentId": parent_id,
        "hasChildren": false,
        "tags": [],
        "organization": organization_json(),
        "createdByUser": { "name": "Ada", "image": "https://leafpad.io/ada.png" }
    })
}

pub fn listing_json(items: Vec<Value>) -> Value {
    let count = items.len();
    json!({
        "posts": items,
        "pagination": {
            "page": 1,
            "limit": 10,
            "totalCount": count,
            "totalPages": 1,
            "hasNext": false,
            "hasPrev": false
        },
        "organization": organization_json()
    })
}
