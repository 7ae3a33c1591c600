//! Common test utilities and helpers
//!
//! Builds a server over an in-memory store with a manual clock, so tests
//! decide exactly when participants go stale.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use chrono::{TimeZone, Utc};

use batepapo::backend::presence::{Clock, ManualClock, Reaper};
use batepapo::backend::server::{build_app, ServerConfig};
use batepapo::backend::store::{ChatStore, MemoryStore, SqlStore};

/// A running test server and the handles needed to steer it
pub struct TestRoom {
    pub server: TestServer,
    pub clock: Arc<ManualClock>,
    pub reaper: Reaper,
    pub store: Arc<dyn ChatStore>,
}

pub fn start_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 20, 15, 0).unwrap(),
    ))
}

pub fn room_with_store(store: Arc<dyn ChatStore>) -> TestRoom {
    let clock = start_clock();
    let app = build_app(&ServerConfig::default(), store.clone(), clock.clone());
    let server = TestServer::new(app.router).expect("Failed to start test server");
    TestRoom {
        server,
        clock,
        reaper: app.reaper,
        store,
    }
}

/// Test room over a fresh in-memory store
pub fn room() -> TestRoom {
    room_with_store(Arc::new(MemoryStore::new()))
}

/// Test room over a fresh in-memory SQLite database
pub async fn sql_room() -> TestRoom {
    let store = SqlStore::in_memory()
        .await
        .expect("Failed to open in-memory database");
    room_with_store(Arc::new(store))
}

/// `User` header for `name`
pub fn user(name: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("user"),
        HeaderValue::from_str(name).expect("valid header value"),
    )
}

impl TestRoom {
    pub fn clock_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    pub async fn join(&self, name: &str) {
        let response = self
            .server
            .post("/participants")
            .json(&serde_json::json!({ "name": name }))
            .await;
        assert_eq!(response.status_code(), axum::http::StatusCode::CREATED);
    }

    pub async fn send(&self, from: &str, to: &str, text: &str, kind: &str) -> axum_test::TestResponse {
        let (name, value) = user(from);
        self.server
            .post("/messages")
            .add_header(name, value)
            .json(&serde_json::json!({ "to": to, "text": text, "type": kind }))
            .await
    }

    pub async fn messages_for(&self, reader: &str, limit: Option<&str>) -> axum_test::TestResponse {
        let (name, value) = user(reader);
        let mut request = self.server.get("/messages").add_header(name, value);
        if let Some(limit) = limit {
            request = request.add_query_param("limit", limit);
        }
        request.await
    }
}
