//! Fake inference server shared by the integration tests.

#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::post, Router};
use serde_json::Value;
use std::sync::{Arc, Mutex};

use doc_inquiry::config::BackendConfig;

/// Canned answers for the two kinds of request, plus a log of every body
/// received. Probe requests are told apart by their `prompt` field.
#[derive(Clone)]
pub struct FakeBackend {
    probe: (StatusCode, String),
    query: (StatusCode, String),
    requests: Arc<Mutex<Vec<Value>>>,
}

impl FakeBackend {
    pub fn new(probe: (u16, &str), query: (u16, &str)) -> Self {
        Self {
            probe: (StatusCode::from_u16(probe.0).unwrap(), probe.1.to_string()),
            query: (StatusCode::from_u16(query.0).unwrap(), query.1.to_string()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A backend that passes the probe and answers queries with `answer`.
    pub fn healthy(answer: &str) -> Self {
        let query = serde_json::json!({ "choices": [{ "text": answer }] }).to_string();
        Self::new((200, HELLO_BODY), (200, &query))
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    /// Bodies that were not probes.
    pub fn queries(&self) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter(|r| r.get("prompt").is_none())
            .collect()
    }
}

pub const HELLO_BODY: &str = r#"{"choices":[{"text":"Hello"}]}"#;

async fn handle_generate(State(fake): State<FakeBackend>, body: String) -> (StatusCode, String) {
    let json: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    fake.requests.lock().unwrap().push(json.clone());
    if json.get("prompt").is_some() {
        fake.probe.clone()
    } else {
        fake.query.clone()
    }
}

/// Serves `fake` on an ephemeral port and returns its generate URL.
pub async fn spawn_backend(fake: FakeBackend) -> String {
    let app = Router::new()
        .route("/api/generate", post(handle_generate))
        .with_state(fake);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/generate", addr)
}

/// A URL on a port nothing listens on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api/generate", port)
}

pub fn backend_config(url: &str) -> BackendConfig {
    BackendConfig {
        url: url.to_string(),
        timeout_secs: Some(10),
        ..BackendConfig::default()
    }
}
