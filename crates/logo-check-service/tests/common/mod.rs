// crates/logo-check-service/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: In-memory verification server for HTTP integration tests.
// Purpose: Script per-record responses and capture inbound requests.
// Dependencies: axum, logo-check-config, tokio
// ============================================================================

//! ## Overview
//! Spawns an axum server on `127.0.0.1:0` that answers logo-match requests
//! from a per-record script and records every request it receives.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    dead_code,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::routing::post;
use logo_check_config::LogoCheckConfig;
use logo_check_config::ServiceConfig;
use tokio::sync::oneshot;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Request observed by the test server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub record_id: String,
    pub authorization: Option<String>,
    pub correlation: Option<String>,
    pub body: String,
}

/// Scripted response for one record.
#[derive(Clone)]
pub struct ScriptedResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Shared server state.
#[derive(Default)]
struct ServerState {
    responses: Mutex<BTreeMap<String, ScriptedResponse>>,
    requests: Mutex<Vec<CapturedRequest>>,
}

/// Handle to a running test server.
pub struct TestServer {
    pub base_url: String,
    state: Arc<ServerState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Scripts the response for a record id.
    pub fn respond(&self, record_id: &str, status: StatusCode, body: &str) {
        self.state.responses.lock().expect("responses lock").insert(
            record_id.to_string(),
            ScriptedResponse {
                status,
                body: body.to_string(),
            },
        );
    }

    /// Returns captured requests in arrival order.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().expect("requests lock").clone()
    }

    /// Returns a valid config pointing at this server.
    pub fn config(&self) -> LogoCheckConfig {
        let mut service = ServiceConfig::new(self.base_url.clone());
        service.allow_http = true;
        service.connect_timeout_ms = 500;
        service.request_timeout_ms = 2_000;
        LogoCheckConfig {
            service,
            trigger: Default::default(),
            diagnostics: Default::default(),
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

async fn logo_match_handler(
    State(state): State<Arc<ServerState>>,
    Path(record_id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    state.requests.lock().expect("requests lock").push(CapturedRequest {
        record_id: record_id.clone(),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        correlation: headers
            .get("x-correlation-id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body,
    });
    let scripted = state.responses.lock().expect("responses lock").get(&record_id).cloned();
    match scripted {
        Some(response) => (response.status, response.body),
        None => (StatusCode::OK, r#"{"match":true}"#.to_string()),
    }
}

/// Spawns a verification server answering `{"match":true}` by default.
pub async fn spawn_server() -> TestServer {
    let state = Arc::new(ServerState::default());
    let app = Router::new()
        .route("/v1/records/{record_id}/logo-match", post(logo_match_handler))
        .with_state(Arc::clone(&state));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await;
    });
    TestServer {
        base_url: format!("http://{addr}"),
        state,
        shutdown: Some(shutdown_tx),
    }
}
