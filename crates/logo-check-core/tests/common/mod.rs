// crates/logo-check-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Shared service doubles and diagnostic collectors.
// Purpose: Provide reusable fixtures for trigger integration tests.
// Dependencies: logo-check-core, serde_json, tokio
// ============================================================================

//! ## Overview
//! Provides scripted [`VerificationService`] doubles and a collecting
//! [`DiagnosticSink`] for trigger tests.

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

use async_trait::async_trait;
use logo_check_core::DiagnosticRecord;
use logo_check_core::DiagnosticSink;
use logo_check_core::MatchReport;
use logo_check_core::RecordId;
use logo_check_core::VerificationError;
use logo_check_core::VerificationRequest;
use logo_check_core::VerificationService;
use serde_json::json;
use tokio::sync::Notify;

// ============================================================================
// SECTION: Identifier Helpers
// ============================================================================

/// Creates a record identifier, panicking on empty input.
pub fn record(id: &str) -> RecordId {
    RecordId::new(id).expect("non-empty record id")
}

// ============================================================================
// SECTION: Scripted Service
// ============================================================================

/// Service double that records calls and answers from a script.
#[derive(Clone, Default)]
pub struct ScriptedService {
    calls: Arc<Mutex<Vec<String>>>,
    failures: Arc<Mutex<BTreeMap<String, VerificationError>>>,
    gates: Arc<Mutex<BTreeMap<String, Arc<Notify>>>>,
}

impl ScriptedService {
    /// Creates a service that succeeds with `{"match": true}` for every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call for `id` fail with `error`.
    pub fn fail_with(&self, id: &str, error: VerificationError) {
        self.failures.lock().expect("failures lock").insert(id.to_string(), error);
    }

    /// Clears a scripted failure for `id`.
    pub fn recover(&self, id: &str) {
        self.failures.lock().expect("failures lock").remove(id);
    }

    /// Holds calls for `id` until the returned gate is notified.
    pub fn gate(&self, id: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().expect("gates lock").insert(id.to_string(), Arc::clone(&gate));
        gate
    }

    /// Returns the record ids seen so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl VerificationService for ScriptedService {
    async fn check_logo_match(
        &self,
        request: &VerificationRequest<'_>,
    ) -> Result<MatchReport, VerificationError> {
        let id = request.record_id().as_str().to_string();
        self.calls.lock().expect("calls lock").push(id.clone());
        let gate = self.gates.lock().expect("gates lock").get(&id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let failure = self.failures.lock().expect("failures lock").get(&id).cloned();
        match failure {
            Some(error) => Err(error),
            None => Ok(MatchReport::new(json!({ "match": true }))),
        }
    }
}

/// Service double that panics on every call.
pub struct PanickingService;

#[async_trait]
impl VerificationService for PanickingService {
    async fn check_logo_match(
        &self,
        _request: &VerificationRequest<'_>,
    ) -> Result<MatchReport, VerificationError> {
        panic!("service exploded");
    }
}

/// Service double that never answers.
pub struct StalledService;

#[async_trait]
impl VerificationService for StalledService {
    async fn check_logo_match(
        &self,
        _request: &VerificationRequest<'_>,
    ) -> Result<MatchReport, VerificationError> {
        std::future::pending::<()>().await;
        Err(VerificationError::Unavailable("unreachable".to_string()))
    }
}

// ============================================================================
// SECTION: Collecting Sink
// ============================================================================

/// Diagnostic sink that keeps every record in memory.
#[derive(Clone, Default)]
pub struct CollectingSink {
    records: Arc<Mutex<Vec<DiagnosticRecord>>>,
}

impl CollectingSink {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected records.
    pub fn records(&self) -> Vec<DiagnosticRecord> {
        self.records.lock().expect("records lock").clone()
    }
}

impl DiagnosticSink for CollectingSink {
    fn record(&self, record: &DiagnosticRecord) {
        self.records.lock().expect("records lock").push(record.clone());
    }
}
