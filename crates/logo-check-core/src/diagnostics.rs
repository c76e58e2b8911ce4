// crates/logo-check-core/src/diagnostics.rs
// ============================================================================
// Module: Logo Check Diagnostics
// Description: Structured failure records and reference diagnostic sinks.
// Purpose: Emit contained verification failures without hard dependencies.
// Dependencies: crate::core, crate::interfaces, serde, serde_json, tokio
// ============================================================================

//! ## Overview
//! Contained failures are reported as one JSON object per line. The sinks in
//! this module cover stderr, append-only files, in-process channels, and a
//! no-op sink. Deployments can route records elsewhere by implementing
//! [`DiagnosticSink`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use tokio::sync::mpsc;

use crate::core::identifiers::ActivationId;
use crate::core::identifiers::RecordId;
use crate::core::outcome::VerificationError;
use crate::interfaces::DiagnosticSink;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Event label carried by every failure record.
pub const LOGO_CHECK_FAILED_EVENT: &str = "logo_check_failed";

/// Diagnostic record for one contained verification failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticRecord {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Activation that produced the failure.
    pub activation_id: ActivationId,
    /// Record whose verification failed.
    pub record_id: RecordId,
    /// Normalized error kind label.
    pub error_kind: &'static str,
    /// Human-readable failure detail.
    pub message: String,
}

impl DiagnosticRecord {
    /// Creates a failure record with a consistent timestamp.
    #[must_use]
    pub fn failure(
        activation_id: ActivationId,
        record_id: RecordId,
        error: &VerificationError,
    ) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: LOGO_CHECK_FAILED_EVENT,
            timestamp_ms,
            activation_id,
            record_id,
            error_kind: error.kind(),
            message: error.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Diagnostic sink that logs JSON lines to stderr.
pub struct StderrDiagnosticSink;

impl DiagnosticSink for StderrDiagnosticSink {
    fn record(&self, record: &DiagnosticRecord) {
        if let Ok(payload) = serde_json::to_string(record) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Diagnostic sink that logs JSON lines to a file.
pub struct FileDiagnosticSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileDiagnosticSink {
    /// Opens the diagnostic log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl DiagnosticSink for FileDiagnosticSink {
    fn record(&self, record: &DiagnosticRecord) {
        if let Ok(payload) = serde_json::to_string(record)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Diagnostic sink that forwards records to an in-process channel.
///
/// # Invariants
/// - A closed receiver drops records silently.
pub struct ChannelDiagnosticSink {
    /// Sender half of the diagnostic channel.
    sender: mpsc::UnboundedSender<DiagnosticRecord>,
}

impl ChannelDiagnosticSink {
    /// Creates a channel sink along with its receiver.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DiagnosticRecord>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender,
            },
            receiver,
        )
    }

    /// Creates a channel sink from an existing sender.
    #[must_use]
    pub const fn from_sender(sender: mpsc::UnboundedSender<DiagnosticRecord>) -> Self {
        Self {
            sender,
        }
    }
}

impl DiagnosticSink for ChannelDiagnosticSink {
    fn record(&self, record: &DiagnosticRecord) {
        let _ = self.sender.send(record.clone());
    }
}

/// No-op diagnostic sink.
pub struct NoopDiagnosticSink;

impl DiagnosticSink for NoopDiagnosticSink {
    fn record(&self, _record: &DiagnosticRecord) {}
}
