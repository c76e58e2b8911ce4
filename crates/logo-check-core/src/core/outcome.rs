// crates/logo-check-core/src/core/outcome.rs
// ============================================================================
// Module: Logo Check Outcomes
// Description: Verification requests, success payloads, and failure taxonomy.
// Purpose: Model one verification attempt as an explicit tagged result.
// Dependencies: crate::core::identifiers, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`VerificationRequest`] lives only for the duration of one service call.
//! The service answers with a [`VerificationOutcome`]: either an opaque
//! [`MatchReport`] or a [`VerificationError`]. The trigger consumes the outcome
//! immediately and never stores it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::ActivationId;
use crate::core::identifiers::RecordId;

// ============================================================================
// SECTION: Request
// ============================================================================

/// Ephemeral request for one verification call.
///
/// # Invariants
/// - Borrows exactly one [`RecordId`]; it cannot outlive the activation task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationRequest<'a> {
    /// Record whose logo should be checked.
    record_id: &'a RecordId,
    /// Activation that issued the request.
    activation_id: ActivationId,
}

impl<'a> VerificationRequest<'a> {
    /// Creates a request for a single record.
    #[must_use]
    pub const fn new(record_id: &'a RecordId, activation_id: ActivationId) -> Self {
        Self {
            record_id,
            activation_id,
        }
    }

    /// Returns the record identifier under verification.
    #[must_use]
    pub const fn record_id(&self) -> &'a RecordId {
        self.record_id
    }

    /// Returns the issuing activation identifier.
    #[must_use]
    pub const fn activation_id(&self) -> ActivationId {
        self.activation_id
    }
}

// ============================================================================
// SECTION: Success Payload
// ============================================================================

/// Opaque success payload returned by the verification service.
///
/// # Invariants
/// - The trigger never interprets the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchReport(Value);

impl MatchReport {
    /// Wraps a raw service payload.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the raw payload.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the report and returns the raw payload.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

// ============================================================================
// SECTION: Failure Taxonomy
// ============================================================================

/// Verification service invocation failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Every variant is contained by the trigger and never reaches the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// Service could not be reached or reported itself unavailable.
    #[error("verification service unavailable: {0}")]
    Unavailable(String),
    /// Service refused the request on business grounds.
    #[error("verification rejected: {0}")]
    Rejected(String),
    /// Activation deadline elapsed before the service answered.
    #[error("verification timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured deadline in milliseconds.
        timeout_ms: u64,
    },
    /// Service answered successfully with an unusable body.
    #[error("invalid verification response: {0}")]
    InvalidResponse(String),
    /// Service call panicked or was cancelled by the runtime.
    #[error("verification aborted: {0}")]
    Aborted(String),
}

impl VerificationError {
    /// Returns a stable label for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "unavailable",
            Self::Rejected(_) => "rejected",
            Self::Timeout {
                ..
            } => "timeout",
            Self::InvalidResponse(_) => "invalid_response",
            Self::Aborted(_) => "aborted",
        }
    }
}

/// Result of one verification attempt.
pub type VerificationOutcome = Result<MatchReport, VerificationError>;
