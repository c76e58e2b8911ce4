// crates/logo-check-core/src/interfaces/mod.rs
// ============================================================================
// Module: Logo Check Interfaces
// Description: Injected collaborator contracts for verification and diagnostics.
// Purpose: Decouple the trigger from transports and log destinations.
// Dependencies: crate::core, crate::diagnostics, async-trait
// ============================================================================

//! ## Overview
//! The trigger depends on two injected capabilities: a [`VerificationService`]
//! that performs the logo comparison remotely, and a [`DiagnosticSink`] that
//! receives failure records. Neither is hard-wired, so both can be swapped for
//! test doubles.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;

use crate::core::outcome::MatchReport;
use crate::core::outcome::VerificationError;
use crate::core::outcome::VerificationRequest;
use crate::diagnostics::DiagnosticRecord;

// ============================================================================
// SECTION: Verification Service
// ============================================================================

/// Remote logo comparison capability.
#[async_trait]
pub trait VerificationService: Send + Sync {
    /// Checks whether the record's logo matches its expected reference.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError`] when the service cannot be reached,
    /// rejects the request, or answers with an unusable payload.
    async fn check_logo_match(
        &self,
        request: &VerificationRequest<'_>,
    ) -> Result<MatchReport, VerificationError>;
}

// ============================================================================
// SECTION: Diagnostic Sink
// ============================================================================

/// Operator-visible destination for contained failures.
pub trait DiagnosticSink: Send + Sync {
    /// Records a diagnostic entry. Write failures are dropped by the sink.
    fn record(&self, record: &DiagnosticRecord);
}
