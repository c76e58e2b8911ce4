// crates/logo-check-core/src/lib.rs
// ============================================================================
// Module: Logo Check Core Library
// Description: Lifecycle-bound, failure-contained logo verification trigger.
// Purpose: Issue one background verification per host activation.
// Dependencies: async-trait, serde, serde_json, thiserror, tokio
// ============================================================================

//! ## Overview
//! Logo Check Core provides the [`VerificationTrigger`] that a host surface
//! calls on activation, the injected [`VerificationService`] and
//! [`DiagnosticSink`] contracts, and the data model shared with transports.
//! Invariants:
//! - Each activation issues exactly one verification request.
//! - Verification failures are recorded once and never reach the host.
//! - Activations share no mutable state and are never retried or deduplicated.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod diagnostics;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::ActivationId;
pub use crate::core::ActivationState;
pub use crate::core::InputUnavailable;
pub use crate::core::MatchReport;
pub use crate::core::RecordId;
pub use crate::core::Settlement;
pub use crate::core::StateError;
pub use crate::core::VerificationError;
pub use crate::core::VerificationOutcome;
pub use crate::core::VerificationRequest;
pub use diagnostics::ChannelDiagnosticSink;
pub use diagnostics::DiagnosticRecord;
pub use diagnostics::FileDiagnosticSink;
pub use diagnostics::LOGO_CHECK_FAILED_EVENT;
pub use diagnostics::NoopDiagnosticSink;
pub use diagnostics::StderrDiagnosticSink;
pub use interfaces::DiagnosticSink;
pub use interfaces::VerificationService;
pub use runtime::ActivationHandle;
pub use runtime::TriggerBuildError;
pub use runtime::VerificationTrigger;
pub use runtime::VerificationTriggerBuilder;
