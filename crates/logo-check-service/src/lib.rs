// crates/logo-check-service/src/lib.rs
// ============================================================================
// Module: Logo Check Service Library
// Description: HTTP verification service and config-driven trigger wiring.
// Purpose: Reach the remote logo checker and assemble ready triggers.
// Dependencies: logo-check-config, logo-check-core, reqwest, tokio, url
// ============================================================================

//! ## Overview
//! Logo Check Service provides the [`HttpVerificationService`] transport and
//! the [`build_trigger`] wiring that turns configuration into a
//! [`logo_check_core::VerificationTrigger`].
//! Invariants:
//! - Remote failures map onto [`logo_check_core::VerificationError`] and are
//!   contained by the trigger.
//! - Configuration is validated before any client or sink is built.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod http;
pub mod wiring;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use http::CORRELATION_HEADER;
pub use http::HttpServiceError;
pub use http::HttpVerificationService;
pub use http::MAX_RESPONSE_BYTES;
pub use wiring::WiringError;
pub use wiring::build_diagnostics;
pub use wiring::build_trigger;
pub use wiring::build_trigger_on;
