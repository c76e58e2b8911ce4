// crates/logo-check-core/src/core/mod.rs
// ============================================================================
// Module: Logo Check Core Types
// Description: Identifiers, outcomes, and activation state.
// Purpose: Group the data model shared by the trigger and its collaborators.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types are backend-agnostic and carry no I/O. They are re-exported from
//! the crate root.

pub mod identifiers;
pub mod outcome;
pub mod state;

pub use identifiers::ActivationId;
pub use identifiers::InputUnavailable;
pub use identifiers::RecordId;
pub use outcome::MatchReport;
pub use outcome::VerificationError;
pub use outcome::VerificationOutcome;
pub use outcome::VerificationRequest;
pub use state::ActivationState;
pub use state::Settlement;
pub use state::StateError;
