// crates/logo-check-core/src/runtime/mod.rs
// ============================================================================
// Module: Logo Check Runtime
// Description: Activation runtime for background logo verification.
// Purpose: Host the verification trigger and its activation handles.
// Dependencies: crate::core, crate::interfaces, tokio
// ============================================================================

//! ## Overview
//! The runtime binds host activations to the injected verification service.

pub mod trigger;

pub use trigger::ActivationHandle;
pub use trigger::TriggerBuildError;
pub use trigger::VerificationTrigger;
pub use trigger::VerificationTriggerBuilder;
