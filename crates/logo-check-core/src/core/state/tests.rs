// crates/logo-check-core/src/core/state/tests.rs
// ============================================================================
// Module: Activation State Tests
// Description: Unit tests for the activation state machine.
// Purpose: Validate forward-only transitions and terminal settlement.
// Dependencies: logo-check-core
// ============================================================================

//! ## Overview
//! Exercises the legal and illegal transitions of [`super::ActivationState`].

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

use super::ActivationState;
use super::Settlement;
use super::StateError;

#[test]
fn idle_begins_then_settles() {
    let pending = ActivationState::Idle.begin().expect("begin");
    assert_eq!(pending, ActivationState::Pending);
    let settled = pending.settle(Settlement::Verified).expect("settle");
    assert!(settled.is_terminal());
    assert_eq!(settled.settlement(), Some(Settlement::Verified));
}

#[test]
fn contained_failure_is_terminal() {
    let settled = ActivationState::Pending
        .settle(Settlement::Contained {
            error_kind: "unavailable",
        })
        .expect("settle");
    let err = settled.begin().expect_err("no retry edge");
    assert_eq!(
        err,
        StateError::InvalidTransition {
            from: "settled",
            to: "pending",
        }
    );
}

#[test]
fn pending_cannot_begin_twice() {
    let err = ActivationState::Pending.begin().expect_err("double begin");
    assert!(matches!(err, StateError::InvalidTransition { from: "pending", .. }));
}

#[test]
fn idle_cannot_settle() {
    let err = ActivationState::Idle.settle(Settlement::Verified).expect_err("skip pending");
    assert_eq!(err.to_string(), "invalid activation transition from idle to settled");
}

#[test]
fn settled_cannot_settle_again() {
    let settled = ActivationState::Settled(Settlement::Verified);
    assert!(settled.settle(Settlement::Verified).is_err());
    assert_eq!(ActivationState::Idle.settlement(), None);
}
