// crates/logo-check-core/src/core/state.rs
// ============================================================================
// Module: Logo Check Activation State
// Description: Idle, pending, and settled states for one activation.
// Purpose: Enforce the single forward path of an activation lifecycle.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Each activation moves `Idle -> Pending -> Settled` exactly once. There is
//! no retry edge: a failed attempt settles as [`Settlement::Contained`] and
//! stays there. Re-activation starts a fresh state machine.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Settlement
// ============================================================================

/// Terminal result of an activation as seen by the host.
///
/// # Invariants
/// - Carries no payload; the success report is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "settlement", rename_all = "snake_case")]
pub enum Settlement {
    /// Service answered successfully.
    Verified,
    /// Service failed; the failure was recorded and absorbed.
    Contained {
        /// Stable label of the contained error.
        error_kind: &'static str,
    },
}

// ============================================================================
// SECTION: State Machine
// ============================================================================

/// Lifecycle state for one activation.
///
/// # Invariants
/// - Only `Idle -> Pending` and `Pending -> Settled` are legal.
/// - `Settled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ActivationState {
    /// Activation has not issued a request yet.
    Idle,
    /// Request issued, awaiting the outcome.
    Pending,
    /// Outcome consumed.
    Settled(Settlement),
}

impl ActivationState {
    /// Returns a stable label for the state.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Settled(_) => "settled",
        }
    }

    /// Returns true once the outcome has been consumed.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Settled(_))
    }

    /// Returns the settlement when the state is terminal.
    #[must_use]
    pub const fn settlement(&self) -> Option<Settlement> {
        match self {
            Self::Settled(settlement) => Some(*settlement),
            Self::Idle | Self::Pending => None,
        }
    }

    /// Moves `Idle` to `Pending`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidTransition`] from any other state.
    pub const fn begin(self) -> Result<Self, StateError> {
        match self {
            Self::Idle => Ok(Self::Pending),
            Self::Pending | Self::Settled(_) => Err(StateError::InvalidTransition {
                from: self.label(),
                to: "pending",
            }),
        }
    }

    /// Moves `Pending` to `Settled`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidTransition`] from any other state.
    pub const fn settle(self, settlement: Settlement) -> Result<Self, StateError> {
        match self {
            Self::Pending => Ok(Self::Settled(settlement)),
            Self::Idle | Self::Settled(_) => Err(StateError::InvalidTransition {
                from: self.label(),
                to: "settled",
            }),
        }
    }
}

/// Activation state machine errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// Requested transition is not on the forward path.
    #[error("invalid activation transition from {from} to {to}")]
    InvalidTransition {
        /// Source state label.
        from: &'static str,
        /// Requested target state label.
        to: &'static str,
    },
}

#[cfg(test)]
mod tests;
