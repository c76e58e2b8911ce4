// crates/logo-check-core/src/core/identifiers.rs
// ============================================================================
// Module: Logo Check Identifiers
// Description: Opaque record identifiers and per-activation identifiers.
// Purpose: Provide strongly typed identifiers with stable wire forms.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! [`RecordId`] names the record whose logo is verified. It is supplied by the
//! host surface and is never created, mutated, or destroyed by the trigger.
//! Construction is the host surface's contract: an empty token is rejected
//! with [`InputUnavailable`] before it can reach the trigger.
//!
//! [`ActivationId`] is assigned by the trigger for each activation and is only
//! used to correlate diagnostics and outbound requests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::num::NonZeroU64;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// The host surface failed to supply a usable record identifier.
///
/// # Invariants
/// - Raised only by [`RecordId::new`]; the trigger never produces or catches it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record identifier unavailable: identifier must be non-empty")]
pub struct InputUnavailable;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Record identifier naming the record under verification.
///
/// # Invariants
/// - Opaque UTF-8 string; never empty or whitespace-only.
/// - No normalization is applied; the token is forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a record identifier from a host-supplied token.
    ///
    /// # Errors
    ///
    /// Returns [`InputUnavailable`] when the token is empty or whitespace-only.
    pub fn new(id: impl Into<String>) -> Result<Self, InputUnavailable> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(InputUnavailable);
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RecordId {
    type Error = InputUnavailable;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Activation identifier assigned by the trigger.
///
/// # Invariants
/// - Always >= 1 (non-zero, 1-based).
/// - Allocated in activation order per trigger instance; after `u64::MAX`
///   activations the sequence wraps back to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivationId(NonZeroU64);

impl ActivationId {
    /// Creates a new activation identifier from a non-zero value.
    #[must_use]
    pub const fn new(id: NonZeroU64) -> Self {
        Self(id)
    }

    /// Creates an activation identifier from a raw value (returns `None` if zero).
    #[must_use]
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// Returns the raw identifier value (always >= 1).
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ActivationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.get().fmt(f)
    }
}
