// crates/logo-check-core/tests/identifiers.rs
// ============================================================================
// Module: Identifier Tests
// Description: Unit and property tests for record and activation identifiers.
// Purpose: Validate host-side identifier construction and wire forms.
// Dependencies: logo-check-core, proptest, serde_json
// ============================================================================

//! ## Overview
//! Exercises [`logo_check_core::RecordId`] construction guards and
//! [`logo_check_core::ActivationId`] invariants.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use logo_check_core::ActivationId;
use logo_check_core::InputUnavailable;
use logo_check_core::RecordId;
use proptest::prelude::*;

/// Tests empty identifiers are rejected before reaching the trigger.
#[test]
fn record_id_rejects_empty() {
    assert_eq!(RecordId::new(""), Err(InputUnavailable));
    assert_eq!(RecordId::new("   \t"), Err(InputUnavailable));
}

/// Tests identifiers are kept verbatim.
#[test]
fn record_id_is_opaque() {
    let id = RecordId::new(" M-1001 ").expect("record id");
    assert_eq!(id.as_str(), " M-1001 ");
    assert_eq!(id.to_string(), " M-1001 ");
}

/// Tests deserialization applies the same guard as construction.
#[test]
fn record_id_deserialize_rejects_empty() {
    let ok: RecordId = serde_json::from_str("\"M-1001\"").expect("deserialize");
    assert_eq!(ok.as_str(), "M-1001");
    let err = serde_json::from_str::<RecordId>("\"\"").expect_err("empty rejected");
    assert!(err.to_string().contains("record identifier unavailable"));
}

/// Tests activation ids reject zero.
#[test]
fn activation_id_rejects_zero() {
    assert!(ActivationId::from_raw(0).is_none());
    assert_eq!(ActivationId::from_raw(7).map(ActivationId::get), Some(7));
}

proptest! {
    #[test]
    fn non_blank_ids_round_trip(raw in "[A-Za-z0-9_-]{1,32}") {
        let id = RecordId::new(raw.clone()).expect("record id");
        prop_assert_eq!(id.as_str(), raw.as_str());
        let encoded = serde_json::to_string(&id).expect("serialize");
        let decoded: RecordId = serde_json::from_str(&encoded).expect("deserialize");
        prop_assert_eq!(decoded, id);
    }

    #[test]
    fn whitespace_only_ids_are_unavailable(raw in "[ \t\n]{0,8}") {
        prop_assert!(RecordId::new(raw).is_err());
    }
}
