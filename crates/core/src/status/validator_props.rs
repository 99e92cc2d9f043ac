//! Property-based tests for the transition validator.

use proptest::prelude::*;

use crate::status::invoice::InvoiceStatus;
use crate::status::order::OrderStatus;
use crate::status::shipment::ShipmentStatus;
use crate::status::validator::TransitionValidator;
use crate::status::vocabulary::UnifiedStatus;

/// Strategy over the known order vocabulary.
fn arb_known_order() -> impl Strategy<Value = OrderStatus> {
    proptest::sample::select(OrderStatus::KNOWN.to_vec())
}

/// Strategy over raw tokens, drifting well outside the vocabulary.
fn arb_raw_token() -> impl Strategy<Value = String> {
    "[A-Z_]{1,24}"
}

/// Strategy over order statuses including unrecognized drift.
fn arb_order() -> impl Strategy<Value = OrderStatus> {
    prop_oneof![
        arb_known_order(),
        arb_raw_token().prop_map(|raw| OrderStatus::parse(&raw)),
    ]
}

/// Strategy over shipment statuses including unrecognized drift.
fn arb_shipment() -> impl Strategy<Value = ShipmentStatus> {
    prop_oneof![
        proptest::sample::select(ShipmentStatus::KNOWN.to_vec()),
        arb_raw_token().prop_map(|raw| ShipmentStatus::parse(&raw)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// A record without a unified status accepts any target.
    #[test]
    fn prop_new_record_always_valid(requested in arb_order()) {
        let result = TransitionValidator::validate(None, &requested);
        prop_assert!(result.valid);
        prop_assert!(result.warnings.is_empty());
    }

    /// Re-requesting the current status is valid and flagged unchanged,
    /// even for drifted values.
    #[test]
    fn prop_self_transition_warns_unchanged(status in arb_order()) {
        let result = TransitionValidator::validate(Some(&status), &status);
        prop_assert!(result.valid);
        prop_assert!(result.warnings.iter().any(|warning| warning.contains("unchanged")));
    }

    /// Terminal statuses admit no outgoing transition.
    #[test]
    fn prop_terminal_admits_nothing(requested in arb_known_order()) {
        for current in OrderStatus::KNOWN {
            if !current.is_terminal() || *current == requested {
                continue;
            }
            let result = TransitionValidator::validate(Some(current), &requested);
            prop_assert!(!result.valid, "{current} -> {requested} accepted");
            let reason = result.reason.unwrap_or_default();
            prop_assert!(
                reason.contains("Backwards") || reason.contains("Invalid transition"),
                "unexpected reason: {reason}"
            );
        }
    }

    /// A pass from a known current status means the target is in the
    /// allowed set (or the request is a no-op).
    #[test]
    fn prop_valid_implies_allowed(current in arb_known_order(), requested in arb_known_order()) {
        let result = TransitionValidator::validate(Some(&current), &requested);
        if result.valid && current != requested {
            let allowed = current.transitions().unwrap();
            prop_assert!(allowed.contains(&requested));
        }
    }

    /// Rejections always explain themselves; passes never do.
    #[test]
    fn prop_reason_accompanies_rejection(current in arb_shipment(), requested in arb_shipment()) {
        let result = TransitionValidator::validate(Some(&current), &requested);
        prop_assert_eq!(result.valid, result.reason.is_none());
    }

    /// The validator is total over arbitrary drifted tokens.
    #[test]
    fn prop_never_panics_on_drift(current in arb_raw_token(), requested in arb_raw_token()) {
        let current = ShipmentStatus::parse(&current);
        let requested = ShipmentStatus::parse(&requested);
        let result = TransitionValidator::validate(Some(&current), &requested);
        // An unknown current status must never block the operation.
        if !current.is_recognized() {
            prop_assert!(result.valid);
        }
    }

    /// Every valid invoice transition runs forward except the
    /// documented dispute cycle.
    #[test]
    fn prop_invoice_forward_except_dispute(
        current in proptest::sample::select(InvoiceStatus::KNOWN.to_vec()),
        requested in proptest::sample::select(InvoiceStatus::KNOWN.to_vec()),
    ) {
        let result = TransitionValidator::validate(Some(&current), &requested);
        if result.valid && current != requested {
            let forward = requested.position().unwrap() > current.position().unwrap();
            let dispute_cycle =
                current == InvoiceStatus::Disputed && requested == InvoiceStatus::Raised;
            prop_assert!(forward || dispute_cycle);
        }
    }
}
