//! Offline verification of the vocabulary and transition tables.
//!
//! The rule tables are compile-time constants and the forward-only/DAG
//! property is a design invariant, so it is checked here once rather
//! than on every runtime call.

use std::collections::HashSet;

use crate::status::goods_receipt::GrnStatus;
use crate::status::invoice::InvoiceStatus;
use crate::status::order::OrderStatus;
use crate::status::purchase_order::PurchaseOrderStatus;
use crate::status::purchase_request::PurchaseRequestStatus;
use crate::status::shipment::ShipmentStatus;
use crate::status::vocabulary::UnifiedStatus;

/// Structural checks every entity's tables must satisfy.
///
/// `backward_exceptions` lists edges that deliberately break the
/// forward-only rule and are reasoned about separately.
fn assert_tables_well_formed<S: UnifiedStatus>(backward_exceptions: &[(S, S)]) {
    for status in S::KNOWN {
        assert!(
            status.transitions().is_some(),
            "{status} missing from the rule table"
        );
        assert!(
            status.to_legacy().is_some(),
            "{status} missing a legacy mapping"
        );
    }

    let positions: HashSet<usize> = S::KNOWN
        .iter()
        .map(|status| status.position().unwrap())
        .collect();
    assert_eq!(positions.len(), S::KNOWN.len(), "duplicate table positions");

    for status in S::KNOWN {
        for target in status.transitions().unwrap() {
            assert!(
                target.is_recognized(),
                "{status} -> {target} targets an unknown status"
            );
            assert_ne!(status, target, "self-loop at {status}");

            let is_exception = backward_exceptions
                .iter()
                .any(|(from, to)| from == status && to == target);
            if !is_exception {
                assert!(
                    target.position().unwrap() > status.position().unwrap(),
                    "{status} -> {target} runs backwards"
                );
            }
        }
    }

    assert!(
        S::KNOWN.iter().any(UnifiedStatus::is_terminal),
        "no terminal status"
    );

    // The declared initial state must be the single status nothing
    // transitions into.
    let targeted: Vec<&S> = S::KNOWN
        .iter()
        .flat_map(|status| status.transitions().unwrap().iter())
        .collect();
    let roots: Vec<&S> = S::KNOWN
        .iter()
        .filter(|status| !targeted.contains(status))
        .collect();
    assert_eq!(roots, vec![&S::INITIAL]);
}

#[test]
fn test_order_tables_well_formed() {
    assert_tables_well_formed::<OrderStatus>(&[]);
}

#[test]
fn test_purchase_request_tables_well_formed() {
    assert_tables_well_formed::<PurchaseRequestStatus>(&[]);
}

#[test]
fn test_purchase_order_tables_well_formed() {
    assert_tables_well_formed::<PurchaseOrderStatus>(&[]);
}

#[test]
fn test_shipment_tables_well_formed() {
    assert_tables_well_formed::<ShipmentStatus>(&[]);
}

#[test]
fn test_goods_receipt_tables_well_formed() {
    assert_tables_well_formed::<GrnStatus>(&[]);
}

#[test]
fn test_invoice_tables_tolerate_only_the_dispute_cycle() {
    assert_tables_well_formed::<InvoiceStatus>(&[(
        InvoiceStatus::Disputed,
        InvoiceStatus::Raised,
    )]);
}

#[test]
fn test_unified_field_names_follow_convention() {
    // Orders keep the bare historical name; everyone else carries the
    // entity infix.
    assert_eq!(OrderStatus::UNIFIED_FIELD, "unified_status");
    assert_eq!(PurchaseRequestStatus::UNIFIED_FIELD, "unified_pr_status");
    assert_eq!(PurchaseOrderStatus::UNIFIED_FIELD, "unified_po_status");
    assert_eq!(ShipmentStatus::UNIFIED_FIELD, "unified_shipment_status");
    assert_eq!(GrnStatus::UNIFIED_FIELD, "unified_grn_status");
    assert_eq!(InvoiceStatus::UNIFIED_FIELD, "unified_invoice_status");
}
