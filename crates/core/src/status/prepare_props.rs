//! Property-based tests for the dual-write preparer.

use proptest::prelude::*;
use serde_json::Value;

use procura_shared::types::{OrderId, ShipmentId};

use crate::status::order::{LegacyOrderStatus, OrderStatus};
use crate::status::prepare::DualWritePreparer;
use crate::status::shipment::{LegacyShipmentStatus, ShipmentStatus};
use crate::status::types::{DEFAULT_ACTOR, StatusUpdateContext};
use crate::status::validator::TransitionValidator;
use crate::status::vocabulary::UnifiedStatus;

/// Strategy over order statuses including unrecognized drift.
fn arb_order_status() -> impl Strategy<Value = OrderStatus> {
    prop_oneof![
        proptest::sample::select(OrderStatus::KNOWN.to_vec()),
        "[A-Z_]{1,24}".prop_map(|raw| OrderStatus::parse(&raw)),
    ]
}

/// Strategy over optional current unified statuses.
fn arb_current_unified() -> impl Strategy<Value = Option<OrderStatus>> {
    prop_oneof![Just(None), arb_order_status().prop_map(Some)]
}

/// Strategy over optional current legacy statuses.
fn arb_current_legacy() -> impl Strategy<Value = Option<LegacyOrderStatus>> {
    prop_oneof![
        Just(None),
        proptest::sample::select(vec![
            LegacyOrderStatus::Placed,
            LegacyOrderStatus::Confirmed,
            LegacyOrderStatus::AwaitingFulfilment,
            LegacyOrderStatus::Dispatched,
            LegacyOrderStatus::Delivered,
            LegacyOrderStatus::Cancelled,
        ])
        .prop_map(Some),
    ]
}

/// Strategy over contexts with and without an explicit actor.
fn arb_context() -> impl Strategy<Value = StatusUpdateContext> {
    prop_oneof![
        Just(StatusUpdateContext::new()),
        "[a-z]{1,12}".prop_map(StatusUpdateContext::by),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The unified payload always carries the status, timestamp, and
    /// actor fields, whatever the inputs.
    #[test]
    fn prop_unified_payload_is_complete(
        requested in arb_order_status(),
        current_legacy in arb_current_legacy(),
        current_unified in arb_current_unified(),
        ctx in arb_context(),
    ) {
        let result = DualWritePreparer::order(
            OrderId::new(),
            requested.clone(),
            current_legacy,
            current_unified,
            &ctx,
        );

        prop_assert_eq!(
            result.unified_update.get("unified_status").and_then(Value::as_str),
            Some(requested.as_str())
        );
        prop_assert!(result.unified_update.contains_key("unified_status_updated_at"));
        let actor = result
            .unified_update
            .get("unified_status_updated_by")
            .and_then(Value::as_str)
            .unwrap_or_default();
        prop_assert_eq!(actor, ctx.updated_by.as_deref().unwrap_or(DEFAULT_ACTOR));
    }

    /// The legacy payload always carries a status field, mapped or
    /// fallen back; mapping is total.
    #[test]
    fn prop_legacy_payload_is_total(
        requested in arb_order_status(),
        current_legacy in arb_current_legacy(),
        current_unified in arb_current_unified(),
    ) {
        let result = DualWritePreparer::order(
            OrderId::new(),
            requested.clone(),
            current_legacy.clone(),
            current_unified,
            &StatusUpdateContext::new(),
        );

        let written = result.legacy_update.get("status").and_then(Value::as_str);
        prop_assert!(written.is_some());
        if requested.to_legacy().is_none() {
            // Fallback: previous value, or the documented default.
            let expected = current_legacy.unwrap_or(LegacyOrderStatus::Placed);
            prop_assert_eq!(written, Some(expected.as_str()));
        }
    }

    /// The preparer's verdict is exactly the validator's verdict, and
    /// the audit entry mirrors the request whatever the outcome.
    #[test]
    fn prop_audit_mirrors_request(
        requested in arb_order_status(),
        current_unified in arb_current_unified(),
    ) {
        let result = DualWritePreparer::order(
            OrderId::new(),
            requested.clone(),
            None,
            current_unified.clone(),
            &StatusUpdateContext::new(),
        );

        let standalone = TransitionValidator::validate(current_unified.as_ref(), &requested);
        prop_assert_eq!(result.validation.valid, standalone.valid);

        prop_assert_eq!(
            result.audit.new_unified_status,
            Value::String(requested.to_string())
        );
        match current_unified {
            Some(current) => prop_assert_eq!(
                result.audit.previous_unified_status,
                Value::String(current.to_string())
            ),
            None => prop_assert_eq!(result.audit.previous_unified_status, Value::Null),
        }
        prop_assert!(result.audit.metadata.contains_key("validation"));
    }

    /// Shipment failure metadata lands on both sides exactly when the
    /// target is a failure outcome.
    #[test]
    fn prop_failure_reason_mirrored_on_failure_targets(
        requested in proptest::sample::select(ShipmentStatus::KNOWN.to_vec()),
        reason in "[a-z ]{1,32}",
    ) {
        let mut ctx = StatusUpdateContext::new();
        ctx.metadata
            .insert("failureReason".to_string(), Value::String(reason.clone()));

        let result = DualWritePreparer::shipment(
            ShipmentId::new(),
            requested.clone(),
            Some(LegacyShipmentStatus::InTransit),
            Some(ShipmentStatus::InTransit),
            &ctx,
        );

        let is_failure_target = matches!(
            requested,
            ShipmentStatus::Failed | ShipmentStatus::Returned | ShipmentStatus::Lost
        );
        prop_assert_eq!(
            result.legacy_update.contains_key("failure_reason"),
            is_failure_target
        );
        prop_assert_eq!(
            result.unified_update.contains_key("failure_reason"),
            is_failure_target
        );
    }
}
