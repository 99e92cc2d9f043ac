//! Dual-write payload preparation.
//!
//! Two representations of the same fact (legacy and unified status)
//! stay queryable during the migration window, so every change must
//! update both sides from a single source of truth: the requested
//! unified status. The preparer produces the two merge payloads and
//! the audit entry as plain data and performs no I/O, leaving
//! atomicity and rollback to the calling transaction.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use procura_shared::types::{
    AuditEntryId, GoodsReceiptId, InvoiceId, OrderId, PurchaseOrderId, PurchaseRequestId,
    ShipmentId,
};

use crate::status::audit::{AuditAction, AuditLogEntry};
use crate::status::goods_receipt::{GrnStatus, LegacyGrnStatus};
use crate::status::invoice::{InvoiceStatus, LegacyInvoiceStatus};
use crate::status::mapper::StatusMapper;
use crate::status::order::{LegacyOrderStatus, OrderStatus};
use crate::status::purchase_order::{LegacyPurchaseOrderStatus, PurchaseOrderStatus};
use crate::status::purchase_request::{LegacyPurchaseRequestStatus, PurchaseRequestStatus};
use crate::status::shipment::{LegacyShipmentStatus, ShipmentStatus};
use crate::status::types::{EntityType, StatusUpdateContext, UpdateDocument};
use crate::status::validator::{TransitionValidator, ValidationResult};
use crate::status::vocabulary::{LegacyStatus, UnifiedStatus};

/// Everything the caller needs to apply one status change.
///
/// Constructed fresh per request and never mutated afterwards; only
/// the payload fields and the audit entry are persisted, not the
/// result itself.
#[derive(Debug, Clone, Serialize)]
pub struct DualWriteResult {
    /// Entity domain the change belongs to.
    pub entity_type: EntityType,
    /// Identifier of the affected record.
    pub entity_id: String,
    /// Fields to merge into the legacy side of the record.
    pub legacy_update: UpdateDocument,
    /// Fields to merge into the unified side of the record.
    pub unified_update: UpdateDocument,
    /// Audit entry for this attempt, valid or not.
    pub audit: AuditLogEntry,
    /// Outcome of transition validation.
    pub validation: ValidationResult,
}

/// Stateless preparer producing dual-write payloads per entity type.
pub struct DualWritePreparer;

impl DualWritePreparer {
    /// Prepares an order status change.
    #[must_use]
    pub fn order(
        order_id: OrderId,
        requested: OrderStatus,
        current_legacy: Option<LegacyOrderStatus>,
        current_unified: Option<OrderStatus>,
        ctx: &StatusUpdateContext,
    ) -> DualWriteResult {
        prepare(
            order_id.to_string(),
            &requested,
            current_legacy.as_ref(),
            current_unified.as_ref(),
            ctx,
        )
    }

    /// Prepares a purchase request status change.
    ///
    /// When the request is being rejected and the context carries a
    /// `rejectionReason`, it is mirrored into both payloads.
    #[must_use]
    pub fn purchase_request(
        pr_id: PurchaseRequestId,
        requested: PurchaseRequestStatus,
        current_legacy: Option<LegacyPurchaseRequestStatus>,
        current_unified: Option<PurchaseRequestStatus>,
        ctx: &StatusUpdateContext,
    ) -> DualWriteResult {
        let mut result = prepare(
            pr_id.to_string(),
            &requested,
            current_legacy.as_ref(),
            current_unified.as_ref(),
            ctx,
        );
        if requested == PurchaseRequestStatus::Rejected {
            if let Some(reason) = ctx.metadata_str("rejectionReason") {
                set_both(
                    &mut result,
                    "rejection_reason",
                    Value::String(reason.to_string()),
                );
            }
        }
        result
    }

    /// Prepares a purchase order status change.
    #[must_use]
    pub fn purchase_order(
        po_id: PurchaseOrderId,
        requested: PurchaseOrderStatus,
        current_legacy: Option<LegacyPurchaseOrderStatus>,
        current_unified: Option<PurchaseOrderStatus>,
        ctx: &StatusUpdateContext,
    ) -> DualWriteResult {
        prepare(
            po_id.to_string(),
            &requested,
            current_legacy.as_ref(),
            current_unified.as_ref(),
            ctx,
        )
    }

    /// Prepares a shipment status change.
    ///
    /// Deliveries carry the `deliveredDate` from the context; failure
    /// outcomes (`FAILED`/`RETURNED`/`LOST`) carry the `failureReason`.
    #[must_use]
    pub fn shipment(
        shipment_id: ShipmentId,
        requested: ShipmentStatus,
        current_legacy: Option<LegacyShipmentStatus>,
        current_unified: Option<ShipmentStatus>,
        ctx: &StatusUpdateContext,
    ) -> DualWriteResult {
        let mut result = prepare(
            shipment_id.to_string(),
            &requested,
            current_legacy.as_ref(),
            current_unified.as_ref(),
            ctx,
        );
        match requested {
            ShipmentStatus::Delivered => {
                if let Some(date) = ctx.metadata_str("deliveredDate") {
                    set_both(&mut result, "deliveredDate", Value::String(date.to_string()));
                }
            }
            ShipmentStatus::Failed | ShipmentStatus::Returned | ShipmentStatus::Lost => {
                if let Some(reason) = ctx.metadata_str("failureReason") {
                    set_both(
                        &mut result,
                        "failure_reason",
                        Value::String(reason.to_string()),
                    );
                }
            }
            _ => {}
        }
        result
    }

    /// Prepares a goods receipt note status change.
    ///
    /// Approval stamps the acknowledging actor and timestamp on both
    /// sides of the record.
    #[must_use]
    pub fn goods_receipt(
        grn_id: GoodsReceiptId,
        requested: GrnStatus,
        current_legacy: Option<LegacyGrnStatus>,
        current_unified: Option<GrnStatus>,
        ctx: &StatusUpdateContext,
    ) -> DualWriteResult {
        let mut result = prepare(
            grn_id.to_string(),
            &requested,
            current_legacy.as_ref(),
            current_unified.as_ref(),
            ctx,
        );
        if requested == GrnStatus::Approved {
            stamp_approval(&mut result);
        }
        result
    }

    /// Prepares an invoice status change.
    ///
    /// Approval stamps the approving actor and timestamp on both sides
    /// of the record.
    #[must_use]
    pub fn invoice(
        invoice_id: InvoiceId,
        requested: InvoiceStatus,
        current_legacy: Option<LegacyInvoiceStatus>,
        current_unified: Option<InvoiceStatus>,
        ctx: &StatusUpdateContext,
    ) -> DualWriteResult {
        let mut result = prepare(
            invoice_id.to_string(),
            &requested,
            current_legacy.as_ref(),
            current_unified.as_ref(),
            ctx,
        );
        if requested == InvoiceStatus::Approved {
            stamp_approval(&mut result);
        }
        result
    }
}

/// Shared preparation pipeline: validate, map, assemble.
fn prepare<S: UnifiedStatus>(
    entity_id: String,
    requested: &S,
    current_legacy: Option<&S::Legacy>,
    current_unified: Option<&S>,
    ctx: &StatusUpdateContext,
) -> DualWriteResult {
    let mut validation = TransitionValidator::validate(current_unified, requested);

    let fallback = current_legacy
        .cloned()
        .unwrap_or_else(S::Legacy::fallback_default);
    if requested.to_legacy().is_none() {
        validation.warnings.push(format!(
            "No legacy {} mapping for \"{requested}\"; keeping the previous legacy value",
            S::ENTITY
        ));
    }
    let legacy_status = StatusMapper::unified_to_legacy(requested, &fallback);

    let now = Utc::now();
    let actor = ctx.actor().to_string();

    let mut legacy_update = UpdateDocument::new();
    legacy_status.write_to(&mut legacy_update);

    let mut unified_update = UpdateDocument::new();
    unified_update.insert(
        S::UNIFIED_FIELD.to_string(),
        Value::String(requested.to_string()),
    );
    unified_update.insert(S::updated_at_field(), Value::String(now.to_rfc3339()));
    unified_update.insert(S::updated_by_field(), Value::String(actor.clone()));

    let mut metadata = ctx.metadata.clone();
    if let Some(reason) = &ctx.reason {
        metadata.insert("reason".to_string(), Value::String(reason.clone()));
    }
    metadata.insert(
        "validation".to_string(),
        serde_json::to_value(&validation).unwrap_or(Value::Null),
    );

    let audit = AuditLogEntry {
        id: AuditEntryId::new(),
        entity_type: S::ENTITY,
        entity_id: entity_id.clone(),
        action: AuditAction::StatusUpdate,
        previous_legacy_status: current_legacy
            .map_or(Value::Null, LegacyStatus::to_audit_value),
        new_legacy_status: legacy_status.to_audit_value(),
        previous_unified_status: current_unified
            .map_or(Value::Null, |status| Value::String(status.to_string())),
        new_unified_status: Value::String(requested.to_string()),
        source: ctx
            .source
            .clone()
            .unwrap_or_else(|| "unspecified".to_string()),
        performed_by: actor,
        performed_at: now,
        metadata,
    };

    DualWriteResult {
        entity_type: S::ENTITY,
        entity_id,
        legacy_update,
        unified_update,
        audit,
        validation,
    }
}

/// Mirrors an entity-specific derived field into both payloads.
fn set_both(result: &mut DualWriteResult, key: &str, value: Value) {
    result.legacy_update.insert(key.to_string(), value.clone());
    result.unified_update.insert(key.to_string(), value);
}

/// Stamps the approving actor and timestamp on both payloads.
fn stamp_approval(result: &mut DualWriteResult) {
    let actor = result.audit.performed_by.clone();
    let at = result.audit.performed_at.to_rfc3339();
    set_both(result, "approvedBy", Value::String(actor));
    set_both(result, "approvedAt", Value::String(at));
}
