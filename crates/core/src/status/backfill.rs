//! One-time unified-side seeding for records that predate the engine.
//!
//! Uses the lossy legacy→unified approximation, so seeded statuses are
//! a best effort, never re-derived once the engine has written a
//! unified value. Not hot-path code.

use chrono::Utc;
use serde_json::Value;

use procura_shared::types::AuditEntryId;

use crate::status::audit::{AuditAction, AuditLogEntry};
use crate::status::goods_receipt::{GrnApprovalStatus, GrnRecordStatus, GrnStatus, LegacyGrnStatus};
use crate::status::invoice::InvoiceStatus;
use crate::status::order::OrderStatus;
use crate::status::purchase_order::PurchaseOrderStatus;
use crate::status::purchase_request::PurchaseRequestStatus;
use crate::status::shipment::ShipmentStatus;
use crate::status::types::{EntityType, StatusUpdateContext, UpdateDocument};
use crate::status::vocabulary::{LegacyStatus, UnifiedStatus};

/// Stateless builder of unified-side seed payloads.
pub struct BackfillPreparer;

impl BackfillPreparer {
    /// Builds the unified-side seed payload and its `STATUS_SYNC` audit
    /// entry for a record that only carries a legacy status.
    ///
    /// Unmappable legacy values seed the entity's initial state. For
    /// GRN the raw token is the coarse `status` component with approval
    /// assumed pending; prefer [`BackfillPreparer::seed_goods_receipt`]
    /// when both components are at hand.
    #[must_use]
    pub fn seed(
        entity_type: EntityType,
        entity_id: &str,
        legacy_raw: &str,
        ctx: &StatusUpdateContext,
    ) -> (UpdateDocument, AuditLogEntry) {
        match entity_type {
            EntityType::Order => seed_as::<OrderStatus>(entity_id, legacy_raw, ctx),
            EntityType::PurchaseRequest => {
                seed_as::<PurchaseRequestStatus>(entity_id, legacy_raw, ctx)
            }
            EntityType::PurchaseOrder => seed_as::<PurchaseOrderStatus>(entity_id, legacy_raw, ctx),
            EntityType::Shipment => seed_as::<ShipmentStatus>(entity_id, legacy_raw, ctx),
            EntityType::GoodsReceipt => {
                Self::seed_goods_receipt(entity_id, legacy_raw, "PENDING", ctx)
            }
            EntityType::Invoice => seed_as::<InvoiceStatus>(entity_id, legacy_raw, ctx),
        }
    }

    /// GRN seeding with both legacy components.
    #[must_use]
    pub fn seed_goods_receipt(
        entity_id: &str,
        status_raw: &str,
        grn_status_raw: &str,
        ctx: &StatusUpdateContext,
    ) -> (UpdateDocument, AuditLogEntry) {
        let legacy = LegacyGrnStatus::new(
            GrnRecordStatus::parse(status_raw),
            GrnApprovalStatus::parse(grn_status_raw),
        );
        build::<GrnStatus>(entity_id, &legacy, ctx)
    }
}

fn seed_as<S>(
    entity_id: &str,
    legacy_raw: &str,
    ctx: &StatusUpdateContext,
) -> (UpdateDocument, AuditLogEntry)
where
    S: UnifiedStatus,
    S::Legacy: for<'a> From<&'a str>,
{
    let legacy = S::Legacy::from(legacy_raw);
    build::<S>(entity_id, &legacy, ctx)
}

fn build<S: UnifiedStatus>(
    entity_id: &str,
    legacy: &S::Legacy,
    ctx: &StatusUpdateContext,
) -> (UpdateDocument, AuditLogEntry) {
    let status = S::from_legacy(legacy).unwrap_or(S::INITIAL);
    let now = Utc::now();
    let actor = ctx.actor().to_string();

    let mut unified_update = UpdateDocument::new();
    unified_update.insert(
        S::UNIFIED_FIELD.to_string(),
        Value::String(status.to_string()),
    );
    unified_update.insert(S::updated_at_field(), Value::String(now.to_rfc3339()));
    unified_update.insert(S::updated_by_field(), Value::String(actor.clone()));

    let mut metadata = ctx.metadata.clone();
    if let Some(reason) = &ctx.reason {
        metadata.insert("reason".to_string(), Value::String(reason.clone()));
    }

    let audit = AuditLogEntry {
        id: AuditEntryId::new(),
        entity_type: S::ENTITY,
        entity_id: entity_id.to_string(),
        action: AuditAction::StatusSync,
        // The legacy side is untouched by seeding.
        previous_legacy_status: legacy.to_audit_value(),
        new_legacy_status: legacy.to_audit_value(),
        previous_unified_status: Value::Null,
        new_unified_status: Value::String(status.to_string()),
        source: ctx
            .source
            .clone()
            .unwrap_or_else(|| "status-backfill".to_string()),
        performed_by: actor,
        performed_at: now,
        metadata,
    };

    (unified_update, audit)
}
