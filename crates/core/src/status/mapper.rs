//! Unified/legacy status mapping.
//!
//! Mapping never fails: an unrecognized input resolves to the
//! caller-supplied fallback, typically the record's previous value or
//! the entity's documented default. The legacy→unified direction is a
//! lossy approximation used only for one-time backfill: several
//! unified values collapse onto one legacy value, so round-tripping is
//! not expected to be stable.

use serde_json::Value;

use crate::status::goods_receipt::{
    GrnApprovalStatus, GrnRecordStatus, GrnStatus, LegacyGrnStatus,
};
use crate::status::invoice::InvoiceStatus;
use crate::status::order::OrderStatus;
use crate::status::purchase_order::PurchaseOrderStatus;
use crate::status::purchase_request::PurchaseRequestStatus;
use crate::status::shipment::ShipmentStatus;
use crate::status::types::EntityType;
use crate::status::vocabulary::{LegacyStatus, UnifiedStatus};

/// Stateless mapper over the per-entity vocabulary tables.
pub struct StatusMapper;

impl StatusMapper {
    /// Maps a unified status to its legacy equivalent.
    #[must_use]
    pub fn unified_to_legacy<S: UnifiedStatus>(status: &S, fallback: &S::Legacy) -> S::Legacy {
        status.to_legacy().unwrap_or_else(|| fallback.clone())
    }

    /// Approximates a legacy status in the unified vocabulary.
    ///
    /// Backfill plumbing only; never used to re-derive a unified status
    /// that the engine already wrote.
    #[must_use]
    pub fn legacy_to_unified<S: UnifiedStatus>(legacy: &S::Legacy, fallback: &S) -> S {
        S::from_legacy(legacy).unwrap_or_else(|| fallback.clone())
    }

    /// One-shot read-path lookup of the legacy value for a raw unified
    /// token.
    ///
    /// GRN yields its two-field object; every other entity yields a
    /// string. Unmapped tokens yield the fallback as a string.
    #[must_use]
    pub fn legacy_status_from_unified(
        entity: EntityType,
        unified_raw: &str,
        fallback: &str,
    ) -> Value {
        fn via<S: UnifiedStatus>(raw: &str, fallback: &str) -> Value {
            S::from(raw).to_legacy().map_or_else(
                || Value::String(fallback.to_string()),
                |legacy| legacy.to_audit_value(),
            )
        }

        match entity {
            EntityType::Order => via::<OrderStatus>(unified_raw, fallback),
            EntityType::PurchaseRequest => via::<PurchaseRequestStatus>(unified_raw, fallback),
            EntityType::PurchaseOrder => via::<PurchaseOrderStatus>(unified_raw, fallback),
            EntityType::Shipment => via::<ShipmentStatus>(unified_raw, fallback),
            EntityType::GoodsReceipt => via::<GrnStatus>(unified_raw, fallback),
            EntityType::Invoice => via::<InvoiceStatus>(unified_raw, fallback),
        }
    }

    /// One-shot read-path lookup of the unified token for a raw legacy
    /// token.
    ///
    /// GRN is keyed on its coarse `status` component; a single token
    /// cannot carry the approval field, so the approval-lag shape is
    /// only visible to the pair-aware [`StatusMapper::legacy_to_unified`].
    #[must_use]
    pub fn unified_status_from_legacy(
        entity: EntityType,
        legacy_raw: &str,
        fallback: &str,
    ) -> String {
        fn via<S>(raw: &str, fallback: &str) -> String
        where
            S: UnifiedStatus,
            S::Legacy: for<'a> From<&'a str>,
        {
            S::from_legacy(&S::Legacy::from(raw))
                .map_or_else(|| fallback.to_string(), |status| status.to_string())
        }

        match entity {
            EntityType::Order => via::<OrderStatus>(legacy_raw, fallback),
            EntityType::PurchaseRequest => via::<PurchaseRequestStatus>(legacy_raw, fallback),
            EntityType::PurchaseOrder => via::<PurchaseOrderStatus>(legacy_raw, fallback),
            EntityType::Shipment => via::<ShipmentStatus>(legacy_raw, fallback),
            EntityType::GoodsReceipt => {
                let pair = LegacyGrnStatus::new(
                    GrnRecordStatus::parse(legacy_raw),
                    GrnApprovalStatus::Pending,
                );
                GrnStatus::from_legacy(&pair)
                    .map_or_else(|| fallback.to_string(), |status| status.to_string())
            }
            EntityType::Invoice => via::<InvoiceStatus>(legacy_raw, fallback),
        }
    }
}
