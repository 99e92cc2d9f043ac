//! Purchase order status vocabulary and transition rules.

use serde_json::Value;

use crate::status::types::{EntityType, UpdateDocument};
use crate::status::vocabulary::{LegacyStatus, UnifiedStatus, status_tokens};

status_tokens! {
    /// Unified purchase order status.
    ///
    /// Supports partial-shipment/partial-delivery branching: both
    /// shipped states converge toward the delivered states before the
    /// order is closed.
    PurchaseOrderStatus {
        /// Being drafted by the buyer.
        Draft => "DRAFT",
        /// Issued to the vendor.
        Issued => "ISSUED",
        /// Acknowledged by the vendor.
        Acknowledged => "ACKNOWLEDGED",
        /// Some lines shipped.
        PartiallyShipped => "PARTIALLY_SHIPPED",
        /// All lines shipped.
        FullyShipped => "FULLY_SHIPPED",
        /// Some lines received.
        PartiallyDelivered => "PARTIALLY_DELIVERED",
        /// All lines received.
        FullyDelivered => "FULLY_DELIVERED",
        /// Closed out.
        Closed => "CLOSED",
        /// Cancelled before any shipment.
        Cancelled => "CANCELLED",
    }
}

status_tokens! {
    /// Legacy purchase order status, stored in `po_status`.
    ///
    /// The legacy model tracked no shipment granularity at all.
    LegacyPurchaseOrderStatus {
        /// Not yet in motion with the vendor.
        Open => "OPEN",
        /// Shipping or receiving underway.
        InProgress => "IN_PROGRESS",
        /// Fully received or closed.
        Completed => "COMPLETED",
        /// Cancelled.
        Cancelled => "CANCELLED",
    }
}

impl LegacyStatus for LegacyPurchaseOrderStatus {
    fn write_to(&self, doc: &mut UpdateDocument) {
        doc.insert(
            "po_status".to_string(),
            Value::String(self.as_str().to_string()),
        );
    }

    fn to_audit_value(&self) -> Value {
        Value::String(self.as_str().to_string())
    }

    fn fallback_default() -> Self {
        Self::Open
    }
}

impl UnifiedStatus for PurchaseOrderStatus {
    type Legacy = LegacyPurchaseOrderStatus;

    const ENTITY: EntityType = EntityType::PurchaseOrder;

    const UNIFIED_FIELD: &'static str = "unified_po_status";

    const INITIAL: Self = Self::Draft;

    const KNOWN: &'static [Self] = &[
        Self::Draft,
        Self::Issued,
        Self::Acknowledged,
        Self::PartiallyShipped,
        Self::FullyShipped,
        Self::PartiallyDelivered,
        Self::FullyDelivered,
        Self::Closed,
        Self::Cancelled,
    ];

    fn transitions(&self) -> Option<&'static [Self]> {
        let next: &'static [Self] = match self {
            Self::Draft => &[Self::Issued, Self::Cancelled],
            Self::Issued => &[Self::Acknowledged, Self::Cancelled],
            Self::Acknowledged => &[
                Self::PartiallyShipped,
                Self::FullyShipped,
                Self::Cancelled,
            ],
            Self::PartiallyShipped => &[Self::FullyShipped, Self::PartiallyDelivered],
            Self::FullyShipped => &[Self::PartiallyDelivered, Self::FullyDelivered],
            Self::PartiallyDelivered => &[Self::FullyDelivered],
            Self::FullyDelivered => &[Self::Closed],
            Self::Closed | Self::Cancelled => &[],
            Self::Unrecognized(_) => return None,
        };
        Some(next)
    }

    fn to_legacy(&self) -> Option<Self::Legacy> {
        match self {
            Self::Draft | Self::Issued | Self::Acknowledged => {
                Some(LegacyPurchaseOrderStatus::Open)
            }
            Self::PartiallyShipped | Self::FullyShipped | Self::PartiallyDelivered => {
                Some(LegacyPurchaseOrderStatus::InProgress)
            }
            Self::FullyDelivered | Self::Closed => Some(LegacyPurchaseOrderStatus::Completed),
            Self::Cancelled => Some(LegacyPurchaseOrderStatus::Cancelled),
            Self::Unrecognized(_) => None,
        }
    }

    fn from_legacy(legacy: &Self::Legacy) -> Option<Self> {
        match legacy {
            LegacyPurchaseOrderStatus::Open => Some(Self::Draft),
            LegacyPurchaseOrderStatus::InProgress => Some(Self::PartiallyShipped),
            LegacyPurchaseOrderStatus::Completed => Some(Self::FullyDelivered),
            LegacyPurchaseOrderStatus::Cancelled => Some(Self::Cancelled),
            LegacyPurchaseOrderStatus::Unrecognized(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_shipment_branches_converge() {
        let from_partial = PurchaseOrderStatus::PartiallyShipped.transitions().unwrap();
        assert!(from_partial.contains(&PurchaseOrderStatus::FullyShipped));
        assert!(from_partial.contains(&PurchaseOrderStatus::PartiallyDelivered));

        let from_full = PurchaseOrderStatus::FullyShipped.transitions().unwrap();
        assert!(from_full.contains(&PurchaseOrderStatus::FullyDelivered));
    }

    #[test]
    fn test_no_cancellation_after_shipment_starts() {
        for status in [
            PurchaseOrderStatus::PartiallyShipped,
            PurchaseOrderStatus::FullyShipped,
            PurchaseOrderStatus::PartiallyDelivered,
            PurchaseOrderStatus::FullyDelivered,
        ] {
            let next = status.transitions().unwrap();
            assert!(
                !next.contains(&PurchaseOrderStatus::Cancelled),
                "{status} should not be cancellable"
            );
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(PurchaseOrderStatus::Closed.is_terminal());
        assert!(PurchaseOrderStatus::Cancelled.is_terminal());
        assert!(!PurchaseOrderStatus::FullyDelivered.is_terminal());
    }

    #[test]
    fn test_legacy_collapses_shipment_granularity() {
        for status in [
            PurchaseOrderStatus::PartiallyShipped,
            PurchaseOrderStatus::FullyShipped,
            PurchaseOrderStatus::PartiallyDelivered,
        ] {
            assert_eq!(
                status.to_legacy(),
                Some(LegacyPurchaseOrderStatus::InProgress)
            );
        }
    }

    #[test]
    fn test_legacy_writes_po_status_field() {
        let mut doc = UpdateDocument::new();
        LegacyPurchaseOrderStatus::InProgress.write_to(&mut doc);
        assert_eq!(
            doc.get("po_status").and_then(Value::as_str),
            Some("IN_PROGRESS")
        );
    }
}
