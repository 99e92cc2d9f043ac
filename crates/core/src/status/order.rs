//! Order status vocabulary and transition rules.

use serde_json::Value;

use crate::status::types::{EntityType, UpdateDocument};
use crate::status::vocabulary::{LegacyStatus, UnifiedStatus, status_tokens};

status_tokens! {
    /// Unified order status.
    ///
    /// Progression: `CREATED → PENDING_APPROVAL → APPROVED →
    /// IN_FULFILMENT → DISPATCHED → DELIVERED`, with `CANCELLED`
    /// reachable from every non-terminal state.
    OrderStatus {
        /// Order captured, not yet routed for approval.
        Created => "CREATED",
        /// Waiting for an approver.
        PendingApproval => "PENDING_APPROVAL",
        /// Approved and ready for fulfilment.
        Approved => "APPROVED",
        /// Being picked and packed.
        InFulfilment => "IN_FULFILMENT",
        /// Handed to the courier.
        Dispatched => "DISPATCHED",
        /// Received by the customer.
        Delivered => "DELIVERED",
        /// Cancelled before delivery.
        Cancelled => "CANCELLED",
    }
}

status_tokens! {
    /// Legacy order status, stored in the record's `status` field.
    ///
    /// Coarser than the unified vocabulary: the legacy model never
    /// distinguished approval routing from capture.
    LegacyOrderStatus {
        /// Order captured or awaiting approval.
        Placed => "Order placed",
        /// Order approved.
        Confirmed => "Confirmed",
        /// In the fulfilment pipeline.
        AwaitingFulfilment => "Awaiting fulfilment",
        /// Handed to the courier.
        Dispatched => "Dispatched",
        /// Received by the customer.
        Delivered => "Delivered",
        /// Cancelled.
        Cancelled => "Cancelled",
    }
}

impl LegacyStatus for LegacyOrderStatus {
    fn write_to(&self, doc: &mut UpdateDocument) {
        doc.insert("status".to_string(), Value::String(self.as_str().to_string()));
    }

    fn to_audit_value(&self) -> Value {
        Value::String(self.as_str().to_string())
    }

    fn fallback_default() -> Self {
        Self::Placed
    }
}

impl UnifiedStatus for OrderStatus {
    type Legacy = LegacyOrderStatus;

    const ENTITY: EntityType = EntityType::Order;

    // Orders predate the per-entity infix convention; the bare field
    // name is load-bearing for existing readers.
    const UNIFIED_FIELD: &'static str = "unified_status";

    const INITIAL: Self = Self::Created;

    const KNOWN: &'static [Self] = &[
        Self::Created,
        Self::PendingApproval,
        Self::Approved,
        Self::InFulfilment,
        Self::Dispatched,
        Self::Delivered,
        Self::Cancelled,
    ];

    fn transitions(&self) -> Option<&'static [Self]> {
        let next: &'static [Self] = match self {
            Self::Created => &[Self::PendingApproval, Self::Cancelled],
            Self::PendingApproval => &[Self::Approved, Self::Cancelled],
            Self::Approved => &[Self::InFulfilment, Self::Cancelled],
            Self::InFulfilment => &[Self::Dispatched, Self::Cancelled],
            Self::Dispatched => &[Self::Delivered, Self::Cancelled],
            Self::Delivered | Self::Cancelled => &[],
            Self::Unrecognized(_) => return None,
        };
        Some(next)
    }

    fn to_legacy(&self) -> Option<Self::Legacy> {
        match self {
            Self::Created | Self::PendingApproval => Some(LegacyOrderStatus::Placed),
            Self::Approved => Some(LegacyOrderStatus::Confirmed),
            Self::InFulfilment => Some(LegacyOrderStatus::AwaitingFulfilment),
            Self::Dispatched => Some(LegacyOrderStatus::Dispatched),
            Self::Delivered => Some(LegacyOrderStatus::Delivered),
            Self::Cancelled => Some(LegacyOrderStatus::Cancelled),
            Self::Unrecognized(_) => None,
        }
    }

    fn from_legacy(legacy: &Self::Legacy) -> Option<Self> {
        match legacy {
            LegacyOrderStatus::Placed => Some(Self::Created),
            LegacyOrderStatus::Confirmed => Some(Self::Approved),
            LegacyOrderStatus::AwaitingFulfilment => Some(Self::InFulfilment),
            LegacyOrderStatus::Dispatched => Some(Self::Dispatched),
            LegacyOrderStatus::Delivered => Some(Self::Delivered),
            LegacyOrderStatus::Cancelled => Some(Self::Cancelled),
            LegacyOrderStatus::Unrecognized(_) => None,
        }
    }
}
