//! Shipment status vocabulary and transition rules.

use serde_json::Value;

use crate::status::types::{EntityType, UpdateDocument};
use crate::status::vocabulary::{LegacyStatus, UnifiedStatus, status_tokens};

status_tokens! {
    /// Unified shipment status.
    ///
    /// Courier lifecycle with the richest branching of the six
    /// entities: `FAILED` is reachable from every active state and can
    /// itself move to `RETURNED`; `LOST` is declared from transit.
    ShipmentStatus {
        /// Shipment record created.
        Created => "CREATED",
        /// Courier pickup booked.
        PickupScheduled => "PICKUP_SCHEDULED",
        /// Collected by the courier.
        PickedUp => "PICKED_UP",
        /// Moving through the network.
        InTransit => "IN_TRANSIT",
        /// On the last-mile vehicle.
        OutForDelivery => "OUT_FOR_DELIVERY",
        /// Delivered to the consignee.
        Delivered => "DELIVERED",
        /// Delivery attempt failed.
        Failed => "FAILED",
        /// Declared lost in the network.
        Lost => "LOST",
        /// Returned to the sender.
        Returned => "RETURNED",
    }
}

status_tokens! {
    /// Legacy shipment status, stored in the record's `status` field.
    LegacyShipmentStatus {
        /// Not yet with the courier.
        Preparing => "Preparing",
        /// Somewhere between pickup and delivery.
        InTransit => "In transit",
        /// Delivered.
        Delivered => "Delivered",
        /// Failed or lost.
        Failed => "Failed",
        /// Returned to sender.
        Returned => "Returned",
    }
}

impl LegacyStatus for LegacyShipmentStatus {
    fn write_to(&self, doc: &mut UpdateDocument) {
        doc.insert("status".to_string(), Value::String(self.as_str().to_string()));
    }

    fn to_audit_value(&self) -> Value {
        Value::String(self.as_str().to_string())
    }

    fn fallback_default() -> Self {
        Self::Preparing
    }
}

impl UnifiedStatus for ShipmentStatus {
    type Legacy = LegacyShipmentStatus;

    const ENTITY: EntityType = EntityType::Shipment;

    const UNIFIED_FIELD: &'static str = "unified_shipment_status";

    const INITIAL: Self = Self::Created;

    const KNOWN: &'static [Self] = &[
        Self::Created,
        Self::PickupScheduled,
        Self::PickedUp,
        Self::InTransit,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Failed,
        Self::Lost,
        Self::Returned,
    ];

    fn transitions(&self) -> Option<&'static [Self]> {
        let next: &'static [Self] = match self {
            Self::Created => &[Self::PickupScheduled],
            Self::PickupScheduled => &[Self::PickedUp, Self::Failed],
            Self::PickedUp => &[Self::InTransit, Self::Failed],
            Self::InTransit => &[Self::OutForDelivery, Self::Failed, Self::Lost],
            Self::OutForDelivery => &[Self::Delivered, Self::Failed],
            Self::Failed => &[Self::Returned],
            Self::Delivered | Self::Lost | Self::Returned => &[],
            Self::Unrecognized(_) => return None,
        };
        Some(next)
    }

    fn to_legacy(&self) -> Option<Self::Legacy> {
        match self {
            Self::Created | Self::PickupScheduled => Some(LegacyShipmentStatus::Preparing),
            Self::PickedUp | Self::InTransit | Self::OutForDelivery => {
                Some(LegacyShipmentStatus::InTransit)
            }
            Self::Delivered => Some(LegacyShipmentStatus::Delivered),
            Self::Failed | Self::Lost => Some(LegacyShipmentStatus::Failed),
            Self::Returned => Some(LegacyShipmentStatus::Returned),
            Self::Unrecognized(_) => None,
        }
    }

    fn from_legacy(legacy: &Self::Legacy) -> Option<Self> {
        match legacy {
            LegacyShipmentStatus::Preparing => Some(Self::Created),
            LegacyShipmentStatus::InTransit => Some(Self::InTransit),
            LegacyShipmentStatus::Delivered => Some(Self::Delivered),
            LegacyShipmentStatus::Failed => Some(Self::Failed),
            LegacyShipmentStatus::Returned => Some(Self::Returned),
            LegacyShipmentStatus::Unrecognized(_) => None,
        }
    }
}
