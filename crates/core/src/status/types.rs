//! Domain types shared by the status migration engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// JSON merge document applied to an entity record by the caller.
///
/// Both the legacy-side and unified-side payloads produced by the
/// engine use this shape; the persistence layer merges the fields into
/// the entity document in a single atomic update.
pub type UpdateDocument = serde_json::Map<String, Value>;

/// Actor recorded on updates when the caller supplies none.
pub const DEFAULT_ACTOR: &str = "dual-write-wrapper";

/// The six entity domains under status governance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// Customer order.
    #[serde(rename = "ORDER")]
    Order,
    /// Purchase request (PR).
    #[serde(rename = "PURCHASE_REQUEST")]
    PurchaseRequest,
    /// Purchase order (PO).
    #[serde(rename = "PURCHASE_ORDER")]
    PurchaseOrder,
    /// Outbound or inbound shipment.
    #[serde(rename = "SHIPMENT")]
    Shipment,
    /// Goods receipt note (GRN).
    #[serde(rename = "GOODS_RECEIPT_NOTE")]
    GoodsReceipt,
    /// Vendor invoice.
    #[serde(rename = "INVOICE")]
    Invoice,
}

impl EntityType {
    /// All governed entity types.
    pub const ALL: [Self; 6] = [
        Self::Order,
        Self::PurchaseRequest,
        Self::PurchaseOrder,
        Self::Shipment,
        Self::GoodsReceipt,
        Self::Invoice,
    ];

    /// Returns the wire token for this entity type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Order => "ORDER",
            Self::PurchaseRequest => "PURCHASE_REQUEST",
            Self::PurchaseOrder => "PURCHASE_ORDER",
            Self::Shipment => "SHIPMENT",
            Self::GoodsReceipt => "GOODS_RECEIPT_NOTE",
            Self::Invoice => "INVOICE",
        }
    }

    /// Parses an entity type from its wire token.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ORDER" => Some(Self::Order),
            "PURCHASE_REQUEST" => Some(Self::PurchaseRequest),
            "PURCHASE_ORDER" => Some(Self::PurchaseOrder),
            "SHIPMENT" => Some(Self::Shipment),
            "GOODS_RECEIPT_NOTE" => Some(Self::GoodsReceipt),
            "INVOICE" => Some(Self::Invoice),
            _ => None,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller-supplied metadata accompanying a status change request.
#[derive(Debug, Clone, Default)]
pub struct StatusUpdateContext {
    /// Actor identity recorded on the update and the audit entry.
    pub updated_by: Option<String>,
    /// Free-text reason for the change.
    pub reason: Option<String>,
    /// Subsystem the request originated from.
    pub source: Option<String>,
    /// Open key/value bag for entity-specific side fields
    /// (`rejectionReason`, `deliveredDate`, `failureReason`, ...).
    pub metadata: UpdateDocument,
}

impl StatusUpdateContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context with only the actor set.
    #[must_use]
    pub fn by(updated_by: impl Into<String>) -> Self {
        Self {
            updated_by: Some(updated_by.into()),
            ..Self::default()
        }
    }

    /// The actor to record, defaulting to [`DEFAULT_ACTOR`].
    #[must_use]
    pub fn actor(&self) -> &str {
        self.updated_by.as_deref().unwrap_or(DEFAULT_ACTOR)
    }

    /// Returns a string-valued metadata entry, if present.
    #[must_use]
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_round_trip() {
        for entity in EntityType::ALL {
            assert_eq!(EntityType::parse(entity.as_str()), Some(entity));
        }
        assert_eq!(EntityType::parse("VENDOR"), None);
    }

    #[test]
    fn test_entity_type_serializes_as_token() {
        let json = serde_json::to_string(&EntityType::GoodsReceipt).unwrap();
        assert_eq!(json, "\"GOODS_RECEIPT_NOTE\"");
    }

    #[test]
    fn test_context_actor_defaults() {
        assert_eq!(StatusUpdateContext::new().actor(), DEFAULT_ACTOR);
        assert_eq!(StatusUpdateContext::by("alice").actor(), "alice");
    }

    #[test]
    fn test_context_metadata_str() {
        let mut ctx = StatusUpdateContext::new();
        ctx.metadata
            .insert("failureReason".into(), Value::String("damaged".into()));
        ctx.metadata.insert("attempts".into(), Value::from(3));
        assert_eq!(ctx.metadata_str("failureReason"), Some("damaged"));
        assert_eq!(ctx.metadata_str("attempts"), None);
        assert_eq!(ctx.metadata_str("missing"), None);
    }
}
