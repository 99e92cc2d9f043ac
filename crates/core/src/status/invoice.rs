//! Invoice status vocabulary and transition rules.
//!
//! Invoices carry the one deliberate exception to the forward-only
//! policy: `DISPUTED → RAISED` re-enters the matching flow after a
//! dispute is resolved. Every other entity graph is a strict DAG; do
//! not generalize that assumption here.

use serde_json::Value;

use crate::status::types::{EntityType, UpdateDocument};
use crate::status::vocabulary::{LegacyStatus, UnifiedStatus, status_tokens};

status_tokens! {
    /// Unified invoice status.
    InvoiceStatus {
        /// Being drafted.
        Draft => "DRAFT",
        /// Raised by the vendor.
        Raised => "RAISED",
        /// Matched against PO and receipts.
        Matched => "MATCHED",
        /// Under dispute with the vendor.
        Disputed => "DISPUTED",
        /// Approved for payment.
        Approved => "APPROVED",
        /// Paid out.
        Paid => "PAID",
    }
}

status_tokens! {
    /// Legacy invoice status, stored in `invoice_status`.
    LegacyInvoiceStatus {
        /// Being drafted.
        Draft => "DRAFT",
        /// Raised or in matching.
        Pending => "PENDING",
        /// Disputed.
        OnHold => "ON_HOLD",
        /// Approved for payment.
        Approved => "APPROVED",
        /// Paid.
        Paid => "PAID",
    }
}

impl LegacyStatus for LegacyInvoiceStatus {
    fn write_to(&self, doc: &mut UpdateDocument) {
        doc.insert(
            "invoice_status".to_string(),
            Value::String(self.as_str().to_string()),
        );
    }

    fn to_audit_value(&self) -> Value {
        Value::String(self.as_str().to_string())
    }

    fn fallback_default() -> Self {
        Self::Pending
    }
}

impl UnifiedStatus for InvoiceStatus {
    type Legacy = LegacyInvoiceStatus;

    const ENTITY: EntityType = EntityType::Invoice;

    const UNIFIED_FIELD: &'static str = "unified_invoice_status";

    const INITIAL: Self = Self::Draft;

    const KNOWN: &'static [Self] = &[
        Self::Draft,
        Self::Raised,
        Self::Matched,
        Self::Disputed,
        Self::Approved,
        Self::Paid,
    ];

    fn transitions(&self) -> Option<&'static [Self]> {
        let next: &'static [Self] = match self {
            Self::Draft => &[Self::Raised],
            Self::Raised => &[Self::Matched, Self::Disputed],
            Self::Matched => &[Self::Approved, Self::Disputed],
            // Resolved disputes re-enter matching from the top.
            Self::Disputed => &[Self::Raised],
            Self::Approved => &[Self::Paid],
            Self::Paid => &[],
            Self::Unrecognized(_) => return None,
        };
        Some(next)
    }

    fn to_legacy(&self) -> Option<Self::Legacy> {
        match self {
            Self::Draft => Some(LegacyInvoiceStatus::Draft),
            Self::Raised | Self::Matched => Some(LegacyInvoiceStatus::Pending),
            Self::Disputed => Some(LegacyInvoiceStatus::OnHold),
            Self::Approved => Some(LegacyInvoiceStatus::Approved),
            Self::Paid => Some(LegacyInvoiceStatus::Paid),
            Self::Unrecognized(_) => None,
        }
    }

    fn from_legacy(legacy: &Self::Legacy) -> Option<Self> {
        match legacy {
            LegacyInvoiceStatus::Draft => Some(Self::Draft),
            LegacyInvoiceStatus::Pending => Some(Self::Raised),
            LegacyInvoiceStatus::OnHold => Some(Self::Disputed),
            LegacyInvoiceStatus::Approved => Some(Self::Approved),
            LegacyInvoiceStatus::Paid => Some(Self::Paid),
            LegacyInvoiceStatus::Unrecognized(_) => None,
        }
    }
}
