//! Goods receipt note status vocabulary and transition rules.
//!
//! GRN is the odd one out on the legacy side: its status was spread
//! across two record fields, a coarse lifecycle `status` and an
//! approval-oriented `grnStatus`. The pair is modeled as one type so
//! the two fields cannot be updated independently.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::status::types::{EntityType, UpdateDocument};
use crate::status::vocabulary::{LegacyStatus, UnifiedStatus, status_tokens};

status_tokens! {
    /// Unified goods receipt note status.
    ///
    /// Short chain `DRAFT → RAISED → (PENDING_APPROVAL →) APPROVED →
    /// INVOICED → CLOSED`; small receipts skip the explicit approval
    /// queue and go straight from `RAISED` to `APPROVED`.
    GrnStatus {
        /// Being drafted at the receiving dock.
        Draft => "DRAFT",
        /// Raised against a purchase order.
        Raised => "RAISED",
        /// Queued for approval.
        PendingApproval => "PENDING_APPROVAL",
        /// Approved by the receiving manager.
        Approved => "APPROVED",
        /// Matched to a vendor invoice.
        Invoiced => "INVOICED",
        /// Closed out.
        Closed => "CLOSED",
    }
}

status_tokens! {
    /// Coarse lifecycle component of the legacy GRN status (`status`).
    GrnRecordStatus {
        /// Being drafted.
        Draft => "DRAFT",
        /// Raised.
        Raised => "RAISED",
        /// Acknowledged by the receiving manager.
        Acknowledged => "ACKNOWLEDGED",
        /// Matched to an invoice.
        Invoiced => "INVOICED",
        /// Closed.
        Closed => "CLOSED",
    }
}

status_tokens! {
    /// Approval component of the legacy GRN status (`grnStatus`).
    GrnApprovalStatus {
        /// Not yet approved.
        Pending => "PENDING",
        /// Approved.
        Approved => "APPROVED",
    }
}

/// The legacy GRN status pair.
///
/// Both components always change together; callers merge both fields
/// into the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyGrnStatus {
    /// Coarse lifecycle component, stored in `status`.
    pub status: GrnRecordStatus,
    /// Approval component, stored in `grnStatus`.
    #[serde(rename = "grnStatus")]
    pub grn_status: GrnApprovalStatus,
}

impl LegacyGrnStatus {
    /// Creates a pair from its two components.
    #[must_use]
    pub const fn new(status: GrnRecordStatus, grn_status: GrnApprovalStatus) -> Self {
        Self { status, grn_status }
    }
}

impl LegacyStatus for LegacyGrnStatus {
    fn write_to(&self, doc: &mut UpdateDocument) {
        doc.insert(
            "status".to_string(),
            Value::String(self.status.as_str().to_string()),
        );
        doc.insert(
            "grnStatus".to_string(),
            Value::String(self.grn_status.as_str().to_string()),
        );
    }

    fn to_audit_value(&self) -> Value {
        json!({
            "status": self.status.as_str(),
            "grnStatus": self.grn_status.as_str(),
        })
    }

    fn fallback_default() -> Self {
        Self::new(GrnRecordStatus::Draft, GrnApprovalStatus::Pending)
    }
}

impl UnifiedStatus for GrnStatus {
    type Legacy = LegacyGrnStatus;

    const ENTITY: EntityType = EntityType::GoodsReceipt;

    const UNIFIED_FIELD: &'static str = "unified_grn_status";

    const INITIAL: Self = Self::Draft;

    const KNOWN: &'static [Self] = &[
        Self::Draft,
        Self::Raised,
        Self::PendingApproval,
        Self::Approved,
        Self::Invoiced,
        Self::Closed,
    ];

    fn transitions(&self) -> Option<&'static [Self]> {
        let next: &'static [Self] = match self {
            Self::Draft => &[Self::Raised],
            Self::Raised => &[Self::PendingApproval, Self::Approved],
            Self::PendingApproval => &[Self::Approved],
            Self::Approved => &[Self::Invoiced],
            Self::Invoiced => &[Self::Closed],
            Self::Closed => &[],
            Self::Unrecognized(_) => return None,
        };
        Some(next)
    }

    fn to_legacy(&self) -> Option<Self::Legacy> {
        let pair = match self {
            Self::Draft => (GrnRecordStatus::Draft, GrnApprovalStatus::Pending),
            Self::Raised | Self::PendingApproval => {
                (GrnRecordStatus::Raised, GrnApprovalStatus::Pending)
            }
            Self::Approved => (GrnRecordStatus::Acknowledged, GrnApprovalStatus::Approved),
            Self::Invoiced => (GrnRecordStatus::Invoiced, GrnApprovalStatus::Approved),
            Self::Closed => (GrnRecordStatus::Closed, GrnApprovalStatus::Approved),
            Self::Unrecognized(_) => return None,
        };
        Some(LegacyGrnStatus::new(pair.0, pair.1))
    }

    fn from_legacy(legacy: &Self::Legacy) -> Option<Self> {
        match (&legacy.status, &legacy.grn_status) {
            (GrnRecordStatus::Unrecognized(_), _) | (_, GrnApprovalStatus::Unrecognized(_)) => None,
            (GrnRecordStatus::Draft, _) => Some(Self::Draft),
            (GrnRecordStatus::Raised, GrnApprovalStatus::Pending) => Some(Self::Raised),
            // Approval recorded while the coarse field lagged behind.
            (GrnRecordStatus::Raised, GrnApprovalStatus::Approved)
            | (GrnRecordStatus::Acknowledged, _) => Some(Self::Approved),
            (GrnRecordStatus::Invoiced, _) => Some(Self::Invoiced),
            (GrnRecordStatus::Closed, _) => Some(Self::Closed),
        }
    }
}
