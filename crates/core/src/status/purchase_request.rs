//! Purchase request status vocabulary and transition rules.

use serde_json::Value;

use crate::status::types::{EntityType, UpdateDocument};
use crate::status::vocabulary::{LegacyStatus, UnifiedStatus, status_tokens};

status_tokens! {
    /// Unified purchase request status.
    ///
    /// Linear approval chain; `REJECTED` is terminal from either
    /// approval-pending state. Re-submission creates a new request
    /// rather than reviving a rejected one.
    PurchaseRequestStatus {
        /// Being drafted by the requester.
        Draft => "DRAFT",
        /// Submitted for review.
        Submitted => "SUBMITTED",
        /// With the reviewing buyer.
        UnderReview => "UNDER_REVIEW",
        /// Waiting for budget-holder approval.
        PendingApproval => "PENDING_APPROVAL",
        /// Approved for conversion.
        Approved => "APPROVED",
        /// Converted into a purchase order.
        ConvertedToPo => "CONVERTED_TO_PO",
        /// Rejected during review or approval.
        Rejected => "REJECTED",
    }
}

status_tokens! {
    /// Legacy purchase request status, stored in `pr_status`.
    LegacyPurchaseRequestStatus {
        /// Being drafted.
        Draft => "DRAFT",
        /// Submitted for review.
        Submitted => "SUBMITTED",
        /// Somewhere in the review/approval chain.
        InApproval => "IN_APPROVAL",
        /// Approved.
        Approved => "APPROVED",
        /// Rejected.
        Rejected => "REJECTED",
        /// Converted and closed out.
        Closed => "CLOSED",
    }
}

impl LegacyStatus for LegacyPurchaseRequestStatus {
    fn write_to(&self, doc: &mut UpdateDocument) {
        doc.insert(
            "pr_status".to_string(),
            Value::String(self.as_str().to_string()),
        );
    }

    fn to_audit_value(&self) -> Value {
        Value::String(self.as_str().to_string())
    }

    fn fallback_default() -> Self {
        Self::Draft
    }
}

impl UnifiedStatus for PurchaseRequestStatus {
    type Legacy = LegacyPurchaseRequestStatus;

    const ENTITY: EntityType = EntityType::PurchaseRequest;

    const UNIFIED_FIELD: &'static str = "unified_pr_status";

    const INITIAL: Self = Self::Draft;

    const KNOWN: &'static [Self] = &[
        Self::Draft,
        Self::Submitted,
        Self::UnderReview,
        Self::PendingApproval,
        Self::Approved,
        Self::ConvertedToPo,
        Self::Rejected,
    ];

    fn transitions(&self) -> Option<&'static [Self]> {
        let next: &'static [Self] = match self {
            Self::Draft => &[Self::Submitted],
            Self::Submitted => &[Self::UnderReview],
            Self::UnderReview => &[Self::PendingApproval, Self::Rejected],
            Self::PendingApproval => &[Self::Approved, Self::Rejected],
            Self::Approved => &[Self::ConvertedToPo],
            Self::ConvertedToPo | Self::Rejected => &[],
            Self::Unrecognized(_) => return None,
        };
        Some(next)
    }

    fn to_legacy(&self) -> Option<Self::Legacy> {
        match self {
            Self::Draft => Some(LegacyPurchaseRequestStatus::Draft),
            Self::Submitted => Some(LegacyPurchaseRequestStatus::Submitted),
            Self::UnderReview | Self::PendingApproval => {
                Some(LegacyPurchaseRequestStatus::InApproval)
            }
            Self::Approved => Some(LegacyPurchaseRequestStatus::Approved),
            Self::ConvertedToPo => Some(LegacyPurchaseRequestStatus::Closed),
            Self::Rejected => Some(LegacyPurchaseRequestStatus::Rejected),
            Self::Unrecognized(_) => None,
        }
    }

    fn from_legacy(legacy: &Self::Legacy) -> Option<Self> {
        match legacy {
            LegacyPurchaseRequestStatus::Draft => Some(Self::Draft),
            LegacyPurchaseRequestStatus::Submitted => Some(Self::Submitted),
            LegacyPurchaseRequestStatus::InApproval => Some(Self::UnderReview),
            LegacyPurchaseRequestStatus::Approved => Some(Self::Approved),
            LegacyPurchaseRequestStatus::Rejected => Some(Self::Rejected),
            LegacyPurchaseRequestStatus::Closed => Some(Self::ConvertedToPo),
            LegacyPurchaseRequestStatus::Unrecognized(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_reachable_from_both_approval_states() {
        for status in [
            PurchaseRequestStatus::UnderReview,
            PurchaseRequestStatus::PendingApproval,
        ] {
            let next = status.transitions().unwrap();
            assert!(next.contains(&PurchaseRequestStatus::Rejected));
        }
    }

    #[test]
    fn test_rejected_is_terminal() {
        assert!(PurchaseRequestStatus::Rejected.is_terminal());
        assert!(PurchaseRequestStatus::ConvertedToPo.is_terminal());
    }

    #[test]
    fn test_draft_cannot_be_rejected_directly() {
        let next = PurchaseRequestStatus::Draft.transitions().unwrap();
        assert!(!next.contains(&PurchaseRequestStatus::Rejected));
    }

    #[test]
    fn test_approval_chain_collapses_into_in_approval() {
        assert_eq!(
            PurchaseRequestStatus::UnderReview.to_legacy(),
            Some(LegacyPurchaseRequestStatus::InApproval)
        );
        assert_eq!(
            PurchaseRequestStatus::PendingApproval.to_legacy(),
            Some(LegacyPurchaseRequestStatus::InApproval)
        );
    }

    #[test]
    fn test_legacy_writes_pr_status_field() {
        let mut doc = UpdateDocument::new();
        LegacyPurchaseRequestStatus::Draft.write_to(&mut doc);
        assert_eq!(doc.get("pr_status").and_then(Value::as_str), Some("DRAFT"));
    }

    #[test]
    fn test_conversion_closes_legacy_record() {
        assert_eq!(
            PurchaseRequestStatus::ConvertedToPo.to_legacy(),
            Some(LegacyPurchaseRequestStatus::Closed)
        );
        assert_eq!(
            PurchaseRequestStatus::from_legacy(&LegacyPurchaseRequestStatus::Closed),
            Some(PurchaseRequestStatus::ConvertedToPo)
        );
    }
}
