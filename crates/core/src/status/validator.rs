//! Forward-only transition validation.
//!
//! Validity is a return value, never an error: during a live migration
//! the validator must not become an availability hazard, so unknown
//! current statuses fall back to permissive with a warning and the
//! caller decides what an invalid result means under its deployment
//! policy.

use serde::{Deserialize, Serialize};

use crate::status::vocabulary::UnifiedStatus;

/// Outcome of validating one transition request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the transition is legal.
    pub valid: bool,
    /// Why the transition was rejected; present iff `valid` is false.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<String>,
    /// Non-fatal notes (unchanged status, permissive fallbacks).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// A clean pass.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
            warnings: Vec::new(),
        }
    }

    /// A pass with a non-fatal note attached.
    #[must_use]
    pub fn ok_with_warning(warning: impl Into<String>) -> Self {
        Self {
            valid: true,
            reason: None,
            warnings: vec![warning.into()],
        }
    }

    /// A rejection with its classification.
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
            warnings: Vec::new(),
        }
    }
}

/// Stateless transition validator over the per-entity rule tables.
pub struct TransitionValidator;

impl TransitionValidator {
    /// Validates a requested unified-status transition.
    ///
    /// `current` is `None` for a record that has never carried a
    /// unified status; any target is then legal. Rejections classify
    /// the failure as a backwards move, a skip over intermediate
    /// states, or an unknown target token.
    #[must_use]
    pub fn validate<S: UnifiedStatus>(current: Option<&S>, requested: &S) -> ValidationResult {
        let Some(current) = current else {
            return ValidationResult::ok();
        };

        if current == requested {
            return ValidationResult::ok_with_warning(format!(
                "{} status unchanged at {requested}",
                S::ENTITY
            ));
        }

        let Some(allowed) = current.transitions() else {
            return ValidationResult::ok_with_warning(format!(
                "Unknown current {} status \"{current}\"; transition allowed permissively",
                S::ENTITY
            ));
        };

        if allowed.contains(requested) {
            return ValidationResult::ok();
        }

        let Some(target_position) = requested.position() else {
            return ValidationResult::invalid(format!(
                "Unknown target status \"{requested}\" for {}",
                S::ENTITY
            ));
        };

        // `transitions` returned a table entry, so `current` is known.
        let current_position = current.position().unwrap_or_default();

        if target_position < current_position {
            return ValidationResult::invalid(format!(
                "Backwards transition from {current} to {requested} is not allowed for {}",
                S::ENTITY
            ));
        }

        if allowed.is_empty() {
            return ValidationResult::invalid(format!(
                "Invalid transition: {current} is a terminal {} status",
                S::ENTITY
            ));
        }

        let allowed_list = allowed
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        ValidationResult::invalid(format!(
            "Status skipping from {current} to {requested} is not allowed for {}; \
             allowed transitions: {allowed_list}",
            S::ENTITY
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::goods_receipt::GrnStatus;
    use crate::status::invoice::InvoiceStatus;
    use crate::status::order::OrderStatus;
    use crate::status::shipment::ShipmentStatus;

    #[test]
    fn test_new_record_accepts_any_status() {
        let result = TransitionValidator::validate(None, &OrderStatus::Delivered);
        assert!(result.valid);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_unchanged_status_warns() {
        let result = TransitionValidator::validate(
            Some(&OrderStatus::Approved),
            &OrderStatus::Approved,
        );
        assert!(result.valid);
        assert!(result.warnings[0].contains("unchanged"));
    }

    #[test]
    fn test_unknown_current_is_permissive() {
        let drifted = OrderStatus::parse("ON_HOLD");
        let result = TransitionValidator::validate(Some(&drifted), &OrderStatus::Dispatched);
        assert!(result.valid);
        assert!(result.warnings[0].contains("permissively"));
    }

    #[test]
    fn test_forward_step_is_valid() {
        let result = TransitionValidator::validate(
            Some(&OrderStatus::Approved),
            &OrderStatus::InFulfilment,
        );
        assert!(result.valid);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_backwards_transition_rejected() {
        let result = TransitionValidator::validate(
            Some(&OrderStatus::Delivered),
            &OrderStatus::Dispatched,
        );
        assert!(!result.valid);
        assert!(result.reason.unwrap().contains("Backwards transition"));
    }

    #[test]
    fn test_terminal_status_admits_nothing() {
        let result = TransitionValidator::validate(
            Some(&OrderStatus::Delivered),
            &OrderStatus::Cancelled,
        );
        assert!(!result.valid);
        assert!(result.reason.unwrap().contains("Invalid transition"));
    }

    #[test]
    fn test_skipping_lists_allowed_set() {
        let result = TransitionValidator::validate(
            Some(&OrderStatus::Created),
            &OrderStatus::Dispatched,
        );
        assert!(!result.valid);
        let reason = result.reason.unwrap();
        assert!(reason.contains("Status skipping"));
        assert!(reason.contains("PENDING_APPROVAL"));
        assert!(reason.contains("CANCELLED"));
    }

    #[test]
    fn test_unknown_target_rejected() {
        let result = TransitionValidator::validate(
            Some(&ShipmentStatus::InTransit),
            &ShipmentStatus::parse("CLOSED"),
        );
        assert!(!result.valid);
        assert!(result.reason.unwrap().contains("Unknown target status"));
    }

    #[test]
    fn test_invoice_dispute_cycle_is_legal() {
        let result = TransitionValidator::validate(
            Some(&InvoiceStatus::Disputed),
            &InvoiceStatus::Raised,
        );
        assert!(result.valid);
    }

    #[test]
    fn test_approved_invoice_cannot_enter_dispute() {
        let result = TransitionValidator::validate(
            Some(&InvoiceStatus::Approved),
            &InvoiceStatus::Disputed,
        );
        assert!(!result.valid);

        let forward = TransitionValidator::validate(
            Some(&InvoiceStatus::Approved),
            &InvoiceStatus::Paid,
        );
        assert!(forward.valid);
    }

    #[test]
    fn test_grn_may_skip_the_approval_queue() {
        let result =
            TransitionValidator::validate(Some(&GrnStatus::Raised), &GrnStatus::Approved);
        assert!(result.valid);
    }
}
