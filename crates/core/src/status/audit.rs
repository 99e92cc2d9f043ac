//! Append-only audit trail records for status changes.
//!
//! One entry is written per transition attempt, including attempts
//! that fail validation, and is never modified or deleted afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use procura_shared::types::AuditEntryId;

use crate::status::types::{EntityType, UpdateDocument};

/// Action kinds recorded in the status audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    /// Caller-requested status transition.
    #[serde(rename = "STATUS_UPDATE")]
    StatusUpdate,
    /// One-time unified-side seeding from a legacy value.
    #[serde(rename = "STATUS_SYNC")]
    StatusSync,
    /// Manual repair of drifted status data by operations.
    #[serde(rename = "STATUS_REPAIR")]
    StatusRepair,
}

impl AuditAction {
    /// Returns the wire token for this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StatusUpdate => "STATUS_UPDATE",
            Self::StatusSync => "STATUS_SYNC",
            Self::StatusRepair => "STATUS_REPAIR",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One immutable record of an attempted status change.
///
/// Legacy statuses are JSON values rather than strings because GRN's
/// legacy status is a two-field object; absent prior values are `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Entry identifier.
    pub id: AuditEntryId,
    /// Entity domain the change belongs to.
    pub entity_type: EntityType,
    /// Identifier of the affected record.
    pub entity_id: String,
    /// What kind of change was attempted.
    pub action: AuditAction,
    /// Legacy status before the change (`null` if unknown).
    pub previous_legacy_status: Value,
    /// Legacy status being written.
    pub new_legacy_status: Value,
    /// Unified status before the change (`null` if never set).
    pub previous_unified_status: Value,
    /// Unified status being written.
    pub new_unified_status: Value,
    /// Subsystem the request originated from.
    pub source: String,
    /// Actor recorded for the change.
    pub performed_by: String,
    /// When the change was prepared.
    pub performed_at: DateTime<Utc>,
    /// Caller metadata plus the validation outcome.
    pub metadata: UpdateDocument,
}
