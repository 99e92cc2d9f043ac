//! Collaborator seams and the policy-applying update service.
//!
//! The engine itself performs no I/O; these traits are the two seams
//! the transport and persistence layers plug into. The in-memory
//! implementations back tests and local harnesses.

use std::collections::HashMap;
use std::sync::Mutex;

use procura_shared::{AppError, AppResult, EnforcementMode};

use crate::status::audit::AuditLogEntry;
use crate::status::prepare::DualWriteResult;
use crate::status::types::{EntityType, UpdateDocument};

/// Append-only store for the status audit trail.
///
/// Appends must be safe to retry independently of the record update.
pub trait AuditLogSink {
    /// Appends one entry to the trail.
    fn append(&self, entry: &AuditLogEntry) -> AppResult<()>;
}

/// Document store applying both payloads as one atomic merge.
///
/// Legacy and unified fields live on the same document, so native
/// single-document update atomicity suffices; no multi-document
/// transaction is required.
pub trait StatusDocumentStore {
    /// Merges both payloads into the entity's record atomically.
    fn apply_status_update(
        &self,
        entity_type: EntityType,
        entity_id: &str,
        legacy_update: &UpdateDocument,
        unified_update: &UpdateDocument,
    ) -> AppResult<()>;
}

/// In-memory audit trail for tests and local harnesses.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    entries: Mutex<Vec<AuditLogEntry>>,
}

impl MemoryAuditLog {
    /// Creates an empty trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all appended entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<AuditLogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl AuditLogSink for MemoryAuditLog {
    fn append(&self, entry: &AuditLogEntry) -> AppResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::AuditSink("audit log mutex poisoned".to_string()))?;
        entries.push(entry.clone());
        Ok(())
    }
}

/// In-memory document store for tests and local harnesses.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    records: Mutex<HashMap<(EntityType, String), UpdateDocument>>,
}

impl MemoryDocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of one record's merged fields.
    #[must_use]
    pub fn record(&self, entity_type: EntityType, entity_id: &str) -> Option<UpdateDocument> {
        self.records
            .lock()
            .ok()
            .and_then(|records| records.get(&(entity_type, entity_id.to_string())).cloned())
    }
}

impl StatusDocumentStore for MemoryDocumentStore {
    fn apply_status_update(
        &self,
        entity_type: EntityType,
        entity_id: &str,
        legacy_update: &UpdateDocument,
        unified_update: &UpdateDocument,
    ) -> AppResult<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| AppError::DocumentStore("document store mutex poisoned".to_string()))?;
        let record = records
            .entry((entity_type, entity_id.to_string()))
            .or_default();
        for (key, value) in legacy_update {
            record.insert(key.clone(), value.clone());
        }
        for (key, value) in unified_update {
            record.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}

/// Applies prepared dual-writes under the configured enforcement
/// policy.
///
/// This is the reference caller-side policy: strict deployments reject
/// invalid transitions, permissive deployments apply them with a
/// warning so historically-irregular data cannot block operations
/// mid-migration. Transports may reuse it or implement their own.
pub struct StatusUpdateService<'a, S, A> {
    store: &'a S,
    audit: &'a A,
    enforcement: EnforcementMode,
}

impl<'a, S: StatusDocumentStore, A: AuditLogSink> StatusUpdateService<'a, S, A> {
    /// Creates a service over the two collaborators.
    pub fn new(store: &'a S, audit: &'a A, enforcement: EnforcementMode) -> Self {
        Self {
            store,
            audit,
            enforcement,
        }
    }

    /// Applies one prepared result.
    ///
    /// The audit entry is appended before the verdict is enforced, so
    /// rejected attempts remain traceable.
    pub fn apply(&self, result: &DualWriteResult) -> AppResult<()> {
        self.audit.append(&result.audit)?;

        for warning in &result.validation.warnings {
            tracing::warn!(
                entity_type = %result.entity_type,
                entity_id = %result.entity_id,
                "{warning}"
            );
        }

        if !result.validation.valid {
            let reason = result
                .validation
                .reason
                .clone()
                .unwrap_or_else(|| "invalid status transition".to_string());
            match self.enforcement {
                EnforcementMode::Strict => return Err(AppError::BusinessRule(reason)),
                EnforcementMode::Permissive => {
                    tracing::warn!(
                        entity_type = %result.entity_type,
                        entity_id = %result.entity_id,
                        "applying rejected transition permissively: {reason}"
                    );
                }
            }
        }

        self.store.apply_status_update(
            result.entity_type,
            &result.entity_id,
            &result.legacy_update,
            &result.unified_update,
        )?;
        tracing::info!(
            entity_type = %result.entity_type,
            entity_id = %result.entity_id,
            "status update applied"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use procura_shared::types::OrderId;
    use serde_json::Value;

    use super::*;
    use crate::status::order::{LegacyOrderStatus, OrderStatus};
    use crate::status::prepare::DualWritePreparer;
    use crate::status::types::StatusUpdateContext;

    fn prepare_valid(order_id: OrderId) -> DualWriteResult {
        DualWritePreparer::order(
            order_id,
            OrderStatus::InFulfilment,
            Some(LegacyOrderStatus::Confirmed),
            Some(OrderStatus::Approved),
            &StatusUpdateContext::by("tests"),
        )
    }

    fn prepare_invalid(order_id: OrderId) -> DualWriteResult {
        DualWritePreparer::order(
            order_id,
            OrderStatus::Dispatched,
            Some(LegacyOrderStatus::Delivered),
            Some(OrderStatus::Delivered),
            &StatusUpdateContext::by("tests"),
        )
    }

    #[test]
    fn test_valid_update_merges_both_sides() {
        let store = MemoryDocumentStore::new();
        let audit = MemoryAuditLog::new();
        let service = StatusUpdateService::new(&store, &audit, EnforcementMode::Strict);

        let order_id = OrderId::new();
        service.apply(&prepare_valid(order_id)).unwrap();

        let record = store
            .record(EntityType::Order, &order_id.to_string())
            .unwrap();
        assert_eq!(
            record.get("status").and_then(Value::as_str),
            Some("Awaiting fulfilment")
        );
        assert_eq!(
            record.get("unified_status").and_then(Value::as_str),
            Some("IN_FULFILMENT")
        );
        assert_eq!(audit.entries().len(), 1);
    }

    #[test]
    fn test_strict_mode_rejects_but_audits() {
        let store = MemoryDocumentStore::new();
        let audit = MemoryAuditLog::new();
        let service = StatusUpdateService::new(&store, &audit, EnforcementMode::Strict);

        let order_id = OrderId::new();
        let err = service.apply(&prepare_invalid(order_id)).unwrap_err();

        assert!(matches!(err, AppError::BusinessRule(_)));
        // Rejected attempts still leave a forensic trace.
        assert_eq!(audit.entries().len(), 1);
        assert!(store.record(EntityType::Order, &order_id.to_string()).is_none());
    }

    #[test]
    fn test_permissive_mode_applies_invalid_transition() {
        let store = MemoryDocumentStore::new();
        let audit = MemoryAuditLog::new();
        let service = StatusUpdateService::new(&store, &audit, EnforcementMode::Permissive);

        let order_id = OrderId::new();
        service.apply(&prepare_invalid(order_id)).unwrap();

        let record = store
            .record(EntityType::Order, &order_id.to_string())
            .unwrap();
        assert_eq!(
            record.get("unified_status").and_then(Value::as_str),
            Some("DISPATCHED")
        );
        assert_eq!(audit.entries().len(), 1);
    }

    #[test]
    fn test_repeated_updates_merge_into_one_record() {
        let store = MemoryDocumentStore::new();
        let audit = MemoryAuditLog::new();
        let service = StatusUpdateService::new(&store, &audit, EnforcementMode::Strict);

        let order_id = OrderId::new();
        service.apply(&prepare_valid(order_id)).unwrap();

        let follow_up = DualWritePreparer::order(
            order_id,
            OrderStatus::Dispatched,
            Some(LegacyOrderStatus::AwaitingFulfilment),
            Some(OrderStatus::InFulfilment),
            &StatusUpdateContext::by("tests"),
        );
        service.apply(&follow_up).unwrap();

        let record = store
            .record(EntityType::Order, &order_id.to_string())
            .unwrap();
        assert_eq!(
            record.get("status").and_then(Value::as_str),
            Some("Dispatched")
        );
        assert_eq!(audit.entries().len(), 2);
    }
}
