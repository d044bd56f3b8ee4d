//! Audit service handle
//!
//! Cheap-to-clone front for the audit worker: `enqueue` hands an entry to
//! the background batcher over an unbounded channel and returns
//! immediately. Query operations read the store directly.

use std::sync::Arc;
use tokio::sync::mpsc;

use super::types::AuditEntry;
use crate::core::error::SyncResult;
use crate::store::{LOGS_PATH, StatusStore};

#[derive(Clone)]
pub struct AuditService {
    tx: mpsc::UnboundedSender<AuditEntry>,
    enabled: bool,
    store: Arc<dyn StatusStore>,
}

impl std::fmt::Debug for AuditService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditService")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl AuditService {
    /// Create the service handle and the receiver its worker consumes.
    pub fn new(
        store: Arc<dyn StatusStore>,
        enabled: bool,
    ) -> (Self, mpsc::UnboundedReceiver<AuditEntry>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, enabled, store }, rx)
    }

    /// Record an entry, fire-and-forget.
    ///
    /// Never blocks and never reports failure to the caller; audit logging
    /// must not affect the primary mutation path.
    pub fn enqueue(&self, entry: AuditEntry) {
        if !self.enabled {
            return;
        }
        if self.tx.send(entry).is_err() {
            tracing::warn!("audit channel closed, entry dropped");
        }
    }

    /// The most recent `limit` entries, newest first.
    pub async fn recent_logs(&self, limit: usize) -> SyncResult<Vec<AuditEntry>> {
        let tree = self.store.read_tree(LOGS_PATH).await?;

        let mut entries: Vec<AuditEntry> = tree
            .into_values()
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect();
        // ISO-8601 timestamps sort lexicographically
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit);
        Ok(entries)
    }
}
