//! Audit batch worker
//!
//! Owns the pending batch and its flush timer. Every enqueue re-arms the
//! timer (trailing-edge debounce); when the window closes the whole batch
//! goes out as one multi-key write under `logs/`. The batch is cleared on
//! every flush attempt whether or not the write succeeded.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::types::AuditEntry;
use crate::store::{StatusStore, log_path};

pub struct AuditWorker {
    store: Arc<dyn StatusStore>,
    rx: mpsc::UnboundedReceiver<AuditEntry>,
    flush_delay: Duration,
    shutdown: CancellationToken,
}

impl AuditWorker {
    pub fn new(
        store: Arc<dyn StatusStore>,
        rx: mpsc::UnboundedReceiver<AuditEntry>,
        flush_delay: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            store,
            rx,
            flush_delay,
            shutdown,
        }
    }

    /// Run until the channel closes or shutdown is requested.
    pub async fn run(self) {
        let Self {
            store,
            mut rx,
            flush_delay,
            shutdown,
        } = self;

        tracing::info!("audit worker started");

        let mut batch: Vec<AuditEntry> = Vec::new();
        let mut deadline: Option<Instant> = None;

        loop {
            let sleep_until =
                deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

            tokio::select! {
                _ = shutdown.cancelled() => {
                    Self::flush(&store, &mut batch).await;
                    tracing::info!("audit worker shutting down");
                    break;
                }

                _ = tokio::time::sleep_until(sleep_until), if deadline.is_some() => {
                    Self::flush(&store, &mut batch).await;
                    deadline = None;
                }

                entry = rx.recv() => {
                    match entry {
                        Some(entry) => {
                            batch.push(entry);
                            // Debounce from the most recent enqueue
                            deadline = Some(Instant::now() + flush_delay);
                        }
                        None => {
                            Self::flush(&store, &mut batch).await;
                            tracing::info!("audit channel closed, worker stopping");
                            break;
                        }
                    }
                }
            }
        }

        tracing::info!("audit worker stopped");
    }

    /// Write the whole batch in one multi-key write, then clear it.
    ///
    /// Failures are operator-visible only; the entries are dropped.
    async fn flush(store: &Arc<dyn StatusStore>, batch: &mut Vec<AuditEntry>) {
        if batch.is_empty() {
            return;
        }

        let entries = std::mem::take(batch);
        let count = entries.len();

        let mut updates = HashMap::with_capacity(count);
        for entry in entries {
            match serde_json::to_value(&entry) {
                Ok(value) => {
                    updates.insert(log_path(&Uuid::new_v4().to_string()), value);
                }
                Err(e) => {
                    tracing::warn!("failed to serialize audit entry, skipping: {e}");
                }
            }
        }

        match store.write_many(updates).await {
            Ok(()) => {
                tracing::debug!("flushed {count} audit entries");
            }
            Err(e) => {
                tracing::warn!("audit batch write failed (non-critical), {count} entries dropped: {e}");
            }
        }
    }
}
