//! Background sync worker
//!
//! Consumes the store's broadcast feed and drives the reconciler. A
//! whole-tree snapshot is held back for a short debounce window and a
//! newer snapshot within the window replaces it, so a burst of snapshots
//! collapses into one application pass. Per-child events are applied
//! immediately; they typically carry the zone a user just changed and
//! latency there is visible.

use tokio::sync::broadcast;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::store::StoreEvent;
use crate::sync::reconciler::Reconciler;

pub struct SyncWorker {
    reconciler: Reconciler,
    events: broadcast::Receiver<StoreEvent>,
    debounce: Duration,
    shutdown: CancellationToken,
}

impl SyncWorker {
    pub fn new(
        reconciler: Reconciler,
        events: broadcast::Receiver<StoreEvent>,
        debounce: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            reconciler,
            events,
            debounce,
            shutdown,
        }
    }

    /// Run until the feed closes or shutdown is requested.
    pub async fn run(self) {
        let Self {
            reconciler,
            mut events,
            debounce,
            shutdown,
        } = self;

        tracing::info!("sync worker started");

        let mut pending_snapshot = None;
        let mut deadline: Option<Instant> = None;

        loop {
            let sleep_until =
                deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

            tokio::select! {
                _ = shutdown.cancelled() => {
                    if let Some(snapshot) = pending_snapshot.take() {
                        reconciler.apply_snapshot(&snapshot);
                    }
                    tracing::info!("sync worker shutting down");
                    break;
                }

                _ = tokio::time::sleep_until(sleep_until), if deadline.is_some() => {
                    if let Some(snapshot) = pending_snapshot.take() {
                        reconciler.apply_snapshot(&snapshot);
                    }
                    deadline = None;
                }

                result = events.recv() => {
                    match result {
                        Ok(StoreEvent::Snapshot { zones }) => {
                            // Replace, never stack: only the most recent
                            // snapshot inside the window is applied
                            pending_snapshot = Some(zones);
                            deadline = Some(Instant::now() + debounce);
                        }
                        Ok(StoreEvent::ChildChanged { id, value })
                        | Ok(StoreEvent::ChildAdded { id, value }) => {
                            reconciler.apply_child(&id, &value);
                        }
                        Ok(StoreEvent::DetailedChanged { id, value }) => {
                            reconciler.apply_detailed(&id, &value);
                        }
                        Ok(StoreEvent::Connectivity { connected }) => {
                            if connected {
                                tracing::info!("store connected");
                            } else {
                                // Transient: the store redelivers a fresh
                                // snapshot on reconnect
                                tracing::warn!("store disconnected, serving cached statuses");
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            tracing::warn!("sync worker lagged {n} events, waiting for next snapshot");
                            pending_snapshot = None;
                            deadline = None;
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            tracing::info!("store feed closed, sync worker stopping");
                            break;
                        }
                    }
                }
            }
        }

        tracing::info!("sync worker stopped");
    }
}
