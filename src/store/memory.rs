//! In-memory store backend
//!
//! Backend for tests and for embedding without a remote store. Mirrors the
//! echo behavior the engine relies on: a write under `booths/` emits a
//! child event followed by a fresh whole-tree snapshot, a write under
//! `detailed_booths/` emits a detailed-child event, writes under `logs/`
//! emit nothing.
//!
//! Test surface: injectable write failures, an optional artificial write
//! delay, and counters for write attempts.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::broadcast;

use super::{BOOTHS_PATH, DETAILED_BOOTHS_PATH, StatusStore, StoreEvent};
use crate::core::error::{StoreError, StoreResult};

const EVENT_CHANNEL_CAPACITY: usize = 256;

pub struct MemoryStore {
    data: DashMap<String, Value>,
    events: broadcast::Sender<StoreEvent>,
    fail_writes: AtomicBool,
    write_delay_ms: AtomicU64,
    write_attempts: AtomicU64,
    multi_write_attempts: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            data: DashMap::new(),
            events,
            fail_writes: AtomicBool::new(false),
            write_delay_ms: AtomicU64::new(0),
            write_attempts: AtomicU64::new(0),
            multi_write_attempts: AtomicU64::new(0),
        }
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Delay every write by `ms` before it resolves.
    pub fn set_write_delay_ms(&self, ms: u64) {
        self.write_delay_ms.store(ms, Ordering::SeqCst);
    }

    /// Total `write` attempts, including failed ones.
    pub fn write_attempts(&self) -> u64 {
        self.write_attempts.load(Ordering::SeqCst)
    }

    /// Total `write_many` attempts, including failed ones.
    pub fn multi_write_attempts(&self) -> u64 {
        self.multi_write_attempts.load(Ordering::SeqCst)
    }

    /// Insert a record without emitting any event.
    pub fn seed(&self, path: &str, value: Value) {
        self.data.insert(path.to_string(), value);
    }

    /// Emit a snapshot of the current `booths/` subtree to all subscribers.
    pub fn emit_snapshot(&self) {
        self.emit(StoreEvent::Snapshot {
            zones: self.booths_tree(),
        });
    }

    /// Emit a connectivity transition.
    pub fn emit_connectivity(&self, connected: bool) {
        self.emit(StoreEvent::Connectivity { connected });
    }

    /// Apply a write acknowledged for another session: the record lands in
    /// the data and only the child event is delivered, regardless of any
    /// failure injection on this session's writes.
    pub fn inject_child_changed(&self, id: &str, value: &str) {
        self.data.insert(
            super::booth_path(id),
            Value::String(value.to_string()),
        );
        self.emit(StoreEvent::ChildChanged {
            id: id.to_string(),
            value: value.to_string(),
        });
    }

    fn booths_tree(&self) -> HashMap<String, String> {
        let prefix = format!("{BOOTHS_PATH}/");
        self.data
            .iter()
            .filter_map(|entry| {
                let id = entry.key().strip_prefix(&prefix)?.to_string();
                let value = entry.value().as_str()?.to_string();
                Some((id, value))
            })
            .collect()
    }

    fn emit(&self, event: StoreEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    async fn before_write(&self, path: &str) -> StoreResult<()> {
        let delay = self.write_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::write_failed(path, "injected failure"));
        }
        Ok(())
    }

    /// Store the record and emit the events a live backend would.
    fn commit(&self, path: &str, value: Value) {
        let existed = self.data.insert(path.to_string(), value.clone()).is_some();
        let raw = value.as_str().unwrap_or_default().to_string();

        if let Some(id) = path.strip_prefix(&format!("{BOOTHS_PATH}/")) {
            let id = id.to_string();
            if existed {
                self.emit(StoreEvent::ChildChanged {
                    id,
                    value: raw,
                });
            } else {
                self.emit(StoreEvent::ChildAdded {
                    id,
                    value: raw,
                });
            }
            self.emit_snapshot();
        } else if let Some(id) = path.strip_prefix(&format!("{DETAILED_BOOTHS_PATH}/")) {
            self.emit(StoreEvent::DetailedChanged {
                id: id.to_string(),
                value: raw,
            });
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusStore for MemoryStore {
    async fn read(&self, path: &str) -> StoreResult<Option<Value>> {
        Ok(self.data.get(path).map(|entry| entry.value().clone()))
    }

    async fn write(&self, path: &str, value: Value) -> StoreResult<()> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        self.before_write(path).await?;
        self.commit(path, value);
        Ok(())
    }

    async fn write_many(&self, updates: HashMap<String, Value>) -> StoreResult<()> {
        self.multi_write_attempts.fetch_add(1, Ordering::SeqCst);
        self.before_write("(multi)").await?;
        let touched_booths = updates
            .keys()
            .any(|path| path.starts_with(&format!("{BOOTHS_PATH}/")));
        for (path, value) in updates {
            if path.starts_with(&format!("{BOOTHS_PATH}/")) {
                // commit would emit one snapshot per key; batch them below
                self.data.insert(path, value);
            } else {
                self.commit(&path, value);
            }
        }
        if touched_booths {
            self.emit_snapshot();
        }
        Ok(())
    }

    async fn read_tree(&self, path: &str) -> StoreResult<HashMap<String, Value>> {
        let prefix = format!("{path}/");
        Ok(self
            .data
            .iter()
            .filter_map(|entry| {
                let key = entry.key().strip_prefix(&prefix)?.to_string();
                Some((key, entry.value().clone()))
            })
            .collect())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}
