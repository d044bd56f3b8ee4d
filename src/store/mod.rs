//! Remote state store abstraction
//!
//! The store is a hierarchical key-value store reachable over a persistent
//! connection. The core consumes it through point reads, point writes, an
//! atomic multi-key write, and a single broadcast event feed carrying both
//! whole-tree snapshots and per-child notifications. Which backend sits
//! behind the trait is an embedding concern.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::broadcast;

use crate::core::error::StoreResult;

/// Subtree holding top-level zone and tent records.
pub const BOOTHS_PATH: &str = "booths";
/// Subtree holding sub-booth records inside composite areas.
pub const DETAILED_BOOTHS_PATH: &str = "detailed_booths";
/// Subtree holding audit log entries under generated keys.
pub const LOGS_PATH: &str = "logs";

pub fn booth_path(zone_id: &str) -> String {
    format!("{BOOTHS_PATH}/{zone_id}")
}

pub fn detailed_booth_path(booth_id: &str) -> String {
    format!("{DETAILED_BOOTHS_PATH}/{booth_id}")
}

pub fn log_path(key: &str) -> String {
    format!("{LOGS_PATH}/{key}")
}

/// One notification from the store's change feed.
///
/// The store delivers both a whole-tree snapshot on any change under
/// `booths/` and finer per-child events; the reconciler treats both as
/// equally authoritative idempotent writes to the same cache.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// Snapshot of the whole `booths/` subtree, raw wire values.
    Snapshot { zones: HashMap<String, String> },
    /// A child under `booths/` changed.
    ChildChanged { id: String, value: String },
    /// A child appeared under `booths/`.
    ChildAdded { id: String, value: String },
    /// A child under `detailed_booths/` changed or appeared.
    DetailedChanged { id: String, value: String },
    /// Connectivity transition of the persistent connection.
    Connectivity { connected: bool },
}

/// Remote key-value store consumed by the synchronization core.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Point read. `Ok(None)` when no record exists at `path`.
    async fn read(&self, path: &str) -> StoreResult<Option<Value>>;

    /// Per-key write.
    async fn write(&self, path: &str, value: Value) -> StoreResult<()>;

    /// Atomic multi-key write.
    async fn write_many(&self, updates: HashMap<String, Value>) -> StoreResult<()>;

    /// All direct children of `path`, keyed by child key.
    async fn read_tree(&self, path: &str) -> StoreResult<HashMap<String, Value>>;

    /// Subscribe to the change feed. Every subscriber sees every event,
    /// including echoes of this session's own writes.
    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;
}
