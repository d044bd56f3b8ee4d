//! State synchronization and reconciliation
//!
//! The reconciler merges snapshot and per-child notifications from the
//! store feed into the local status cache and the projector; the sync
//! worker drives it from the broadcast feed; the toggle coordinator is the
//! admin-facing mutation path with optimistic updates and rollback.

pub mod cache;
pub mod reconciler;
pub mod toggle;
pub mod worker;

pub use cache::{StatusCache, WriteGenerations};
pub use reconciler::Reconciler;
pub use toggle::ToggleCoordinator;
pub use worker::SyncWorker;
