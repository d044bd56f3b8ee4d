//! Booth status synchronization core
//!
//! Keeps many independent viewer sessions' visual representation of a set of
//! named zones (booths, tents, sub-booths) consistent with a shared remote
//! key-value store, under concurrent writes and partial connectivity.
//!
//! The moving parts:
//! - [`sync::SyncWorker`] merges debounced whole-tree snapshots and immediate
//!   per-child events from the store feed into the local cache and projector.
//! - [`sync::ToggleCoordinator`] applies optimistic toggles with
//!   generation-guarded rollback on write failure.
//! - [`area::AreaController`] fans master toggles out over a tent's sub-booths
//!   and drives the tent-only control surface.
//! - [`audit::AuditWorker`] coalesces audit entries into debounced batch
//!   writes, best-effort.
//!
//! [`Session::start`] wires everything together for one viewer/admin session.

pub mod area;
pub mod audit;
pub mod core;
pub mod identity;
pub mod projector;
pub mod session;
pub mod store;
pub mod sync;
pub mod utils;
pub mod zones;

// Re-exports for embedding convenience
pub use crate::core::config::Config;
pub use crate::core::error::{StoreError, SyncError};
pub use crate::core::state::SessionState;
pub use crate::identity::{IdentityProvider, StaticIdentity};
pub use crate::projector::{Projection, StatusProjector};
pub use crate::session::Session;
pub use crate::store::{StatusStore, StoreEvent};
pub use crate::zones::{AreaLayout, Booth, ZoneConfig, ZoneStatus};
