//! Per-session shared state
//!
//! One [`SessionState`] is constructed per session and passed by shallow
//! `Arc` clone to every collaborator that needs read access. The status
//! cache is the sole source of truth for "current status" queries; UI is
//! derived from it, never read back as state.

use std::sync::Arc;

use crate::core::Config;
use crate::identity::IdentityProvider;
use crate::projector::StatusProjector;
use crate::store::StatusStore;
use crate::sync::cache::{StatusCache, WriteGenerations};
use crate::zones::ZoneConfig;

/// Shared references for one live session.
#[derive(Clone)]
pub struct SessionState {
    /// Runtime configuration.
    pub config: Config,
    /// Static zone layout.
    pub zones: Arc<ZoneConfig>,
    /// Remote key-value store backend.
    pub store: Arc<dyn StatusStore>,
    /// Last-observed status per zone.
    pub cache: Arc<StatusCache>,
    /// Per-zone observed-event counters (stale-rollback guard).
    pub generations: Arc<WriteGenerations>,
    /// Render target for status changes.
    pub projector: Arc<dyn StatusProjector>,
    /// Current administrator identity.
    pub identity: Arc<dyn IdentityProvider>,
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("config", &self.config)
            .field("cached_zones", &self.cache.len())
            .finish_non_exhaustive()
    }
}
