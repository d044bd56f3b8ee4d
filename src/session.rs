//! Session lifecycle
//!
//! One [`Session`] per connected viewer/admin: it constructs the shared
//! state, spawns the sync and audit workers, and exposes the mutation
//! surfaces. Dropping the session does not stop the workers; call
//! [`Session::shutdown`] for an orderly stop (pending snapshot applied,
//! pending audit batch flushed).

use std::sync::Arc;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::area::AreaController;
use crate::audit::{AuditService, AuditWorker};
use crate::core::config::Config;
use crate::core::state::SessionState;
use crate::identity::IdentityProvider;
use crate::projector::StatusProjector;
use crate::store::StatusStore;
use crate::sync::cache::{StatusCache, WriteGenerations};
use crate::sync::reconciler::Reconciler;
use crate::sync::toggle::ToggleCoordinator;
use crate::sync::worker::SyncWorker;
use crate::zones::ZoneConfig;

pub struct Session {
    state: SessionState,
    toggles: ToggleCoordinator,
    areas: AreaController,
    audit: AuditService,
    shutdown: CancellationToken,
}

impl Session {
    /// Wire up one session and spawn its background workers.
    pub fn start(
        config: Config,
        zones: ZoneConfig,
        store: Arc<dyn StatusStore>,
        projector: Arc<dyn StatusProjector>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let shutdown = CancellationToken::new();
        let cache = Arc::new(StatusCache::new());
        let generations = Arc::new(WriteGenerations::new());
        let zones = Arc::new(zones);

        let state = SessionState {
            config,
            zones,
            store,
            cache,
            generations,
            projector,
            identity,
        };

        let reconciler = Reconciler::new(
            &state.zones,
            state.cache.clone(),
            state.generations.clone(),
            state.projector.clone(),
        );
        let sync_worker = SyncWorker::new(
            reconciler,
            state.store.subscribe(),
            Duration::from_millis(state.config.snapshot_debounce_ms),
            shutdown.child_token(),
        );
        tokio::spawn(sync_worker.run());

        let (audit, audit_rx) =
            AuditService::new(state.store.clone(), state.config.logging_enabled);
        let audit_worker = AuditWorker::new(
            state.store.clone(),
            audit_rx,
            Duration::from_millis(state.config.audit_flush_ms),
            shutdown.child_token(),
        );
        tokio::spawn(audit_worker.run());

        let toggles = ToggleCoordinator::new(state.clone(), audit.clone());
        let areas = AreaController::new(state.clone(), audit.clone());

        tracing::info!(
            zones = state.zones.zones.len(),
            areas = state.zones.areas.len(),
            "session started"
        );

        Self {
            state,
            toggles,
            areas,
            audit,
            shutdown,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Admin toggle surface for top-level zones and sub-booths.
    pub fn toggles(&self) -> &ToggleCoordinator {
        &self.toggles
    }

    /// Tent master / tent-only control surface.
    pub fn areas(&self) -> &AreaController {
        &self.areas
    }

    /// Audit log handle (enqueue + read-back).
    pub fn audit(&self) -> &AuditService {
        &self.audit
    }

    /// Stop the background workers.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}
