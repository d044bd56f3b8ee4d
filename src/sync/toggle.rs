//! Toggle coordinator: the admin-facing mutation path
//!
//! A toggle applies the new status optimistically before the remote write
//! resolves, then either records an audit entry (success) or rolls the
//! projection back (failure). The rollback is generation guarded: if a
//! newer remote value was observed for the zone while the write was in
//! flight, the rollback is skipped so it cannot clobber that value. The
//! reconciliation feed remains the ultimate source of truth either way;
//! last write wins. No retries anywhere on this path.

use crate::audit::{AuditAction, AuditEntry, AuditService};
use crate::core::error::SyncResult;
use crate::core::state::SessionState;
use crate::identity::ANONYMOUS;
use crate::store::{booth_path, detailed_booth_path};
use crate::zones::ZoneStatus;

pub struct ToggleCoordinator {
    state: SessionState,
    audit: AuditService,
}

impl ToggleCoordinator {
    pub fn new(state: SessionState, audit: AuditService) -> Self {
        Self { state, audit }
    }

    /// Toggle a top-level zone between available and busy.
    ///
    /// Returns the status that was written on success.
    pub async fn toggle(&self, zone_id: &str) -> SyncResult<ZoneStatus> {
        let current = self
            .state
            .cache
            .status_or(zone_id, self.state.config.default_status);
        let next = current.toggled();
        tracing::debug!(zone = %zone_id, from = %current, to = %next, "toggling zone");

        self.write_status(
            &booth_path(zone_id),
            zone_id,
            current,
            next,
            AuditAction::BoothToggle,
        )
        .await?;
        Ok(next)
    }

    /// Set a sub-booth inside a composite area to an explicit status.
    pub async fn set_booth(&self, booth_id: &str, status: ZoneStatus) -> SyncResult<()> {
        let current = self
            .state
            .cache
            .status_or(booth_id, self.state.config.default_status);

        self.write_status(
            &detailed_booth_path(booth_id),
            booth_id,
            current,
            status,
            AuditAction::DetailedBoothToggle,
        )
        .await
    }

    /// Optimistic projection, remote write, audit on success, guarded
    /// rollback on failure.
    async fn write_status(
        &self,
        path: &str,
        zone_id: &str,
        previous: ZoneStatus,
        next: ZoneStatus,
        action: AuditAction,
    ) -> SyncResult<()> {
        let generation = self.state.generations.current(zone_id);

        // Visible before any network round-trip completes
        self.state.cache.apply(zone_id, next);
        self.state.projector.apply(zone_id, next);

        match self.state.store.write(path, next.to_value()).await {
            Ok(()) => {
                self.audit.enqueue(AuditEntry::new(
                    action,
                    zone_id,
                    previous,
                    next,
                    self.actor(),
                ));
                Ok(())
            }
            Err(e) => {
                if self.state.generations.current(zone_id) == generation {
                    self.state.cache.apply(zone_id, previous);
                    self.state.projector.apply(zone_id, previous);
                } else {
                    tracing::debug!(
                        zone = %zone_id,
                        "newer remote value observed during write, skipping rollback"
                    );
                }
                tracing::error!(zone = %zone_id, "status write failed: {e}");
                self.state.projector.toggle_failed(zone_id);
                Err(e.into())
            }
        }
    }

    fn actor(&self) -> String {
        self.state
            .identity
            .current_identity()
            .unwrap_or_else(|| ANONYMOUS.to_string())
    }
}
