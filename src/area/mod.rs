//! Composite area controls
//!
//! A tent owns a fixed list of sub-booths and two control surfaces: the
//! master control sets the tent record and every sub-booth, the tent-only
//! control sets the tent record alone. Both surfaces display the same
//! underlying tent record; there is no separate tent-only storage.

use serde_json::Value;

use crate::audit::{AuditAction, AuditEntry, AuditService};
use crate::core::error::{SyncError, SyncResult};
use crate::core::state::SessionState;
use crate::identity::ANONYMOUS;
use crate::store::{booth_path, detailed_booth_path};
use crate::zones::{AreaLayout, ZoneStatus};

/// What the two tent control surfaces currently display.
///
/// Both fields derive from the single cached tent record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TentPanel {
    pub master: ZoneStatus,
    pub tent_only: ZoneStatus,
}

pub struct AreaController {
    state: SessionState,
    audit: AuditService,
}

impl AreaController {
    pub fn new(state: SessionState, audit: AuditService) -> Self {
        Self { state, audit }
    }

    pub fn layout(&self, area_key: &str) -> Option<&AreaLayout> {
        self.state.zones.area(area_key)
    }

    /// Current display state for both tent control surfaces.
    pub fn tent_panel(&self, tent_id: &str) -> TentPanel {
        let status = self
            .state
            .cache
            .status_or(tent_id, self.state.config.default_status);
        TentPanel {
            master: status,
            tent_only: status,
        }
    }

    /// Set the tent record and every sub-booth to `status`.
    ///
    /// Each of the k+1 writes is attempted independently: one child failing
    /// rolls nothing back and stops nothing. Only the parent-level action
    /// emits an audit entry. The returned result reflects the parent write.
    pub async fn master_toggle(&self, tent_id: &str, status: ZoneStatus) -> SyncResult<()> {
        let layout = self
            .state
            .zones
            .area_for_tent(tent_id)
            .ok_or_else(|| SyncError::UnknownZone(tent_id.to_string()))?;
        let previous = self
            .state
            .cache
            .status_or(tent_id, self.state.config.default_status);
        tracing::debug!(tent = %tent_id, status = %status, "master toggle");

        self.state.cache.apply(tent_id, status);
        self.state.projector.apply(tent_id, status);
        let parent_result = self
            .state
            .store
            .write(&booth_path(tent_id), status.to_value())
            .await;
        match &parent_result {
            Ok(()) => {
                self.audit.enqueue(AuditEntry::new(
                    AuditAction::TentMasterToggle,
                    tent_id,
                    previous,
                    status,
                    self.actor(),
                ));
            }
            Err(e) => {
                tracing::warn!(tent = %tent_id, "master toggle tent write failed: {e}");
            }
        }

        for booth in &layout.booths {
            self.state.cache.apply(&booth.id, status);
            self.state.projector.apply(&booth.id, status);
            if let Err(e) = self
                .state
                .store
                .write(&detailed_booth_path(&booth.id), status.to_value())
                .await
            {
                // Independent best-effort write; reconciliation will
                // converge on whatever actually persisted
                tracing::warn!(booth = %booth.id, "master toggle booth write failed: {e}");
            }
        }

        parent_result.map_err(Into::into)
    }

    /// Set only the tent record, leaving every sub-booth untouched.
    pub async fn tent_only_toggle(&self, tent_id: &str, status: ZoneStatus) -> SyncResult<()> {
        if self.state.zones.area_for_tent(tent_id).is_none() {
            return Err(SyncError::UnknownZone(tent_id.to_string()));
        }
        let previous = self
            .state
            .cache
            .status_or(tent_id, self.state.config.default_status);
        tracing::debug!(tent = %tent_id, status = %status, "tent-only toggle");

        self.state.cache.apply(tent_id, status);
        self.state.projector.apply(tent_id, status);
        match self
            .state
            .store
            .write(&booth_path(tent_id), status.to_value())
            .await
        {
            Ok(()) => {
                self.audit.enqueue(AuditEntry::new(
                    AuditAction::TentOnlyToggle,
                    tent_id,
                    previous,
                    status,
                    self.actor(),
                ));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(tent = %tent_id, "tent-only write failed: {e}");
                Err(e.into())
            }
        }
    }

    /// Prime cache and projector for an area view from point reads of the
    /// tent record and each sub-booth. Absent records default.
    pub async fn load_area(&self, area_key: &str) -> SyncResult<()> {
        let layout = self
            .state
            .zones
            .area(area_key)
            .ok_or_else(|| SyncError::UnknownZone(area_key.to_string()))?;

        let tent_status = self.read_status(&booth_path(&layout.tent_id)).await?;
        self.state.cache.apply(&layout.tent_id, tent_status);
        self.state.projector.apply(&layout.tent_id, tent_status);

        for booth in &layout.booths {
            let status = self.read_status(&detailed_booth_path(&booth.id)).await?;
            self.state.cache.apply(&booth.id, status);
            self.state.projector.apply(&booth.id, status);
        }

        tracing::debug!(area = %area_key, booths = layout.booths.len(), "area loaded");
        Ok(())
    }

    async fn read_status(&self, path: &str) -> SyncResult<ZoneStatus> {
        let value = self.state.store.read(path).await?;
        Ok(value
            .as_ref()
            .and_then(Value::as_str)
            .and_then(ZoneStatus::from_wire)
            .unwrap_or(self.state.config.default_status))
    }

    fn actor(&self) -> String {
        self.state
            .identity
            .current_identity()
            .unwrap_or_else(|| ANONYMOUS.to_string())
    }
}
