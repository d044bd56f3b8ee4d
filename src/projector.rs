//! Status projection
//!
//! Maps a zone id + status to a concrete visual effect. [`Projection`] is the
//! pure description (css class, fill color, accessible label); the
//! [`StatusProjector`] trait is the seam to whatever render target embeds the
//! core. No network access, no state of its own.

use std::sync::Mutex;

use crate::zones::ZoneStatus;

/// Fill colors for inline SVG shapes.
const FILL_AVAILABLE: &str = "#2e7d32";
const FILL_BUSY: &str = "#c62828";

/// Pure description of the visual effect for one zone status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    /// CSS class placed on the element (`green` / `red`).
    pub css_class: &'static str,
    /// Presentation fill for SVG shapes.
    pub fill_color: &'static str,
    /// State text used in accessible labels.
    pub state_text: &'static str,
    /// `aria-pressed` value for button-role elements (busy = pressed).
    pub aria_pressed: bool,
}

impl Projection {
    pub fn for_status(status: ZoneStatus) -> Self {
        match status {
            ZoneStatus::Available => Self {
                css_class: "green",
                fill_color: FILL_AVAILABLE,
                state_text: "available",
                aria_pressed: false,
            },
            ZoneStatus::Busy => Self {
                css_class: "red",
                fill_color: FILL_BUSY,
                state_text: "busy",
                aria_pressed: true,
            },
        }
    }

    /// Accessible label for a status-role element, e.g. `Tent 1 (busy)`.
    pub fn aria_label(&self, base_name: &str) -> String {
        if base_name.is_empty() {
            format!("({})", self.state_text)
        } else {
            format!("{base_name} ({})", self.state_text)
        }
    }
}

/// Render target for status changes.
///
/// Calls are synchronous and must be cheap; they happen inside the
/// reconciliation turn. Repeated application of the same (zone, status)
/// pair must be harmless.
pub trait StatusProjector: Send + Sync {
    /// Apply a status to the zone's visual representation.
    fn apply(&self, zone_id: &str, status: ZoneStatus);

    /// Surface a failed toggle to the user.
    fn toggle_failed(&self, zone_id: &str);
}

/// Projector that only logs. Default for headless embeddings.
#[derive(Debug, Default)]
pub struct TraceProjector;

impl StatusProjector for TraceProjector {
    fn apply(&self, zone_id: &str, status: ZoneStatus) {
        tracing::debug!(zone = %zone_id, status = %status, "projecting status");
    }

    fn toggle_failed(&self, zone_id: &str) {
        tracing::warn!(zone = %zone_id, "toggle failed, showing alert");
    }
}

/// Projector that records every call, for tests and harnesses.
#[derive(Debug, Default)]
pub struct RecordingProjector {
    applied: Mutex<Vec<(String, ZoneStatus)>>,
    failures: Mutex<Vec<String>>,
}

impl RecordingProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `apply` calls in order.
    pub fn applied(&self) -> Vec<(String, ZoneStatus)> {
        self.applied.lock().unwrap().clone()
    }

    /// Most recent status applied for `zone_id`.
    pub fn last_for(&self, zone_id: &str) -> Option<ZoneStatus> {
        self.applied
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(id, _)| id == zone_id)
            .map(|(_, status)| *status)
    }

    /// Number of `apply` calls for `zone_id`.
    pub fn count_for(&self, zone_id: &str) -> usize {
        self.applied
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == zone_id)
            .count()
    }

    /// Zones that had a failed toggle surfaced.
    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().unwrap().clone()
    }
}

impl StatusProjector for RecordingProjector {
    fn apply(&self, zone_id: &str, status: ZoneStatus) {
        self.applied
            .lock()
            .unwrap()
            .push((zone_id.to_string(), status));
    }

    fn toggle_failed(&self, zone_id: &str) {
        self.failures.lock().unwrap().push(zone_id.to_string());
    }
}
