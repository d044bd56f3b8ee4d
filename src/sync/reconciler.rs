//! Reconciliation of remote-observed state
//!
//! Snapshot and per-child notifications are applied through the same path:
//! parse the wire value, bump the zone's generation, update the cache,
//! drive the projector. Unknown zone ids and invalid status values are
//! skipped per-item without aborting the surrounding snapshot.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::projector::StatusProjector;
use crate::sync::cache::{StatusCache, WriteGenerations};
use crate::zones::{ZoneConfig, ZoneStatus};

pub struct Reconciler {
    cache: Arc<StatusCache>,
    generations: Arc<WriteGenerations>,
    projector: Arc<dyn StatusProjector>,
    /// Top-level zone ids in display order, for deterministic snapshot passes.
    zone_order: Vec<String>,
    zones: HashSet<String>,
    detailed: HashSet<String>,
}

impl Reconciler {
    pub fn new(
        config: &ZoneConfig,
        cache: Arc<StatusCache>,
        generations: Arc<WriteGenerations>,
        projector: Arc<dyn StatusProjector>,
    ) -> Self {
        let zones: HashSet<String> = config.zones.iter().cloned().collect();
        let detailed: HashSet<String> = config
            .areas
            .iter()
            .flat_map(|area| area.booths.iter().map(|b| b.id.clone()))
            .collect();
        Self {
            cache,
            generations,
            projector,
            zone_order: config.zones.clone(),
            zones,
            detailed,
        }
    }

    /// Apply a whole-tree snapshot of the `booths/` subtree.
    ///
    /// Only configured zones are considered; ids present in the snapshot
    /// but absent from the configuration are never looked at.
    pub fn apply_snapshot(&self, zones: &HashMap<String, String>) {
        for id in &self.zone_order {
            if let Some(raw) = zones.get(id) {
                self.apply_status(id, raw);
            }
        }
    }

    /// Apply a single child event for a top-level zone.
    pub fn apply_child(&self, id: &str, raw: &str) {
        if !self.zones.contains(id) {
            tracing::trace!(zone = %id, "ignoring event for unknown zone");
            return;
        }
        self.apply_status(id, raw);
    }

    /// Apply a single child event for a sub-booth.
    pub fn apply_detailed(&self, id: &str, raw: &str) {
        if !self.detailed.contains(id) {
            tracing::trace!(booth = %id, "ignoring event for unknown sub-booth");
            return;
        }
        self.apply_status(id, raw);
    }

    fn apply_status(&self, id: &str, raw: &str) {
        let Some(status) = ZoneStatus::from_wire(raw) else {
            tracing::warn!(zone = %id, value = %raw, "ignoring invalid status value");
            return;
        };

        self.generations.bump(id);
        let changed = self.cache.apply(id, status);
        // Re-projecting an unchanged status is a harmless repeated write
        self.projector.apply(id, status);
        if changed {
            tracing::debug!(zone = %id, status = %status, "reconciled remote status");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::RecordingProjector;

    fn reconciler_with(
        projector: Arc<RecordingProjector>,
    ) -> (Reconciler, Arc<StatusCache>, Arc<WriteGenerations>) {
        let config = ZoneConfig::event_map();
        let cache = Arc::new(StatusCache::new());
        let generations = Arc::new(WriteGenerations::new());
        let reconciler = Reconciler::new(
            &config,
            cache.clone(),
            generations.clone(),
            projector.clone(),
        );
        (reconciler, cache, generations)
    }

    #[test]
    fn test_snapshot_skips_unknown_zones() {
        let projector = Arc::new(RecordingProjector::new());
        let (reconciler, cache, _) = reconciler_with(projector.clone());

        let snapshot = HashMap::from([
            ("plaza".to_string(), "green".to_string()),
            ("ghost_zone".to_string(), "red".to_string()),
        ]);
        reconciler.apply_snapshot(&snapshot);

        assert_eq!(cache.get("plaza"), Some(ZoneStatus::Available));
        assert_eq!(cache.get("ghost_zone"), None);
        assert_eq!(projector.count_for("ghost_zone"), 0);
        assert_eq!(projector.count_for("plaza"), 1);
    }

    #[test]
    fn test_invalid_status_skipped_per_item() {
        let projector = Arc::new(RecordingProjector::new());
        let (reconciler, cache, _) = reconciler_with(projector.clone());

        let snapshot = HashMap::from([
            ("plaza".to_string(), "purple".to_string()),
            ("great_hall".to_string(), "red".to_string()),
        ]);
        reconciler.apply_snapshot(&snapshot);

        assert_eq!(cache.get("plaza"), None);
        assert_eq!(projector.count_for("plaza"), 0);
        assert_eq!(cache.get("great_hall"), Some(ZoneStatus::Busy));
    }

    #[test]
    fn test_idempotent_application() {
        let projector = Arc::new(RecordingProjector::new());
        let (reconciler, cache, _) = reconciler_with(projector.clone());

        reconciler.apply_child("tent1", "red");
        let after_once = cache.get("tent1");
        reconciler.apply_child("tent1", "red");

        assert_eq!(cache.get("tent1"), after_once);
        assert_eq!(projector.last_for("tent1"), Some(ZoneStatus::Busy));
    }

    #[test]
    fn test_events_bump_generation() {
        let projector = Arc::new(RecordingProjector::new());
        let (reconciler, _, generations) = reconciler_with(projector);

        reconciler.apply_child("plaza", "red");
        reconciler.apply_child("plaza", "red");
        assert_eq!(generations.current("plaza"), 2);

        // Invalid values and unknown ids never bump
        reconciler.apply_child("plaza", "purple");
        reconciler.apply_child("ghost_zone", "red");
        assert_eq!(generations.current("plaza"), 2);
        assert_eq!(generations.current("ghost_zone"), 0);
    }

    #[test]
    fn test_detailed_events_separate_namespace() {
        let projector = Arc::new(RecordingProjector::new());
        let (reconciler, cache, _) = reconciler_with(projector.clone());

        reconciler.apply_detailed("tent1_booth5", "red");
        assert_eq!(cache.get("tent1_booth5"), Some(ZoneStatus::Busy));

        // A detailed event for a top-level id is not a sub-booth
        reconciler.apply_detailed("tent1", "red");
        assert_eq!(cache.get("tent1"), None);
    }
}
