//! Local status cache and write-generation counters

use dashmap::DashMap;

use crate::zones::ZoneStatus;

/// Last-observed status per zone.
///
/// Created empty at session start, written by every reconciliation event
/// and by the toggle coordinator's optimistic/rollback path, read to
/// compute toggle targets. Last write wins.
#[derive(Debug, Default)]
pub struct StatusCache {
    entries: DashMap<String, ZoneStatus>,
}

impl StatusCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, zone_id: &str) -> Option<ZoneStatus> {
        self.entries.get(zone_id).map(|entry| *entry.value())
    }

    pub fn status_or(&self, zone_id: &str, default: ZoneStatus) -> ZoneStatus {
        self.get(zone_id).unwrap_or(default)
    }

    /// Store a status. Returns `true` when the cached value changed.
    pub fn apply(&self, zone_id: &str, status: ZoneStatus) -> bool {
        self.entries.insert(zone_id.to_string(), status) != Some(status)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-zone monotonic counters of observed remote events.
///
/// The toggle coordinator captures a zone's generation before its
/// optimistic update; if the generation has moved when the write fails,
/// a newer remote value was observed in between and the rollback is
/// skipped so it cannot clobber that value.
#[derive(Debug, Default)]
pub struct WriteGenerations {
    counters: DashMap<String, u64>,
}

impl WriteGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the zone's generation and return the new value.
    pub fn bump(&self, zone_id: &str) -> u64 {
        let mut entry = self.counters.entry(zone_id.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current generation, 0 when no event was ever observed.
    pub fn current(&self, zone_id: &str) -> u64 {
        self.counters.get(zone_id).map(|v| *v).unwrap_or(0)
    }
}
