//! Audit log records

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::time::iso_now;
use crate::zones::ZoneStatus;

/// Kind of administrative mutation being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Single top-level zone toggled.
    BoothToggle,
    /// Sub-booth inside an area set directly.
    DetailedBoothToggle,
    /// Tent and all of its sub-booths set together.
    TentMasterToggle,
    /// Tent record set without touching its sub-booths.
    TentOnlyToggle,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuditAction::BoothToggle => "booth_toggle",
            AuditAction::DetailedBoothToggle => "detailed_booth_toggle",
            AuditAction::TentMasterToggle => "tent_master_toggle",
            AuditAction::TentOnlyToggle => "tent_only_toggle",
        };
        f.write_str(s)
    }
}

/// One immutable record of an administrative mutation.
///
/// Field names match the persisted layout under `logs/<autoKey>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    /// ISO-8601 UTC timestamp of entry creation.
    pub timestamp: String,
    pub action: AuditAction,
    pub target_id: String,
    pub old_value: ZoneStatus,
    pub new_value: ZoneStatus,
    pub admin_email: String,
}

impl AuditEntry {
    pub fn new(
        action: AuditAction,
        target_id: impl Into<String>,
        old_value: ZoneStatus,
        new_value: ZoneStatus,
        admin_email: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: iso_now(),
            action,
            target_id: target_id.into(),
            old_value,
            new_value,
            admin_email: admin_email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serializes_to_persisted_layout() {
        let entry = AuditEntry::new(
            AuditAction::TentMasterToggle,
            "tent1",
            ZoneStatus::Available,
            ZoneStatus::Busy,
            "ops@example.com",
        );
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["action"], "tent_master_toggle");
        assert_eq!(value["targetId"], "tent1");
        assert_eq!(value["oldValue"], "green");
        assert_eq!(value["newValue"], "red");
        assert_eq!(value["adminEmail"], "ops@example.com");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_entry_roundtrip() {
        let entry = AuditEntry::new(
            AuditAction::BoothToggle,
            "plaza",
            ZoneStatus::Busy,
            ZoneStatus::Available,
            "anonymous",
        );
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }
}
