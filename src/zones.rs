//! Zone model and static layout configuration
//!
//! Zones are fixed configuration data: the identifier space is loaded once at
//! session start and never changes at runtime. The crate ships the original
//! event map layout as a default; deployments can deserialize their own.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Binary status of a zone.
///
/// The persisted wire encoding is `"green"` (available) / `"red"` (busy);
/// any other string is invalid and ignored per-item by the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneStatus {
    #[serde(rename = "green")]
    Available,
    #[serde(rename = "red")]
    Busy,
}

impl ZoneStatus {
    /// Wire encoding used in the remote store.
    pub const fn as_wire(self) -> &'static str {
        match self {
            ZoneStatus::Available => "green",
            ZoneStatus::Busy => "red",
        }
    }

    /// Parse the wire encoding. Returns `None` for anything else.
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "green" => Some(ZoneStatus::Available),
            "red" => Some(ZoneStatus::Busy),
            _ => None,
        }
    }

    /// The opposite status.
    pub const fn toggled(self) -> Self {
        match self {
            ZoneStatus::Available => ZoneStatus::Busy,
            ZoneStatus::Busy => ZoneStatus::Available,
        }
    }

    /// Human-readable state text, as shown in accessible labels.
    pub const fn label(self) -> &'static str {
        match self {
            ZoneStatus::Available => "available",
            ZoneStatus::Busy => "busy",
        }
    }

    /// Store value for this status.
    pub fn to_value(self) -> Value {
        Value::String(self.as_wire().to_string())
    }
}

impl fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A leaf sub-booth inside a composite zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booth {
    pub id: String,
    pub name: String,
}

/// A composite zone (tent): its own record plus an ordered child list.
///
/// Child order is display order only; it carries no other meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaLayout {
    /// Navigation key for the area view (e.g. `tentone`).
    pub key: String,
    /// Display title (e.g. `Tent 1`).
    pub title: String,
    /// Id of the tent's own record under `booths/`.
    pub tent_id: String,
    /// Sub-booths, stored under `detailed_booths/`.
    pub booths: Vec<Booth>,
}

/// Static zone configuration for one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Top-level zone ids (leaf booths and tents), in display order.
    pub zones: Vec<String>,
    /// Composite areas with their sub-booth layouts.
    pub areas: Vec<AreaLayout>,
}

fn booth(tent: &str, n: u32) -> Booth {
    Booth {
        id: format!("{tent}_booth{n}"),
        name: format!("Booth {n}"),
    }
}

impl ZoneConfig {
    /// The original event map layout: eight top-level zones, three tents
    /// with their sub-booth grids in on-screen order.
    pub fn event_map() -> Self {
        let tent1 = [8, 9, 10, 11, 12, 13, 7, 6, 5, 4, 3, 2]
            .into_iter()
            .map(|n| booth("tent1", n))
            .collect();
        let tent2 = [19, 20, 21, 22, 23, 24, 18, 17, 16, 15, 14]
            .into_iter()
            .map(|n| booth("tent2", n))
            .collect();
        let tent3 = [30, 31, 32, 33, 34, 29, 28, 27, 26, 25]
            .into_iter()
            .map(|n| booth("tent3", n))
            .collect();

        Self {
            zones: [
                "psc_workshop1",
                "psc_workshop2",
                "tent1",
                "tent2",
                "tent3",
                "plaza",
                "ultralight_show",
                "great_hall",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            areas: vec![
                AreaLayout {
                    key: "tentone".to_string(),
                    title: "Tent 1".to_string(),
                    tent_id: "tent1".to_string(),
                    booths: tent1,
                },
                AreaLayout {
                    key: "tenttwo".to_string(),
                    title: "Tent 2".to_string(),
                    tent_id: "tent2".to_string(),
                    booths: tent2,
                },
                AreaLayout {
                    key: "tentthree".to_string(),
                    title: "Tent 3".to_string(),
                    tent_id: "tent3".to_string(),
                    booths: tent3,
                },
            ],
        }
    }

    pub fn area(&self, key: &str) -> Option<&AreaLayout> {
        self.areas.iter().find(|a| a.key == key)
    }

    pub fn area_for_tent(&self, tent_id: &str) -> Option<&AreaLayout> {
        self.areas.iter().find(|a| a.tent_id == tent_id)
    }

    /// Whether `id` is a top-level zone (leaf booth or tent record).
    pub fn is_zone(&self, id: &str) -> bool {
        self.zones.iter().any(|z| z == id)
    }

    /// Whether `id` is a sub-booth of any area.
    pub fn is_detailed_booth(&self, id: &str) -> bool {
        self.areas
            .iter()
            .any(|a| a.booths.iter().any(|b| b.id == id))
    }
}
