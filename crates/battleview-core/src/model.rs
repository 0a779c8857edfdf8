//! Battlefield data model — the three authoritative collections.
//!
//! Records are created by snapshot ingestion and replaced wholesale on
//! each refresh. All cross-entity links are id strings, re-resolved on
//! every read; nothing holds an object reference across a refresh.

use serde::{Deserialize, Serialize};

use crate::enums::{AmmoType, TaskStatus, WeaponStatus};
use crate::types::{parse_timestamp_ms, GeoPoint};

/// A target on the geospatial surface.
///
/// Destroyed targets (`health == 0`) stay in the collection and remain
/// visible; they are only excluded from new engagements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub target_id: String,
    pub name: String,
    pub description: String,
    pub position: GeoPoint,
    pub health: u32,
    pub max_health: u32,
}

impl Target {
    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }
}

/// A weapon owned by exactly one firepower unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub weapon_id: String,
    pub name: String,
    pub status: WeaponStatus,
    pub ammo_type: AmmoType,
    pub ammo_count: u32,
    // Kinematic attributes, display only.
    pub min_range: f64,
    pub max_range: f64,
    pub reload_time: f64,
    pub speed: f64,
}

/// A firepower unit with its ordered weapon collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirepowerUnit {
    pub firepower_id: String,
    pub name: String,
    pub description: String,
    pub unit_type: String,
    pub position: GeoPoint,
    pub weapons: Vec<Weapon>,
}

impl FirepowerUnit {
    pub fn weapon(&self, weapon_id: &str) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.weapon_id == weapon_id)
    }
}

/// A fire task linking a firepower unit, a weapon and a target.
///
/// `firepower_id`/`weapon_id`/`target_id` are weak references: the
/// entities they name may be replaced by the next snapshot, so they are
/// looked up at read time and may resolve to nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,
    pub status: TaskStatus,
    pub firepower_id: String,
    pub weapon_id: String,
    pub target_id: String,
    pub ammo_type: AmmoType,
    pub ammo_count: u32,
    /// Absent means "not yet started", never epoch zero.
    pub start_time: Option<String>,
    /// Absent means "not yet ended".
    pub end_time: Option<String>,
}

impl Task {
    /// Sort key for the task list: epoch millis, with absent or
    /// unparseable timestamps ordering as the oldest.
    pub fn start_time_ms(&self) -> i64 {
        parse_timestamp_ms(self.start_time.as_deref()).unwrap_or(0)
    }
}

/// A full, point-in-time replacement payload from the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub targets: Vec<Target>,
    pub firepowers: Vec<FirepowerUnit>,
    pub tasks: Vec<Task>,
}
