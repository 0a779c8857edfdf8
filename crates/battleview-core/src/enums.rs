//! Enumeration types used throughout the client.

use serde::{Deserialize, Serialize};

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Published, not yet picked up by a firepower unit.
    #[default]
    Pending,
    /// Accepted and executing.
    Accepted,
    /// Finished successfully.
    Completed,
    /// Finished unsuccessfully.
    Failed,
}

/// Weapon availability status.
///
/// The backend code space is open; codes we do not recognize normalize
/// to `Idle` rather than blocking ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponStatus {
    #[default]
    Idle,
    /// Assigned to a task, unavailable for new engagements.
    Busy,
    Destroyed,
    /// Under maintenance.
    Maintenance,
    Loaded,
    Unloaded,
    /// Relocated since last report.
    Moved,
}

/// Ammunition type carried by a weapon or consumed by a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmmoType {
    HighExplosive,
    ArmorPiercing,
    Guided,
    Smoke,
    /// Unrecognized backend code.
    #[default]
    Unknown,
}

/// Engagement animation lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationPhase {
    /// No animation running.
    #[default]
    Idle,
    /// Projectile in flight between firepower unit and target.
    Flying,
    /// Impact visual showing at the target, settle delay counting.
    Impacting,
    /// Damage applied, instance discarded. Terminal.
    Settled,
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}
