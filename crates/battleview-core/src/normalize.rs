//! Status normalization — total mappings from backend integer codes to
//! domain enums.
//!
//! These functions guard the rest of the client against backend schema
//! drift: every input maps to exactly one output, unrecognized codes
//! fall back to a defined default, and nothing here can fail or block
//! ingestion of the rest of a record.

use crate::enums::{AmmoType, TaskStatus, WeaponStatus};

/// Normalize a backend task status code. Unrecognized codes are pending.
pub fn task_status(code: i64) -> TaskStatus {
    match code {
        0 => TaskStatus::Pending,
        1 => TaskStatus::Accepted,
        2 => TaskStatus::Completed,
        3 => TaskStatus::Failed,
        other => {
            log::warn!("unrecognized task status code {other}, defaulting to pending");
            TaskStatus::Pending
        }
    }
}

/// Normalize a backend weapon status code. Unrecognized codes are idle.
pub fn weapon_status(code: i64) -> WeaponStatus {
    match code {
        1 => WeaponStatus::Idle,
        2 => WeaponStatus::Busy,
        3 => WeaponStatus::Maintenance,
        4 => WeaponStatus::Destroyed,
        5 => WeaponStatus::Loaded,
        6 => WeaponStatus::Unloaded,
        7 => WeaponStatus::Moved,
        other => {
            if other != 0 {
                log::warn!("unrecognized weapon status code {other}, defaulting to idle");
            }
            WeaponStatus::Idle
        }
    }
}

/// Normalize a backend ammunition type code.
pub fn ammo_type(code: i64) -> AmmoType {
    match code {
        0 => AmmoType::HighExplosive,
        1 => AmmoType::ArmorPiercing,
        2 => AmmoType::Guided,
        3 => AmmoType::Smoke,
        other => {
            log::warn!("unrecognized ammo type code {other}");
            AmmoType::Unknown
        }
    }
}
