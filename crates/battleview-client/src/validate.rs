//! Fire-action precondition validation.
//!
//! Runs entirely against the local view model, before any backend
//! call. A rejection surfaces as a validation message and mutates
//! nothing.

use thiserror::Error;

use battleview_core::enums::{AmmoType, WeaponStatus};
use battleview_view::store::ViewStore;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FireRejection {
    #[error("firepower unit {0} not found")]
    UnknownFirepower(String),
    #[error("weapon {0} not found")]
    UnknownWeapon(String),
    #[error("weapon {0} is busy")]
    WeaponBusy(String),
    #[error("weapon {0} is destroyed")]
    WeaponDestroyed(String),
    #[error("weapon {0} carries an unknown ammunition type")]
    UnknownAmmoType(String),
    #[error("ammunition count must be positive")]
    NonPositiveCount,
    #[error("insufficient ammunition ({remaining} rounds remaining)")]
    InsufficientAmmo { remaining: u32 },
    #[error("target {0} not found")]
    UnknownTarget(String),
    #[error("target {0} is already destroyed")]
    TargetDestroyed(String),
}

/// Validate a fire action against the current view model.
pub fn validate_fire(
    store: &ViewStore,
    firepower_id: &str,
    weapon_id: &str,
    target_id: &str,
    ammo_count: u32,
) -> Result<(), FireRejection> {
    if store.firepower(firepower_id).is_none() {
        return Err(FireRejection::UnknownFirepower(firepower_id.to_owned()));
    }
    let weapon = store
        .weapon(firepower_id, weapon_id)
        .ok_or_else(|| FireRejection::UnknownWeapon(weapon_id.to_owned()))?;

    match weapon.status {
        WeaponStatus::Busy => return Err(FireRejection::WeaponBusy(weapon_id.to_owned())),
        WeaponStatus::Destroyed => {
            return Err(FireRejection::WeaponDestroyed(weapon_id.to_owned()))
        }
        _ => {}
    }
    if weapon.ammo_type == AmmoType::Unknown {
        return Err(FireRejection::UnknownAmmoType(weapon_id.to_owned()));
    }
    if ammo_count == 0 {
        return Err(FireRejection::NonPositiveCount);
    }
    if ammo_count > weapon.ammo_count {
        return Err(FireRejection::InsufficientAmmo {
            remaining: weapon.ammo_count,
        });
    }

    let target = store
        .target(target_id)
        .ok_or_else(|| FireRejection::UnknownTarget(target_id.to_owned()))?;
    if target.is_destroyed() {
        return Err(FireRejection::TargetDestroyed(target_id.to_owned()));
    }

    Ok(())
}
