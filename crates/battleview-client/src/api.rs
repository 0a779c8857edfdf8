//! Backend collaborator interface and payload ingestion.
//!
//! The backend is consumed through the `Backend` trait; this module
//! owns the decode from its loosely-typed JSON records into the domain
//! model, including the field-name fallback quirks of the wire format.
//! Fallback precedence is fixed and tested: the first present,
//! non-null candidate wins. Malformed fields fall back per field; a
//! record is only dropped when it carries no id at all. Ingestion never
//! fails as a whole.

use serde_json::Value;

use battleview_core::constants::DEFAULT_TARGET_HEALTH;
use battleview_core::model::{FirepowerUnit, Snapshot, Target, Task, Weapon};
use battleview_core::normalize;
use battleview_core::types::GeoPoint;

use crate::error::BackendError;

/// The remote decision/execution service, as consumed by the engine.
///
/// Calls are synchronous-style request/response; implementations
/// translate transport failures and non-success statuses into
/// `BackendError`. Bodies are returned as raw JSON and decoded here.
pub trait Backend {
    fn login(&mut self, username: &str, password: &str) -> Result<String, BackendError>;
    fn fetch_targets(&mut self, token: &str) -> Result<Value, BackendError>;
    fn fetch_firepower_units(&mut self, token: &str) -> Result<Value, BackendError>;
    fn fetch_weapons(&mut self, token: &str) -> Result<Value, BackendError>;
    fn fetch_tasks(&mut self, token: &str) -> Result<Value, BackendError>;
    /// Backend-side decision: returns a full replacement task list.
    fn publish_decision(&mut self, token: &str) -> Result<Value, BackendError>;
    /// Trigger backend-side task progression. Response body is ignored.
    fn auto_run(&mut self, token: &str) -> Result<Value, BackendError>;
    /// Accept a single task. Dormant in the primary flow.
    fn accept_task(&mut self, token: &str, task_id: &str) -> Result<Value, BackendError>;
    /// Complete a single task. Dormant in the primary flow.
    fn complete_task(&mut self, token: &str, task_id: &str) -> Result<Value, BackendError>;
}

/// Fetch and assemble a full snapshot: the four read endpoints, decoded
/// and with weapons grouped under their owning units.
pub fn fetch_snapshot<B: Backend>(backend: &mut B, token: &str) -> Result<Snapshot, BackendError> {
    let targets = decode_targets(&backend.fetch_targets(token)?);
    let mut firepowers = decode_firepower_units(&backend.fetch_firepower_units(token)?);
    let weapons = decode_weapons(&backend.fetch_weapons(token)?);
    let tasks = decode_tasks(&backend.fetch_tasks(token)?);

    group_weapons(&mut firepowers, weapons);

    Ok(Snapshot {
        targets,
        firepowers,
        tasks,
    })
}

// --- Field helpers ---

/// First present, non-null candidate field.
fn field<'a>(record: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .find_map(|name| record.get(*name))
        .filter(|v| !v.is_null())
}

/// Id-ish field: accepts strings and numbers, stringified.
fn id_field(record: &Value, candidates: &[&str]) -> Option<String> {
    match field(record, candidates)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn str_field(record: &Value, candidates: &[&str], default: &str) -> String {
    field(record, candidates)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_owned()
}

fn f64_field(record: &Value, candidates: &[&str], default: f64) -> f64 {
    field(record, candidates)
        .and_then(Value::as_f64)
        .unwrap_or(default)
}

/// Enum-code field: accepts numbers and numeric strings. Anything else
/// resolves to `default`, which the normalizers then map to their
/// fallback variant.
fn code_field(record: &Value, candidates: &[&str], default: i64) -> i64 {
    match field(record, candidates) {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(default),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
        _ => default,
    }
}

fn count_field(record: &Value, candidates: &[&str]) -> u32 {
    code_field(record, candidates, 0).max(0) as u32
}

fn opt_string_field(record: &Value, name: &str) -> Option<String> {
    field(record, &[name])
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn records(payload: &Value) -> &[Value] {
    match payload.as_array() {
        Some(items) => items,
        None => {
            log::warn!("expected a JSON array payload, got {payload}");
            &[]
        }
    }
}

// --- Record decoding ---

/// Decode the `/targets` payload.
pub fn decode_targets(payload: &Value) -> Vec<Target> {
    records(payload)
        .iter()
        .filter_map(|record| {
            let Some(target_id) = id_field(record, &["ID", "target_id"]) else {
                log::warn!("dropping target record without id: {record}");
                return None;
            };
            // Records that omit health get the default; max_health
            // defaults to health so 0 <= health <= max_health holds.
            let health = match field(record, &["health"]) {
                Some(_) => count_field(record, &["health"]),
                None => DEFAULT_TARGET_HEALTH,
            };
            let max_health = match field(record, &["max_health"]) {
                Some(_) => count_field(record, &["max_health"]),
                None => health,
            };
            Some(Target {
                target_id,
                name: str_field(record, &["Name", "name"], "Unknown target"),
                description: str_field(record, &["Description", "description"], ""),
                position: GeoPoint {
                    lat: f64_field(record, &["x", "Lat"], 0.0),
                    lng: f64_field(record, &["y", "Lng"], 0.0),
                    alt: field(record, &["h", "Alt"]).and_then(Value::as_f64),
                },
                health: health.min(max_health),
                max_health,
            })
        })
        .collect()
}

/// Decode the `/firepower-units` payload. Weapon collections start
/// empty and are filled by `group_weapons`.
pub fn decode_firepower_units(payload: &Value) -> Vec<FirepowerUnit> {
    records(payload)
        .iter()
        .filter_map(|record| {
            let Some(firepower_id) = id_field(record, &["ID", "firepower_id"]) else {
                log::warn!("dropping firepower record without id: {record}");
                return None;
            };
            Some(FirepowerUnit {
                firepower_id,
                name: str_field(record, &["Name", "name"], "Unknown unit"),
                description: str_field(record, &["Description", "description"], ""),
                unit_type: str_field(record, &["Type", "type"], "firepower"),
                position: GeoPoint {
                    lat: f64_field(record, &["Lat", "lat"], 0.0),
                    lng: f64_field(record, &["Lng", "lng"], 0.0),
                    alt: field(record, &["Alt", "alt"]).and_then(Value::as_f64),
                },
                weapons: Vec::new(),
            })
        })
        .collect()
}

/// Decode the `/weapons` payload into `(owning firepower id, weapon)`
/// pairs. Weapons without an owner cannot be grouped and are dropped.
pub fn decode_weapons(payload: &Value) -> Vec<(String, Weapon)> {
    records(payload)
        .iter()
        .filter_map(|record| {
            let Some(weapon_id) = id_field(record, &["ID", "weapon_id"]) else {
                log::warn!("dropping weapon record without id: {record}");
                return None;
            };
            let Some(owner) = id_field(record, &["combat_id", "firepower_id"]) else {
                log::warn!("dropping weapon {weapon_id} without owning unit");
                return None;
            };
            Some((
                owner,
                Weapon {
                    weapon_id,
                    name: str_field(record, &["Name", "name"], "Unnamed weapon"),
                    status: normalize::weapon_status(code_field(record, &["status"], 0)),
                    ammo_type: normalize::ammo_type(code_field(record, &["ammo_type"], 0)),
                    ammo_count: count_field(record, &["ammo"]),
                    min_range: f64_field(record, &["min_range"], 0.0),
                    max_range: f64_field(record, &["max_range"], 50.0),
                    reload_time: f64_field(record, &["reload_time"], 0.0),
                    speed: f64_field(record, &["speed"], 0.0),
                },
            ))
        })
        .collect()
}

/// Decode the `/tasks` payload. Also accepts the publish endpoint's
/// `{ "tasks": [...] }` wrapper.
pub fn decode_tasks(payload: &Value) -> Vec<Task> {
    let payload = payload.get("tasks").unwrap_or(payload);
    records(payload).iter().filter_map(decode_task).collect()
}

/// Decode a single task record (also used by accept/complete replies).
pub fn decode_task(record: &Value) -> Option<Task> {
    let Some(task_id) = id_field(record, &["ID", "task_id"]) else {
        log::warn!("dropping task record without id: {record}");
        return None;
    };
    Some(Task {
        task_id,
        status: normalize::task_status(code_field(record, &["status"], 0)),
        firepower_id: id_field(record, &["combat_id", "firepower_id"]).unwrap_or_default(),
        weapon_id: id_field(record, &["weapon_id"]).unwrap_or_default(),
        target_id: id_field(record, &["target_id"]).unwrap_or_default(),
        ammo_type: normalize::ammo_type(code_field(record, &["ammo_type"], -1)),
        ammo_count: count_field(record, &["ammo_count"]),
        start_time: opt_string_field(record, "start_time"),
        end_time: opt_string_field(record, "end_time"),
    })
}

/// Attach weapons to their owning units. A weapon id may appear at most
/// once within a unit: the first occurrence wins, duplicates are
/// dropped. Weapons naming an unknown unit are dropped.
pub fn group_weapons(units: &mut [FirepowerUnit], weapons: Vec<(String, Weapon)>) {
    for (owner, weapon) in weapons {
        let Some(unit) = units.iter_mut().find(|u| u.firepower_id == owner) else {
            log::warn!(
                "weapon {} names unknown firepower unit {owner}, dropping",
                weapon.weapon_id
            );
            continue;
        };
        if unit.weapon(&weapon.weapon_id).is_some() {
            log::warn!(
                "duplicate weapon id {} in unit {owner}, keeping first",
                weapon.weapon_id
            );
            continue;
        }
        unit.weapons.push(weapon);
    }
}
