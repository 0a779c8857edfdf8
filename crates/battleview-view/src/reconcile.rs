//! Snapshot reconciliation — merges a freshly fetched snapshot into the
//! view store while preserving selection identity and in-flight
//! animation state.
//!
//! Reconciliation has no failure path: on a backend fetch failure the
//! caller never invokes it, keeping the last good state on screen.

use battleview_core::model::Snapshot;

use crate::store::{Collections, ViewStore};

/// Merge `snapshot` into `store`.
///
/// `animating_target_ids` names targets whose displayed health is
/// currently owned by a live engagement animation: for those, the
/// incoming health is overridden with the displayed value so a refresh
/// can neither heal nor double-damage a target mid-animation. The
/// sequencer alone advances that health, at settle time.
pub fn reconcile(store: &mut ViewStore, mut snapshot: Snapshot, animating_target_ids: &[String]) {
    for id in animating_target_ids {
        if let Some(displayed) = store.target_health(id) {
            if let Some(incoming) = snapshot.targets.iter_mut().find(|t| &t.target_id == id) {
                if incoming.health != displayed {
                    log::debug!(
                        "holding displayed health {} for animating target {} (snapshot says {})",
                        displayed,
                        id,
                        incoming.health
                    );
                    incoming.health = displayed;
                }
            }
        }
    }

    store.replace_all(Collections::from(snapshot));
    repair_selection(store);
}

/// Selection repair: for each selection kind independently, keep the
/// selected id if it still resolves, otherwise fall back to the first
/// element of the new collection, otherwise clear.
fn repair_selection(store: &mut ViewStore) {
    let task_id = repaired_id(
        store.selection().task_id.as_deref(),
        store.tasks().iter().map(|t| t.task_id.as_str()),
    );
    let target_id = repaired_id(
        store.selection().target_id.as_deref(),
        store.targets().iter().map(|t| t.target_id.as_str()),
    );
    let firepower_id = repaired_id(
        store.selection().firepower_id.as_deref(),
        store.firepowers().iter().map(|fp| fp.firepower_id.as_str()),
    );

    store.select_task(task_id);
    store.select_target(target_id);
    store.select_firepower(firepower_id);
}

fn repaired_id<'a>(
    selected: Option<&str>,
    mut ids: impl Iterator<Item = &'a str>,
) -> Option<String> {
    let selected = selected?;
    let mut first = None;
    for id in &mut ids {
        if first.is_none() {
            first = Some(id);
        }
        if id == selected {
            // Re-resolved against the new collection, not cached.
            return Some(selected.to_owned());
        }
    }
    first.map(str::to_owned)
}
