//! View model store — the single mutable shared resource of the client.

use serde::{Deserialize, Serialize};

use battleview_core::model::{FirepowerUnit, Snapshot, Target, Task, Weapon};

/// The three authoritative collections, swapped as one unit so readers
/// never observe targets from snapshot N next to tasks from N-1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collections {
    pub targets: Vec<Target>,
    pub firepowers: Vec<FirepowerUnit>,
    pub tasks: Vec<Task>,
}

impl From<Snapshot> for Collections {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            targets: snapshot.targets,
            firepowers: snapshot.firepowers,
            tasks: snapshot.tasks,
        }
    }
}

/// Current selection, by id. A selected id may point at an entity that
/// the next snapshot no longer contains; lookups then return `None` and
/// reconciliation repairs the selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Selection {
    pub target_id: Option<String>,
    pub task_id: Option<String>,
    pub firepower_id: Option<String>,
}

/// Holds the collections plus selection state.
///
/// The store itself never clears a selection pointing at a vanished id;
/// that policy lives in reconciliation. It only guarantees that lookups
/// against missing ids return `None`.
#[derive(Debug, Clone, Default)]
pub struct ViewStore {
    collections: Collections,
    selection: Selection,
}

impl ViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically swap all three collections. The single assignment is
    /// the atomicity guarantee: there is no intermediate state in which
    /// only some collections have been replaced.
    pub fn replace_all(&mut self, collections: Collections) {
        self.collections = collections;
    }

    // --- Read accessors ---

    pub fn targets(&self) -> &[Target] {
        &self.collections.targets
    }

    pub fn firepowers(&self) -> &[FirepowerUnit] {
        &self.collections.firepowers
    }

    pub fn tasks(&self) -> &[Task] {
        &self.collections.tasks
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn target(&self, target_id: &str) -> Option<&Target> {
        self.collections
            .targets
            .iter()
            .find(|t| t.target_id == target_id)
    }

    pub fn firepower(&self, firepower_id: &str) -> Option<&FirepowerUnit> {
        self.collections
            .firepowers
            .iter()
            .find(|fp| fp.firepower_id == firepower_id)
    }

    pub fn weapon(&self, firepower_id: &str, weapon_id: &str) -> Option<&Weapon> {
        self.firepower(firepower_id)?.weapon(weapon_id)
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.collections.tasks.iter().find(|t| t.task_id == task_id)
    }

    // --- Selection ---

    pub fn select_target(&mut self, target_id: Option<String>) {
        self.selection.target_id = target_id;
    }

    pub fn select_task(&mut self, task_id: Option<String>) {
        self.selection.task_id = task_id;
    }

    pub fn select_firepower(&mut self, firepower_id: Option<String>) {
        self.selection.firepower_id = firepower_id;
    }

    // --- Health adjustment (animation settle path) ---

    /// Apply damage to a target, flooring health at zero. Returns the
    /// new health, or `None` if the target no longer exists.
    pub fn apply_damage(&mut self, target_id: &str, damage: u32) -> Option<u32> {
        let target = self
            .collections
            .targets
            .iter_mut()
            .find(|t| t.target_id == target_id)?;
        target.health = target.health.saturating_sub(damage);
        Some(target.health)
    }

    /// Displayed health of a target, if it exists.
    pub fn target_health(&self, target_id: &str) -> Option<u32> {
        self.target(target_id).map(|t| t.health)
    }
}
