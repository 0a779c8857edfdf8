//! User commands sent from the rendering surface to the client engine.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible user actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UserCommand {
    // --- Data ---
    /// Re-fetch the full snapshot from the backend. Multiple requests
    /// queued within one tick coalesce into a single round trip.
    Refresh,

    // --- Selection ---
    /// Select a target by id (clicking its marker). Destroyed targets
    /// are ignored.
    SelectTarget { target_id: String },
    /// Select a task by id; the task list jumps to the containing page.
    SelectTask { task_id: String },
    /// Select a firepower unit by id.
    SelectFirepower { firepower_id: String },

    // --- Task list navigation ---
    /// Go to a task list page (clamped to the valid range).
    TaskPage { page: usize },

    // --- Engagement ---
    /// Publish tasks via the backend decision endpoint. The returned
    /// list replaces the task collection; the first task is selected.
    PublishTasks,
    /// Trigger backend-side task progression, then refresh.
    AutoRun,
    /// Fire a weapon at a target. Validated locally before any backend
    /// call; on acknowledgment an engagement animation starts.
    Fire {
        firepower_id: String,
        weapon_id: String,
        target_id: String,
        ammo_count: u32,
        damage: u32,
    },
    /// Accept a single task (dormant path, kept for parity with the
    /// backend interface).
    AcceptTask { task_id: String },
    /// Complete a single task (dormant path).
    CompleteTask { task_id: String },

    // --- Viewport ---
    /// Explicit user zoom factor; only non-default input (factor != 1)
    /// requests a zoom change.
    SetZoomFactor { factor: f64 },
}
