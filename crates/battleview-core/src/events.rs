//! Events emitted by the engine for the rendering surface and UI.

use serde::{Deserialize, Serialize};

use crate::enums::AlertLevel;
use crate::types::GeoPoint;

/// Requests to the rendering surface, emitted per tick.
///
/// These describe the desired state of the dynamic visuals; static
/// markers (units, targets) are derived from the frame's collections
/// by the renderer itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RenderOp {
    /// Place or move the projectile marker.
    PlaceProjectile { position: GeoPoint },
    /// Draw the attack line between launcher and target.
    DrawAttackLine { from: GeoPoint, to: GeoPoint },
    /// Remove the attack line.
    ClearAttackLine,
    /// Show the impact visual at a coordinate.
    ImpactAt { position: GeoPoint },
    /// Remove the impact visual.
    ClearImpact,
    /// Fit the view to a coordinate set. Emitted once, on first data.
    FitBounds {
        points: Vec<GeoPoint>,
        padding_px: u32,
        max_zoom: u8,
    },
    /// Explicit zoom level change (user-driven).
    SetZoom { level: f64 },
}

/// Alert for the UI banner/alert queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}
