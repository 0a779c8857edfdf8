//! Viewport control — one-shot auto-fit and explicit zoom sync.

use battleview_core::constants::{
    BASE_MAP_ZOOM, FIT_MAX_ZOOM, FIT_PADDING_PX, ZOOM_FACTOR_MAX, ZOOM_FACTOR_MIN,
};
use battleview_core::events::RenderOp;
use battleview_core::types::GeoPoint;

/// Computes fit/zoom requests against the set of renderable coordinates.
///
/// Auto-fit runs exactly once, on the first non-empty coordinate set;
/// re-fitting on every refresh would fight user-driven pan and zoom.
#[derive(Debug, Clone)]
pub struct ViewportController {
    fitted: bool,
    zoom_factor: f64,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self {
            fitted: false,
            zoom_factor: 1.0,
        }
    }
}

impl ViewportController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    /// Request a bounds fit on first data arrival. Returns `None` once
    /// latched, or while no valid coordinates exist yet.
    pub fn maybe_fit(&mut self, points: impl IntoIterator<Item = GeoPoint>) -> Option<RenderOp> {
        if self.fitted {
            return None;
        }
        let points: Vec<GeoPoint> = points.into_iter().filter(|p| p.is_valid()).collect();
        if points.is_empty() {
            return None;
        }
        self.fitted = true;
        Some(RenderOp::FitBounds {
            points,
            padding_px: FIT_PADDING_PX,
            max_zoom: FIT_MAX_ZOOM,
        })
    }

    /// Explicit user zoom. Clamped to the allowed factor range; the
    /// default factor (1.0) requests nothing so auto-fit and manual pan
    /// stay undisturbed.
    pub fn set_zoom_factor(&mut self, factor: f64) -> Option<RenderOp> {
        if !factor.is_finite() {
            return None;
        }
        self.zoom_factor = factor.clamp(ZOOM_FACTOR_MIN, ZOOM_FACTOR_MAX);
        if self.zoom_factor == 1.0 {
            return None;
        }
        Some(RenderOp::SetZoom {
            level: BASE_MAP_ZOOM + (self.zoom_factor - 1.0) * 2.0,
        })
    }
}
