//! Fundamental geographic and time types.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A WGS-84 coordinate as reported by the backend.
/// Altitude is carried for display only and may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    pub alt: Option<f64>,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            alt: None,
        }
    }

    /// Whether this is a plausible map coordinate.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat.abs() <= 90.0
            && self.lng.abs() <= 180.0
    }

    /// Linear interpolation toward `other` at `t` in [0, 1].
    ///
    /// Used for projectile flight; over battlefield distances the
    /// straight-line approximation is indistinguishable from a geodesic.
    pub fn lerp(&self, other: &GeoPoint, t: f64) -> GeoPoint {
        let t = t.clamp(0.0, 1.0);
        GeoPoint {
            lat: self.lat + (other.lat - self.lat) * t,
            lng: self.lng + (other.lng - self.lng) * t,
            alt: None,
        }
    }
}

/// Parse a backend timestamp string to epoch milliseconds.
///
/// Accepts RFC 3339 as well as the backend's zone-less
/// `YYYY-MM-DDTHH:MM:SS` variant (interpreted as UTC). Returns `None`
/// for absent or unparseable input; callers that need a sort key treat
/// `None` as time 0 so such records order as the oldest.
pub fn parse_timestamp_ms(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc().timestamp_millis());
    }
    None
}
