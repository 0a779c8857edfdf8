//! Client constants and tuning parameters.

// --- Engagement animation ---

/// Projectile flight time from launcher to target (milliseconds).
pub const FLIGHT_DURATION_MS: f64 = 1500.0;

/// Impact visual hold before damage settles (milliseconds).
pub const IMPACT_SETTLE_MS: f64 = 600.0;

// --- Task list windowing ---

/// Tasks shown per page.
pub const TASK_PAGE_SIZE: usize = 3;

// --- Viewport ---

/// Padding around the fitted bounds (pixels, all edges).
pub const FIT_PADDING_PX: u32 = 100;

/// Zoom cap when auto-fitting; low values keep a wide overview.
pub const FIT_MAX_ZOOM: u8 = 5;

/// Map zoom level corresponding to the default zoom factor.
pub const BASE_MAP_ZOOM: f64 = 13.0;

/// User zoom factor range.
pub const ZOOM_FACTOR_MIN: f64 = 0.5;
pub const ZOOM_FACTOR_MAX: f64 = 2.0;

// --- Ingestion ---

/// Health assumed for target records that omit the field.
pub const DEFAULT_TARGET_HEALTH: u32 = 100;
