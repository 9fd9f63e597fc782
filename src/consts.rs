//! Shared numeric constants for the loader.

// ── Layout ──────────────────────────────────────────────────────

/// Default number of dots in the indicator.
pub const DEFAULT_DOT_COUNT: usize = 6;

/// Default dot radius in CSS pixels.
pub const DEFAULT_DOT_RADIUS: f64 = 15.0;

/// Distance between neighbouring dot centers, in radii (one diameter plus a one-radius gap).
pub const DOT_PITCH_RADII: f64 = 3.0;

/// Content height in radii: ten dot diameters.
pub const CONTENT_HEIGHT_RADII: f64 = 20.0;

/// Inset of the first and last rest positions from the content edge, in radii.
pub const EDGE_INSET_RADII: f64 = 2.0;

// ── Animation ───────────────────────────────────────────────────

/// Default length of one loading cycle in milliseconds.
pub const DEFAULT_CYCLE_DURATION_MS: f64 = 700.0;

// ── Geometry ────────────────────────────────────────────────────

/// Number of line segments used to flatten the travel path for arc-length lookup.
pub const PATH_FLATTEN_SEGMENTS: usize = 256;
