//! Error types shared across the loader.
//!
//! Every failure here is a caller contract violation (rendering before a size
//! is known, a degenerate viewport, bad configuration) or a backend drawing
//! failure surfaced by a [`crate::surface::Surface`] implementation.

/// Failure reported by a drawing backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The backend rejected a drawing call.
    #[error("drawing call failed: {0}")]
    Draw(String),
    /// The backend could not allocate an offscreen layer.
    #[error("failed to allocate {width}x{height} layer: {reason}")]
    Layer { width: u32, height: u32, reason: String },
}

/// Error returned by [`crate::engine::LoaderCore`] and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// The host reported a viewport with a non-positive or non-finite dimension.
    #[error("invalid viewport size: {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
    /// A frame was requested before the first viewport size notification.
    #[error("frame requested before the viewport was sized")]
    NotSized,
    /// Configuration values are out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// Configuration JSON could not be parsed.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    /// The drawing backend failed.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
