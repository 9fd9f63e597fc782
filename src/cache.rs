//! Offscreen cache of the stationary dots shown in loading mode.
//!
//! The `n − 1` dots that are not traveling never change shape between
//! resizes, so they are drawn once into a layer and blitted every frame at a
//! horizontal offset.

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;

use tracing::debug;

use crate::config::{Color, DotLayout};
use crate::consts::EDGE_INSET_RADII;
use crate::error::SurfaceError;
use crate::geometry::ViewportMetrics;
use crate::surface::{Canvas, Surface};

/// Owns the current static-dot layer, if one has been built.
#[derive(Debug)]
pub struct StaticDotCache<L> {
    layer: Option<L>,
    generation: u64,
}

impl<L> Default for StaticDotCache<L> {
    fn default() -> Self {
        Self { layer: None, generation: 0 }
    }
}

impl<L: Canvas> StaticDotCache<L> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached layer with a fresh one for `metrics`.
    ///
    /// The layer spans `(width − 4r) × height`, exactly covering the rest
    /// positions of dots `0 … n−2`. With a single dot there is nothing to
    /// cache and the layer is cleared.
    ///
    /// # Errors
    ///
    /// Propagates [`SurfaceError`] from layer allocation or drawing. On error
    /// the previous layer has already been discarded.
    pub fn rebuild<S>(
        &mut self,
        surface: &mut S,
        metrics: &ViewportMetrics,
        layout: &DotLayout,
        color: Color,
    ) -> Result<(), SurfaceError>
    where
        S: Surface<Layer = L>,
    {
        self.layer = None;
        self.generation += 1;

        let stationary = layout.dot_count.saturating_sub(1);
        let (width, height) = layer_size(metrics, layout);
        if stationary == 0 || width == 0 || height == 0 {
            debug!(generation = self.generation, "static dot cache empty");
            return Ok(());
        }

        let mut layer = surface.create_layer(width, height)?;
        for i in 0..stationary {
            layer.fill_circle(layout.rest_x(i), metrics.center_y, layout.dot_radius, color)?;
        }
        self.layer = Some(layer);

        debug!(generation = self.generation, width, height, dots = stationary, "static dot cache rebuilt");
        Ok(())
    }

    /// The current layer. `None` before the first rebuild or with one dot.
    #[must_use]
    pub fn layer(&self) -> Option<&L> {
        self.layer.as_ref()
    }

    /// Number of rebuilds so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Pixel size of the static layer, rounded up.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn layer_size(metrics: &ViewportMetrics, layout: &DotLayout) -> (u32, u32) {
    let width = metrics.width - 2.0 * EDGE_INSET_RADII * layout.dot_radius;
    let to_px = |v: f64| if v > 0.0 { v.ceil() as u32 } else { 0 };
    (to_px(width), to_px(metrics.height))
}
