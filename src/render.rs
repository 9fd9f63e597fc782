//! Rendering: issues the draw calls for one frame.
//!
//! This module receives read-only views of the progress, path, and static
//! cache and turns them into primitive calls on a [`Surface`]. It does not
//! mutate any loader state. Every frame starts with the centering translation,
//! so all following coordinates are content-local.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::{Deserialize, Serialize};

use crate::cache::StaticDotCache;
use crate::config::{Color, DotLayout};
use crate::consts::DOT_PITCH_RADII;
use crate::driver::AnimationState;
use crate::error::SurfaceError;
use crate::geometry::{Point, TravelPath, ViewportMetrics};
use crate::surface::Surface;

/// Which picture the loader is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualMode {
    /// Dots drop into place as the host-driven drag progress grows.
    Drag,
    /// One dot hops along the arch while the rest shift one slot.
    #[default]
    Loading,
}

/// Per-resize inputs shared by both modes.
#[derive(Debug, Clone, Copy)]
pub struct FrameParams {
    pub metrics: ViewportMetrics,
    pub layout: DotLayout,
    pub color: Color,
}

/// Draw one frame.
///
/// # Errors
///
/// Returns `Err` if any surface call fails.
pub fn render_frame<S: Surface>(
    surface: &mut S,
    mode: VisualMode,
    progress: &AnimationState,
    path: &TravelPath,
    cache: &StaticDotCache<S::Layer>,
    frame: &FrameParams,
) -> Result<(), SurfaceError> {
    surface.translate(frame.metrics.translation_x, frame.metrics.translation_y)?;

    match mode {
        VisualMode::Drag => draw_drag(surface, progress.fraction, frame),
        VisualMode::Loading => draw_loading(surface, progress, path, cache, frame),
    }
}

// =============================================================
// Drag
// =============================================================

fn draw_drag<S: Surface>(surface: &mut S, fraction: f64, frame: &FrameParams) -> Result<(), SurfaceError> {
    let layout = &frame.layout;
    for i in 0..layout.dot_count {
        let local = drag_local_fraction(fraction, i, layout);
        surface.fill_circle(layout.rest_x(i), frame.metrics.center_y * local, layout.dot_radius, frame.color)?;
    }
    Ok(())
}

/// How far dot `index` has dropped toward the rest line for a drag `fraction`.
///
/// Capped at 1 only. Dots whose turn has not come yet get a negative value
/// and sit above the content box.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn drag_local_fraction(fraction: f64, index: usize, layout: &DotLayout) -> f64 {
    let one_full = layout.one_full_fraction();
    let local = (fraction - index as f64 * one_full) / one_full;
    local.min(1.0)
}

// =============================================================
// Loading
// =============================================================

fn draw_loading<S: Surface>(
    surface: &mut S,
    progress: &AnimationState,
    path: &TravelPath,
    cache: &StaticDotCache<S::Layer>,
    frame: &FrameParams,
) -> Result<(), SurfaceError> {
    if let Some(layer) = cache.layer() {
        surface.draw_layer(layer, conveyor_offset(progress.value, &frame.layout), 0.0)?;
    }

    let dot = traveling_dot(progress, path, &frame.metrics);
    surface.fill_circle(dot.x, dot.y, frame.layout.dot_radius, frame.color)
}

/// Horizontal offset of the stationary row: one full pitch at `value = 1`, none at `0`.
#[must_use]
pub fn conveyor_offset(value: f64, layout: &DotLayout) -> f64 {
    DOT_PITCH_RADII * layout.dot_radius * value
}

/// Position of the traveling dot, mirrored below the rest line on alternate cycles.
#[must_use]
pub fn traveling_dot(progress: &AnimationState, path: &TravelPath, metrics: &ViewportMetrics) -> Point {
    let p = path.position_at_distance(path.length() * progress.fraction);
    let y = if progress.through_above { p.y } else { metrics.height - p.y };
    Point::new(p.x, y)
}
