//! Viewport metrics and the travel path of the moving dot.
//!
//! All coordinates are content-local: the origin is the top-left corner of the
//! `(3n+1)·r × 20·r` content box, which [`ViewportMetrics`] centers inside the
//! host viewport. The travel path is a cubic Bézier arch from the first rest
//! position to the last one. It is flattened once per resize into a cumulative
//! length table so that motion can be sampled by arc length, which keeps the
//! dot at constant visual speed.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::config::DotLayout;
use crate::consts::{CONTENT_HEIGHT_RADII, DOT_PITCH_RADII, EDGE_INSET_RADII, PATH_FLATTEN_SEGMENTS};
use crate::error::LoaderError;

/// A point in content-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Content box size and its placement inside the host viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    /// Content width: `(3n+1)·r`.
    pub width: f64,
    /// Content height: `20·r`.
    pub height: f64,
    /// Vertical rest line of the dots.
    pub center_y: f64,
    /// Horizontal offset that centers the content in the viewport.
    pub translation_x: f64,
    /// Vertical offset that centers the content in the viewport.
    pub translation_y: f64,
}

impl ViewportMetrics {
    /// Derive metrics for a host viewport of `view_width × view_height`.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::InvalidViewport`] when either dimension is not
    /// a positive finite number.
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(view_width: f64, view_height: f64, layout: &DotLayout) -> Result<Self, LoaderError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(view_width) || !valid(view_height) {
            return Err(LoaderError::InvalidViewport { width: view_width, height: view_height });
        }

        let r = layout.dot_radius;
        let width = (DOT_PITCH_RADII * layout.dot_count as f64 + 1.0) * r;
        let height = CONTENT_HEIGHT_RADII * r;
        Ok(Self {
            width,
            height,
            center_y: height / 2.0,
            translation_x: view_width / 2.0 - width / 2.0,
            translation_y: view_height / 2.0 - height / 2.0,
        })
    }
}

/// The arch traveled by the moving dot, with its arc-length table.
#[derive(Debug, Clone)]
pub struct TravelPath {
    /// Start, two control points, end.
    controls: [Point; 4],
    /// Flattened polyline vertices, `PATH_FLATTEN_SEGMENTS + 1` of them.
    samples: Vec<Point>,
    /// Cumulative distance from the start to each sample.
    cumulative: Vec<f64>,
}

impl TravelPath {
    /// Build the arch for the given metrics.
    ///
    /// Runs from `(2r, center_y)` to `(width − 2r, center_y)` with both control
    /// points at `(width / 2, 0)`.
    #[must_use]
    pub fn rebuild(metrics: &ViewportMetrics, layout: &DotLayout) -> Self {
        let inset = EDGE_INSET_RADII * layout.dot_radius;
        let apex = Point::new(metrics.width / 2.0, 0.0);
        Self::from_controls([
            Point::new(inset, metrics.center_y),
            apex,
            apex,
            Point::new(metrics.width - inset, metrics.center_y),
        ])
    }

    /// Build a path from explicit cubic control points and measure it.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_controls(controls: [Point; 4]) -> Self {
        let mut samples = Vec::with_capacity(PATH_FLATTEN_SEGMENTS + 1);
        let mut cumulative = Vec::with_capacity(PATH_FLATTEN_SEGMENTS + 1);
        let mut total = 0.0;
        for i in 0..=PATH_FLATTEN_SEGMENTS {
            let p = eval_cubic(&controls, i as f64 / PATH_FLATTEN_SEGMENTS as f64);
            if let Some(prev) = samples.last() {
                total += p.distance(*prev);
            }
            samples.push(p);
            cumulative.push(total);
        }
        Self { controls, samples, cumulative }
    }

    /// Total arc length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn start(&self) -> Point {
        self.controls[0]
    }

    #[must_use]
    pub fn end(&self) -> Point {
        self.controls[3]
    }

    /// Raw parametric evaluation at `t ∈ [0, 1]` (not arc-length uniform).
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point {
        eval_cubic(&self.controls, t.clamp(0.0, 1.0))
    }

    /// The point reached after traveling `distance` along the path.
    ///
    /// `distance` is clamped to `[0, length]`.
    #[must_use]
    pub fn position_at_distance(&self, distance: f64) -> Point {
        let length = self.length();
        if distance.is_nan() || distance <= 0.0 || length <= 0.0 {
            return self.samples.first().copied().unwrap_or(self.controls[0]);
        }
        if distance >= length {
            return self.samples.last().copied().unwrap_or(self.controls[3]);
        }

        // First sample whose cumulative distance reaches `distance`; always >= 1 here.
        let hi = self.cumulative.partition_point(|&d| d < distance).max(1);
        let lo = hi - 1;
        let span = self.cumulative[hi] - self.cumulative[lo];
        let t = if span > 0.0 { (distance - self.cumulative[lo]) / span } else { 0.0 };
        self.samples[lo].lerp(self.samples[hi], t)
    }
}

fn eval_cubic(c: &[Point; 4], t: f64) -> Point {
    let mt = 1.0 - t;
    let w0 = mt * mt * mt;
    let w1 = 3.0 * mt * mt * t;
    let w2 = 3.0 * mt * t * t;
    let w3 = t * t * t;
    Point {
        x: w0 * c[0].x + w1 * c[1].x + w2 * c[2].x + w3 * c[3].x,
        y: w0 * c[0].y + w1 * c[1].y + w2 * c[2].y + w3 * c[3].y,
    }
}
