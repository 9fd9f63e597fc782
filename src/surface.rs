//! Drawing-surface abstraction and an in-memory display-list backend.
//!
//! The loader only ever needs three primitives: fill a circle, translate the
//! origin, and blit an offscreen layer at an offset. [`Surface`] captures those
//! plus layer allocation, so the same render path drives a browser canvas
//! ([`crate::web`]) or the [`RecordingSurface`] used by hosts that retain a
//! display list and by the tests.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::config::Color;
use crate::error::SurfaceError;

/// Anything filled circles can be drawn into: the main surface or a layer.
pub trait Canvas {
    /// Fill a circle centered at `(cx, cy)`.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the backend rejects the call.
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) -> Result<(), SurfaceError>;
}

/// An on-screen drawing target that can also allocate and blit offscreen layers.
pub trait Surface: Canvas {
    /// Offscreen raster owned by the caller between frames.
    type Layer: Canvas;

    /// Shift the origin for every following call in this frame.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the backend rejects the call.
    fn translate(&mut self, dx: f64, dy: f64) -> Result<(), SurfaceError>;

    /// Allocate an empty layer. Both dimensions are positive.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Layer`] if the backend cannot allocate it.
    fn create_layer(&mut self, width: u32, height: u32) -> Result<Self::Layer, SurfaceError>;

    /// Draw `layer` with its top-left corner at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the backend rejects the call.
    fn draw_layer(&mut self, layer: &Self::Layer, x: f64, y: f64) -> Result<(), SurfaceError>;
}

/// A single recorded primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Translate { dx: f64, dy: f64 },
    FillCircle { cx: f64, cy: f64, radius: f64, color: Color },
    DrawLayer { layer_id: u64, x: f64, y: f64 },
}

/// Retained offscreen layer: its own display list of circles.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedLayer {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl Canvas for RecordedLayer {
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::FillCircle { cx, cy, radius, color });
        Ok(())
    }
}

/// Display-list surface: records every call instead of rasterizing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    layers_created: u64,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last [`Self::clear`].
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded commands, keeping the layer counter.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Take the recorded commands, leaving the surface empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// How many layers this surface has allocated.
    #[must_use]
    pub fn layers_created(&self) -> u64 {
        self.layers_created
    }

    /// Centers of the circles drawn directly on this surface, in call order.
    #[must_use]
    pub fn circles(&self) -> Vec<(f64, f64)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillCircle { cx, cy, .. } => Some((*cx, *cy)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingSurface {
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::FillCircle { cx, cy, radius, color });
        Ok(())
    }
}

impl Surface for RecordingSurface {
    type Layer = RecordedLayer;

    fn translate(&mut self, dx: f64, dy: f64) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::Translate { dx, dy });
        Ok(())
    }

    fn create_layer(&mut self, width: u32, height: u32) -> Result<Self::Layer, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::Layer { width, height, reason: "empty layer".into() });
        }
        self.layers_created += 1;
        Ok(RecordedLayer { id: self.layers_created, width, height, commands: Vec::new() })
    }

    fn draw_layer(&mut self, layer: &Self::Layer, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::DrawLayer { layer_id: layer.id, x, y });
        Ok(())
    }
}
