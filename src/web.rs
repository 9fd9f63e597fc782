//! Browser backend: [`Surface`] over a Canvas2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! The static-dot layer is a detached `<canvas>` element with its own 2D
//! context, blitted with `drawImage`. Every fallible Canvas2D call maps its
//! `JsValue` error into [`SurfaceError`].

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::Color;
use crate::error::SurfaceError;
use crate::surface::{Canvas, Surface};

/// Offscreen canvas holding pre-rendered dots.
#[derive(Debug, Clone)]
pub struct CanvasLayer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasLayer {
    #[must_use]
    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Canvas for CanvasLayer {
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) -> Result<(), SurfaceError> {
        fill_circle(&self.ctx, cx, cy, radius, color)
    }
}

impl Canvas for CanvasRenderingContext2d {
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) -> Result<(), SurfaceError> {
        fill_circle(self, cx, cy, radius, color)
    }
}

impl Surface for CanvasRenderingContext2d {
    type Layer = CanvasLayer;

    fn translate(&mut self, dx: f64, dy: f64) -> Result<(), SurfaceError> {
        CanvasRenderingContext2d::translate(self, dx, dy).map_err(draw_err)
    }

    fn create_layer(&mut self, width: u32, height: u32) -> Result<Self::Layer, SurfaceError> {
        let layer_err = |reason: String| SurfaceError::Layer { width, height, reason };

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| layer_err("no document".into()))?;
        let canvas = document
            .create_element("canvas")
            .map_err(|e| layer_err(format!("{e:?}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| layer_err("element is not a canvas".into()))?;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx = context_2d(&canvas).map_err(|e| layer_err(e.to_string()))?;
        Ok(CanvasLayer { canvas, ctx })
    }

    fn draw_layer(&mut self, layer: &Self::Layer, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.draw_image_with_html_canvas_element(&layer.canvas, x, y).map_err(draw_err)
    }
}

/// Fetch the 2D context of `canvas`.
///
/// # Errors
///
/// Returns [`SurfaceError::Draw`] if the element has no 2D context.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, SurfaceError> {
    canvas
        .get_context("2d")
        .map_err(draw_err)?
        .ok_or_else(|| SurfaceError::Draw("2d context unavailable".into()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| SurfaceError::Draw("context is not CanvasRenderingContext2d".into()))
}

fn fill_circle(
    ctx: &CanvasRenderingContext2d,
    cx: f64,
    cy: f64,
    radius: f64,
    color: Color,
) -> Result<(), SurfaceError> {
    ctx.set_fill_style_str(&color.to_css());
    ctx.begin_path();
    ctx.arc(cx, cy, radius, 0.0, TAU).map_err(draw_err)?;
    ctx.fill();
    Ok(())
}

pub(crate) fn draw_err(e: JsValue) -> SurfaceError {
    SurfaceError::Draw(format!("{e:?}"))
}
