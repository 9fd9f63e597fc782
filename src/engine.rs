use tracing::{debug, warn};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::cache::StaticDotCache;
use crate::config::LoaderConfig;
use crate::driver::{AnimationDriver, AnimationState};
use crate::error::LoaderError;
use crate::geometry::{TravelPath, ViewportMetrics};
use crate::render::{self, FrameParams, VisualMode};
use crate::surface::Surface;
use crate::web;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from loader inputs for the host to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    RenderNeeded,
}

/// Geometry that only exists once the host has reported a size.
#[derive(Debug, Clone)]
struct SizedGeometry {
    metrics: ViewportMetrics,
    path: TravelPath,
}

/// Core loader state: everything that does not depend on a browser.
///
/// Generic over the surface so it can be driven by [`crate::surface::RecordingSurface`]
/// in tests and by a Canvas2D context in the browser.
pub struct LoaderCore<S: Surface> {
    config: LoaderConfig,
    mode: VisualMode,
    drag_fraction: f64,
    driver: AnimationDriver,
    sized: Option<SizedGeometry>,
    cache: StaticDotCache<S::Layer>,
}

impl<S: Surface> LoaderCore<S> {
    /// Create a loader in loading mode with a stopped animation.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: LoaderConfig) -> Result<Self, LoaderError> {
        config.validate()?;
        Ok(Self {
            config,
            mode: VisualMode::default(),
            drag_fraction: 0.0,
            driver: AnimationDriver::new(config.cycle_duration_ms),
            sized: None,
            cache: StaticDotCache::new(),
        })
    }

    // --- Host notifications ---

    /// Recompute metrics, rebuild the travel path, and re-render the static dots.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::InvalidViewport`] for a non-positive size (the
    /// previous geometry is kept), or a surface error from the cache rebuild.
    pub fn on_viewport_resized(&mut self, surface: &mut S, width: f64, height: f64) -> Result<Action, LoaderError> {
        let layout = self.config.layout();
        let metrics = ViewportMetrics::compute(width, height, &layout).inspect_err(|e| {
            warn!(error = %e, "rejected viewport resize");
        })?;

        let path = TravelPath::rebuild(&metrics, &layout);
        debug!(width, height, content_width = metrics.width, path_length = path.length(), "viewport resized");

        self.sized = None;
        self.cache.rebuild(surface, &metrics, &layout, self.config.dot_color)?;
        self.sized = Some(SizedGeometry { metrics, path });
        Ok(Action::RenderNeeded)
    }

    /// Draw the current frame.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::NotSized`] before the first successful resize,
    /// or a surface error from drawing.
    pub fn render(&self, surface: &mut S) -> Result<(), LoaderError> {
        let Some(sized) = self.sized.as_ref() else {
            warn!("frame requested before viewport was sized");
            return Err(LoaderError::NotSized);
        };
        let frame = FrameParams {
            metrics: sized.metrics,
            layout: self.config.layout(),
            color: self.config.dot_color,
        };
        render::render_frame(surface, self.mode, &self.frame_progress(), &sized.path, &self.cache, &frame)?;
        Ok(())
    }

    /// Advance the loading animation by `dt_ms`.
    pub fn tick(&mut self, dt_ms: f64) -> Action {
        if self.driver.tick(dt_ms) {
            Action::RenderNeeded
        } else {
            Action::None
        }
    }

    // --- Lifecycle ---

    /// The view joined the page: start animating.
    pub fn attach(&mut self) -> Action {
        self.start_loading();
        Action::RenderNeeded
    }

    /// The view left the page: stop animating.
    pub fn detach(&mut self) -> Action {
        self.stop_loading();
        Action::None
    }

    /// Start the loading animation if it isn't already running.
    pub fn start_loading(&mut self) -> bool {
        self.driver.start()
    }

    /// Stop the loading animation if it is running.
    pub fn stop_loading(&mut self) -> bool {
        self.driver.stop()
    }

    /// Install the callback fired on every animation tick.
    pub fn set_redraw_hook(&mut self, hook: impl FnMut(&AnimationState) + 'static) {
        self.driver.set_redraw_hook(hook);
    }

    // --- Mode / drag ---

    pub fn set_mode(&mut self, mode: VisualMode) -> Action {
        if self.mode == mode {
            return Action::None;
        }
        debug!(from = ?self.mode, to = ?mode, "visual mode changed");
        self.mode = mode;
        Action::RenderNeeded
    }

    /// Set the externally driven drag progress. Meaningful in `[0, 1]`, not clamped.
    pub fn set_drag_fraction(&mut self, fraction: f64) -> Action {
        self.drag_fraction = fraction;
        if self.mode == VisualMode::Drag {
            Action::RenderNeeded
        } else {
            Action::None
        }
    }

    // --- Queries ---

    /// Progress the renderer sees this frame: the drag fraction in drag mode,
    /// the driver's progress in loading mode.
    #[must_use]
    pub fn frame_progress(&self) -> AnimationState {
        let progress = self.driver.progress();
        match self.mode {
            VisualMode::Drag => progress.with_fraction(self.drag_fraction),
            VisualMode::Loading => progress,
        }
    }

    #[must_use]
    pub fn mode(&self) -> VisualMode {
        self.mode
    }

    #[must_use]
    pub fn drag_fraction(&self) -> f64 {
        self.drag_fraction
    }

    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    #[must_use]
    pub fn metrics(&self) -> Option<&ViewportMetrics> {
        self.sized.as_ref().map(|s| &s.metrics)
    }

    #[must_use]
    pub fn path(&self) -> Option<&TravelPath> {
        self.sized.as_ref().map(|s| &s.path)
    }

    #[must_use]
    pub fn cache(&self) -> &StaticDotCache<S::Layer> {
        &self.cache
    }

    #[must_use]
    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }
}

/// The browser loader. Wraps `LoaderCore` and owns the canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    viewport_width: f64,
    viewport_height: f64,
    dpr: f64,
    pub core: LoaderCore<CanvasRenderingContext2d>,
}

impl Engine {
    /// Create a loader bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, config: LoaderConfig) -> Result<Self, LoaderError> {
        let ctx = web::context_2d(&canvas)?;
        Ok(Self {
            canvas,
            ctx,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            core: LoaderCore::new(config)?,
        })
    }

    // --- Viewport ---

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::InvalidViewport`] for a non-positive size.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Result<Action, LoaderError> {
        let action = self.core.on_viewport_resized(&mut self.ctx, width_css, height_css)?;
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        self.canvas.set_width((width_css * self.dpr).round() as u32);
        self.canvas.set_height((height_css * self.dpr).round() as u32);
        Ok(action)
    }

    // --- Delegated inputs ---

    pub fn tick(&mut self, dt_ms: f64) -> Action {
        self.core.tick(dt_ms)
    }

    pub fn attach(&mut self) -> Action {
        self.core.attach()
    }

    pub fn detach(&mut self) -> Action {
        self.core.detach()
    }

    pub fn start_loading(&mut self) -> bool {
        self.core.start_loading()
    }

    pub fn stop_loading(&mut self) -> bool {
        self.core.stop_loading()
    }

    pub fn set_mode(&mut self, mode: VisualMode) -> Action {
        self.core.set_mode(mode)
    }

    pub fn set_drag_fraction(&mut self, fraction: f64) -> Action {
        self.core.set_drag_fraction(fraction)
    }

    // --- Render ---

    /// Clear the canvas and draw the current frame.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::NotSized`] before [`Self::set_viewport`] succeeds,
    /// or a surface error if a Canvas2D call fails.
    pub fn render(&mut self) -> Result<(), LoaderError> {
        self.ctx
            .set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)
            .map_err(web::draw_err)?;
        self.ctx.clear_rect(0.0, 0.0, self.viewport_width, self.viewport_height);
        self.core.render(&mut self.ctx)
    }
}
