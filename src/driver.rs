//! Repeating linear progress for the loading animation.
//!
//! The driver is a two-state machine (`Stopped` / `Running`) advanced by the
//! host's own clock: a `requestAnimationFrame` loop, a timer, or a test
//! calling [`AnimationDriver::tick`] by hand. While running, each tick moves a
//! virtual timeline forward, maps it linearly onto `fraction ∈ [0, 1)`, and
//! notifies the redraw hook. Every time the timeline wraps, the travel
//! direction flag flips.

#[cfg(test)]
#[path = "driver_test.rs"]
mod driver_test;

use std::fmt;

use tracing::{debug, trace};

use crate::consts::DEFAULT_CYCLE_DURATION_MS;

/// Progress snapshot read by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Linear progress through the current cycle.
    pub fraction: f64,
    /// `1 − fraction`; drives the conveyor offset of the stationary dots.
    pub value: f64,
    /// Whether the traveling dot arcs above the rest line this cycle.
    pub through_above: bool,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self { fraction: 0.0, value: 1.0, through_above: true }
    }
}

impl AnimationState {
    /// Same direction flag, with progress replaced by `fraction`.
    #[must_use]
    pub fn with_fraction(self, fraction: f64) -> Self {
        Self { fraction, value: 1.0 - fraction, ..self }
    }
}

/// Whether the driver is producing ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    #[default]
    Stopped,
    Running,
}

/// Callback fired once per running tick.
pub type RedrawHook = Box<dyn FnMut(&AnimationState)>;

/// Owns the loading animation's progress and running state.
pub struct AnimationDriver {
    state: DriverState,
    duration_ms: f64,
    elapsed_ms: f64,
    cycles: u64,
    progress: AnimationState,
    on_redraw: Option<RedrawHook>,
}

impl fmt::Debug for AnimationDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationDriver")
            .field("state", &self.state)
            .field("duration_ms", &self.duration_ms)
            .field("elapsed_ms", &self.elapsed_ms)
            .field("cycles", &self.cycles)
            .field("progress", &self.progress)
            .field("on_redraw", &self.on_redraw.is_some())
            .finish()
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(DEFAULT_CYCLE_DURATION_MS)
    }
}

impl AnimationDriver {
    /// Create a stopped driver with the given cycle length.
    ///
    /// Non-positive or non-finite durations fall back to the default.
    #[must_use]
    pub fn new(duration_ms: f64) -> Self {
        let duration_ms = if duration_ms.is_finite() && duration_ms > 0.0 {
            duration_ms
        } else {
            DEFAULT_CYCLE_DURATION_MS
        };
        Self {
            state: DriverState::Stopped,
            duration_ms,
            elapsed_ms: 0.0,
            cycles: 0,
            progress: AnimationState::default(),
            on_redraw: None,
        }
    }

    /// Install the callback invoked on every running tick, replacing any previous one.
    pub fn set_redraw_hook(&mut self, hook: impl FnMut(&AnimationState) + 'static) {
        self.on_redraw = Some(Box::new(hook));
    }

    pub fn clear_redraw_hook(&mut self) {
        self.on_redraw = None;
    }

    /// Begin a fresh timeline. Returns `false` if already running.
    pub fn start(&mut self) -> bool {
        if self.state == DriverState::Running {
            return false;
        }
        self.state = DriverState::Running;
        self.elapsed_ms = 0.0;
        self.progress = self.progress.with_fraction(0.0);
        debug!(duration_ms = self.duration_ms, "animation started");
        true
    }

    /// Halt ticking. Returns `false` if already stopped.
    pub fn stop(&mut self) -> bool {
        if self.state == DriverState::Stopped {
            return false;
        }
        self.state = DriverState::Stopped;
        debug!(cycles = self.cycles, "animation stopped");
        true
    }

    /// Advance the timeline by `dt_ms` and request a redraw.
    ///
    /// Returns `true` when a tick was produced. A stopped driver ignores the
    /// call, so nothing fires after [`Self::stop`]. Negative or non-finite
    /// deltas advance by zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        if self.state != DriverState::Running {
            return false;
        }

        let dt_ms = if dt_ms.is_finite() && dt_ms > 0.0 { dt_ms } else { 0.0 };
        self.elapsed_ms += dt_ms;

        let wraps = (self.elapsed_ms / self.duration_ms).floor();
        if wraps >= 1.0 {
            self.elapsed_ms -= wraps * self.duration_ms;
            if self.elapsed_ms >= self.duration_ms || self.elapsed_ms < 0.0 {
                self.elapsed_ms = 0.0;
            }
            self.on_cycle_boundary(wraps as u64);
        }

        self.progress = self.progress.with_fraction(self.elapsed_ms / self.duration_ms);
        trace!(fraction = self.progress.fraction, "animation tick");

        if let Some(hook) = self.on_redraw.as_mut() {
            hook(&self.progress);
        }
        true
    }

    /// Record `count` wraparounds; the direction flag flips once per wrap.
    fn on_cycle_boundary(&mut self, count: u64) {
        self.cycles += count;
        if count % 2 == 1 {
            self.progress.through_above = !self.progress.through_above;
        }
        trace!(cycles = self.cycles, through_above = self.progress.through_above, "animation wrapped");
    }

    #[must_use]
    pub fn state(&self) -> DriverState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// Current progress snapshot.
    #[must_use]
    pub fn progress(&self) -> AnimationState {
        self.progress
    }

    /// Completed cycles since construction.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }
}
