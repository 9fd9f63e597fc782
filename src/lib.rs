//! Animated "loading dots" indicator.
//!
//! A row of dots that either drops into place as a host-driven drag progress
//! grows, or loops a loading animation where one dot hops along an arch while
//! the rest slide one slot over. The crate owns the geometry, the animation
//! timeline, and the per-frame draw calls; the host supplies a drawing surface,
//! size notifications, and a clock. In the browser the host only wires
//! `requestAnimationFrame` and resize events to [`engine::Engine`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Host boundary: browser [`engine::Engine`] and testable [`engine::LoaderCore`] |
//! | [`geometry`] | Viewport metrics and the arc-length sampled travel path |
//! | [`cache`] | Offscreen layer of the stationary dots, rebuilt per resize |
//! | [`driver`] | Repeating progress state machine for the loading animation |
//! | [`render`] | Per-frame draw calls for drag and loading modes |
//! | [`surface`] | Drawing-surface traits and the display-list backend |
//! | [`web`] | Canvas2D backend |
//! | [`config`] | Loader configuration and colors |
//! | [`error`] | Error types |
//! | [`consts`] | Shared numeric constants (layout ratios, defaults) |

pub mod cache;
pub mod config;
pub mod consts;
pub mod driver;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod render;
pub mod surface;
pub mod web;
