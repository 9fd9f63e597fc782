#![allow(clippy::float_cmp)]

use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::config::Color;
use crate::surface::{DrawCommand, RecordingSurface};

// =============================================================
// Helpers
// =============================================================

type Core = LoaderCore<RecordingSurface>;

fn fresh_core() -> Core {
    LoaderCore::new(LoaderConfig::default()).unwrap()
}

fn sized_core(surface: &mut RecordingSurface) -> Core {
    let mut core = fresh_core();
    core.on_viewport_resized(surface, 485.0, 500.0).unwrap();
    core
}

fn frame(core: &Core, surface: &mut RecordingSurface) -> Vec<DrawCommand> {
    surface.clear();
    core.render(surface).unwrap();
    surface.take()
}

// =============================================================
// Construction
// =============================================================

#[test]
fn core_new_defaults() {
    let core = fresh_core();
    assert_eq!(core.mode(), VisualMode::Loading);
    assert_eq!(core.drag_fraction(), 0.0);
    assert!(!core.driver().is_running());
    assert!(core.metrics().is_none());
    assert!(core.path().is_none());
}

#[test]
fn core_rejects_invalid_config() {
    let config = LoaderConfig { dot_count: 0, ..LoaderConfig::default() };
    assert!(matches!(Core::new(config), Err(LoaderError::InvalidConfig(_))));
}

#[test]
fn core_uses_configured_duration() {
    let config = LoaderConfig { cycle_duration_ms: 1000.0, ..LoaderConfig::default() };
    let core = Core::new(config).unwrap();
    assert_eq!(core.driver().duration_ms(), 1000.0);
}

// =============================================================
// Resize
// =============================================================

#[test]
fn resize_builds_geometry_and_cache() {
    let mut surface = RecordingSurface::new();
    let mut core = fresh_core();
    let action = core.on_viewport_resized(&mut surface, 485.0, 500.0).unwrap();
    assert_eq!(action, Action::RenderNeeded);
    let m = core.metrics().unwrap();
    assert_eq!((m.width, m.height, m.center_y), (285.0, 300.0, 150.0));
    assert_eq!(core.path().unwrap().start().y, 150.0);
    assert_eq!(core.cache().generation(), 1);
    assert!(core.cache().layer().is_some());
}

#[test]
fn resize_rebuilds_cache_once_per_event() {
    let mut surface = RecordingSurface::new();
    let mut core = sized_core(&mut surface);
    core.on_viewport_resized(&mut surface, 600.0, 600.0).unwrap();
    assert_eq!(core.cache().generation(), 2);
    assert_eq!(surface.layers_created(), 2);
}

#[test]
fn resize_updates_translation() {
    let mut surface = RecordingSurface::new();
    let mut core = sized_core(&mut surface);
    core.on_viewport_resized(&mut surface, 685.0, 700.0).unwrap();
    let m = core.metrics().unwrap();
    assert_eq!((m.translation_x, m.translation_y), (200.0, 200.0));
}

#[test]
fn invalid_resize_is_rejected_and_keeps_geometry() {
    let mut surface = RecordingSurface::new();
    let mut core = sized_core(&mut surface);
    let err = core.on_viewport_resized(&mut surface, 0.0, 500.0).unwrap_err();
    assert!(matches!(err, LoaderError::InvalidViewport { .. }));
    assert_eq!(core.metrics().unwrap().translation_x, 100.0);
    assert_eq!(core.cache().generation(), 1);
}

#[test]
fn invalid_first_resize_leaves_core_unsized() {
    let mut surface = RecordingSurface::new();
    let mut core = fresh_core();
    assert!(core.on_viewport_resized(&mut surface, -1.0, -1.0).is_err());
    assert!(core.metrics().is_none());
    assert!(matches!(core.render(&mut surface), Err(LoaderError::NotSized)));
}

// =============================================================
// Render
// =============================================================

#[test]
fn render_before_resize_is_rejected() {
    let mut surface = RecordingSurface::new();
    let core = fresh_core();
    assert!(matches!(core.render(&mut surface), Err(LoaderError::NotSized)));
    assert!(surface.commands().is_empty());
}

#[test]
fn render_loading_frame() {
    let mut surface = RecordingSurface::new();
    let core = sized_core(&mut surface);
    let cmds = frame(&core, &mut surface);
    assert_eq!(
        cmds,
        vec![
            DrawCommand::Translate { dx: 100.0, dy: 100.0 },
            DrawCommand::DrawLayer { layer_id: 1, x: 45.0, y: 0.0 },
            DrawCommand::FillCircle { cx: 30.0, cy: 150.0, radius: 15.0, color: Color::BLACK },
        ]
    );
}

#[test]
fn render_reuses_layer_across_frames() {
    let mut surface = RecordingSurface::new();
    let mut core = sized_core(&mut surface);
    core.attach();
    for _ in 0..10 {
        core.tick(16.0);
        core.render(&mut surface).unwrap();
    }
    assert_eq!(surface.layers_created(), 1);
    assert_eq!(core.cache().generation(), 1);
}

#[test]
fn render_drag_frame_uses_drag_fraction() {
    let mut surface = RecordingSurface::new();
    let mut core = sized_core(&mut surface);
    core.set_mode(VisualMode::Drag);
    core.set_drag_fraction(1.0);
    let cmds = frame(&core, &mut surface);
    assert_eq!(cmds.len(), 7);
    assert!(surface.commands().is_empty());
    let ys: Vec<f64> = cmds
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillCircle { cy, .. } => Some(*cy),
            _ => None,
        })
        .collect();
    assert_eq!(ys.len(), 6);
    assert!(ys.iter().all(|y| (y - 150.0).abs() < 1e-9));
}

#[test]
fn drag_mode_ignores_animation_progress() {
    let mut surface = RecordingSurface::new();
    let mut core = sized_core(&mut surface);
    core.attach();
    core.tick(350.0);
    core.set_mode(VisualMode::Drag);
    core.set_drag_fraction(0.0);
    assert_eq!(core.frame_progress().fraction, 0.0);
    let cmds = frame(&core, &mut surface);
    assert!(matches!(cmds[1], DrawCommand::FillCircle { cy, .. } if cy == 0.0));
}

#[test]
fn loading_mode_follows_animation_progress() {
    let mut surface = RecordingSurface::new();
    let mut core = sized_core(&mut surface);
    core.attach();
    core.tick(350.0);
    core.set_drag_fraction(0.9);
    assert!((core.frame_progress().fraction - 0.5).abs() < 1e-9);
    let cmds = frame(&core, &mut surface);
    assert!(matches!(cmds[1], DrawCommand::DrawLayer { x, .. } if (x - 22.5).abs() < 1e-9));
}

// =============================================================
// Mode / drag actions
// =============================================================

#[test]
fn set_mode_reports_render_only_on_change() {
    let mut core = fresh_core();
    assert_eq!(core.set_mode(VisualMode::Loading), Action::None);
    assert_eq!(core.set_mode(VisualMode::Drag), Action::RenderNeeded);
    assert_eq!(core.set_mode(VisualMode::Drag), Action::None);
}

#[test]
fn set_drag_fraction_requests_render_in_drag_mode() {
    let mut core = fresh_core();
    assert_eq!(core.set_drag_fraction(0.4), Action::None);
    core.set_mode(VisualMode::Drag);
    assert_eq!(core.set_drag_fraction(0.5), Action::RenderNeeded);
    assert_eq!(core.drag_fraction(), 0.5);
}

#[test]
fn set_drag_fraction_is_not_clamped() {
    let mut core = fresh_core();
    core.set_drag_fraction(1.5);
    assert_eq!(core.drag_fraction(), 1.5);
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn attach_starts_and_detach_stops() {
    let mut core = fresh_core();
    assert_eq!(core.attach(), Action::RenderNeeded);
    assert!(core.driver().is_running());
    assert_eq!(core.detach(), Action::None);
    assert!(!core.driver().is_running());
}

#[test]
fn start_and_stop_loading_are_idempotent() {
    let mut core = fresh_core();
    assert!(core.start_loading());
    assert!(!core.start_loading());
    assert!(core.stop_loading());
    assert!(!core.stop_loading());
}

#[test]
fn tick_requests_render_only_while_running() {
    let mut core = fresh_core();
    assert_eq!(core.tick(16.0), Action::None);
    core.attach();
    assert_eq!(core.tick(16.0), Action::RenderNeeded);
    core.detach();
    assert_eq!(core.tick(16.0), Action::None);
}

#[test]
fn redraw_hook_stops_after_detach() {
    let mut core = fresh_core();
    let count = Rc::new(Cell::new(0));
    let sink = Rc::clone(&count);
    core.set_redraw_hook(move |_| sink.set(sink.get() + 1));
    core.attach();
    core.tick(10.0);
    core.tick(10.0);
    core.detach();
    core.tick(10.0);
    assert_eq!(count.get(), 2);
}

#[test]
fn direction_flag_flips_each_cycle_through_core() {
    let mut surface = RecordingSurface::new();
    let mut core = sized_core(&mut surface);
    core.attach();
    core.tick(700.0 + 210.0);
    assert!(!core.frame_progress().through_above);
    let cmds = frame(&core, &mut surface);
    let DrawCommand::FillCircle { cy, .. } = cmds[2] else {
        panic!("expected traveling dot, got {:?}", cmds[2]);
    };
    assert!(cy > 150.0);
}
