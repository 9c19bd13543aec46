//! Integration tests driving full frames through the public API.

use attractool::prelude::*;
use attractool::{DrawCommand, FieldRegistry, LoopState, Viewport};

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_registry_lists_catalog_in_order() {
    let ids: Vec<&str> = FieldRegistry::list_fields().iter().map(|f| f.id()).collect();
    assert_eq!(
        ids,
        ["lorenz", "rossler", "halvorsen", "chen", "aizawa", "dadras", "clifford", "dejong"]
    );
}

#[test]
fn test_registry_step_by_id() {
    let params = ParameterSet::defaults(VectorField::Lorenz);
    let next = FieldRegistry::step("lorenz", DVec3::ONE, &params, 1.0).unwrap();
    assert!((next - DVec3::new(1.0, 1.26, 0.98333)).length() < 1e-9);

    let err = FieldRegistry::step("thomas", DVec3::ONE, &params, 1.0).unwrap_err();
    assert_eq!(err, ConfigurationError::UnknownField("thomas".into()));
}

// ============================================================================
// Frame Loop
// ============================================================================

#[test]
fn test_every_field_renders_without_panicking() {
    for field in VectorField::ALL {
        let context = SimulationContext::with_seed(field, 200, 21).unwrap();
        let mut frames = FrameLoop::new(context);
        let mut canvas = Canvas::new(320, 240, Color::BLACK);
        frames.run_ticks(30, &mut canvas);
        assert_eq!(frames.frame(), 30);
    }
}

#[test]
fn test_same_seed_same_frames() {
    let render = || {
        let context = SimulationContext::with_seed(VectorField::Aizawa, 300, 5).unwrap();
        let mut frames = FrameLoop::new(context);
        let mut canvas = Canvas::new(200, 150, Color::BLACK);
        frames.run_ticks(10, &mut canvas);
        canvas.as_bytes().to_vec()
    };
    assert_eq!(render(), render());
}

#[test]
fn test_pause_then_resume() {
    let context = SimulationContext::with_seed(VectorField::Rossler, 50, 8).unwrap();
    let mut frames = FrameLoop::new(context);
    let mut surface = CommandBuffer::new(400, 300);

    frames.set_paused(true);
    assert_eq!(frames.state(), LoopState::Paused);
    let frozen: Vec<DVec3> = frames.context().pool().particles().iter().map(|p| p.position).collect();
    frames.run_ticks(4, &mut surface);
    let still: Vec<DVec3> = frames.context().pool().particles().iter().map(|p| p.position).collect();
    assert_eq!(frozen, still);

    frames.set_paused(false);
    frames.tick(&mut surface);
    let moved: Vec<DVec3> = frames.context().pool().particles().iter().map(|p| p.position).collect();
    assert_ne!(frozen, moved);
}

#[test]
fn test_trails_produce_history_polylines() {
    let context = SimulationContext::with_seed(VectorField::Lorenz, 10, 13).unwrap();
    let mut frames = FrameLoop::new(context);
    frames.context_mut().set_trails(true);
    let mut surface = CommandBuffer::new(400, 300);

    frames.run_ticks(60, &mut surface);
    let last_frame = &surface.commands()[surface.commands().len() - 11..];

    assert!(matches!(last_frame[0], DrawCommand::Fade { .. }));
    for command in &last_frame[1..] {
        match command {
            // History is capped, so the polyline never grows past the cap.
            DrawCommand::Polyline { points, .. } => assert_eq!(points.len(), 50),
            other => panic!("expected polyline, got {other:?}"),
        }
    }
}

#[test]
fn test_planar_map_stays_on_screen() {
    let context = SimulationContext::with_seed(VectorField::Clifford, 500, 17).unwrap();
    let mut frames = FrameLoop::new(context);
    let mut surface = CommandBuffer::new(800, 600);
    frames.run_ticks(20, &mut surface);

    // Clifford iterates stay within |x|, |y| <= 1 + |c|, |d|; with a scale of
    // one that is well inside the 800x600 surface.
    for command in surface.take() {
        if let DrawCommand::Point { at, .. } = command {
            assert!(at.x > 0.0 && at.x < 800.0 && at.y > 0.0 && at.y < 600.0, "{at:?}");
        }
    }
}

#[test]
fn test_switching_field_resets_pool_and_view_scale() {
    let mut context = SimulationContext::with_seed(VectorField::Lorenz, 100, 1).unwrap();
    context.view.set_scale(42.0);
    context.select_field(VectorField::Dadras);
    assert_eq!(context.view.scale(), 12.0);
    assert_eq!(context.pool().len(), 100);
    assert_eq!(context.params(), &ParameterSet::defaults(VectorField::Dadras));
}

#[test]
fn test_identity_projection() {
    let view = ViewTransform::new(1.0);
    let viewport = Viewport::new(640, 480);
    let p = attractool::project(DVec3::new(-4.0, 6.0, 123.0), VectorField::Lorenz.dimension(), &view, viewport);
    assert_eq!(p, Vec2::new(316.0, 246.0));
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn test_settings_file_drives_headless_run() {
    let path = std::env::temp_dir().join(format!("attractool-it-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r##"{ "field": "dejong", "particle_count": 400, "background": "#202020", "seed": 9, "width": 96, "height": 64 }"##,
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let canvas = Simulation::new().with_settings(settings).run_headless(8).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (96, 64));
    assert!(canvas.pixels().iter().any(|c| *c != Color::rgb(32, 32, 32)));
}
