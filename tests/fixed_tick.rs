use reel_in::prelude::*;
use bevy::prelude::*;

// Helper to build a minimal app (no assets/scene) for deterministic fixed tick tests.
fn build_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(CoreSimPlugin); // provides tick_state system in FixedUpdate
    app
}

#[test]
fn fixed_steps_advance_clock() {
    let mut app = build_app();
    for step in 1..=5u64 {
        app.world_mut().run_schedule(FixedUpdate);
        let sim = app.world().resource::<SimState>();
        assert_eq!(sim.tick, step);
        assert!((sim.elapsed_seconds - step as f32 / 60.0).abs() < 1e-6);
    }
}

#[test]
fn run_limit_defaults_to_unbounded() {
    let app = build_app();
    let limit = app.world().get_resource::<RunLimit>().unwrap();
    assert!(limit.run_duration_seconds.is_none());
}

#[test]
fn run_limit_requests_exit() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(RunLimit { run_duration_seconds: Some(0.05) })
        .add_plugins(CoreSimPlugin);
    for _ in 0..4 { app.world_mut().run_schedule(FixedUpdate); }
    app.update();
    assert!(app.world().resource::<ExitState>().triggered);
}
