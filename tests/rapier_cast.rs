use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::*;
use reel_in::prelude::*;

const MAX_FRAMES: usize = 900;

// Real rapier stepping at 60 Hz, still without a window or renderer.
fn build_app() -> App {
    let cfg = FishingConfig { rng_seed: Some(11), ..Default::default() };
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins((
            bevy::transform::TransformPlugin,
            bevy::hierarchy::HierarchyPlugin,
            bevy::asset::AssetPlugin::default(),
            bevy::scene::ScenePlugin,
        ))
        .init_asset::<Mesh>()
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .insert_resource(FishingSettings(cfg))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(CoreSimPlugin)
        .add_plugins(FishingPlugin)
        .add_plugins(BobberPlugin);
    // lake surface at y = 0 in front of the default rod tip
    app.world_mut().spawn((
        TransformBundle::from_transform(Transform::from_xyz(0.0, -0.5, -20.0)),
        RigidBody::Fixed,
        Collider::cuboid(30.0, 0.5, 30.0),
        Sensor,
        Water,
    ));
    app.update();
    app
}

fn session(app: &App) -> &FishingSession {
    &app.world().resource::<ActiveSession>().0
}

fn run_until(app: &mut App, mut done: impl FnMut(&App) -> bool) -> bool {
    for _ in 0..MAX_FRAMES {
        if done(&*app) {
            return true;
        }
        app.update();
    }
    done(&*app)
}

#[test]
fn force_three_cast_lands_on_water() {
    let mut app = build_app();

    app.world_mut().resource_mut::<FishingInput>().0.cast_held = true;
    assert!(run_until(&mut app, |a| session(a).casting().force >= 3.0));
    app.world_mut().resource_mut::<FishingInput>().0.cast_held = false;
    assert!(run_until(&mut app, |a| session(a).state() == FishingState::WaitingForCatch));

    assert!(run_until(&mut app, |a| session(a).bobber().is_some_and(|b| b.in_water)));
    assert_eq!(session(&app).state(), FishingState::WaitingForCatch);

    let landed = session(&app).bobber().map(|b| b.position).unwrap_or(Vec3::NAN);
    // roughly 1.5 m up, ~3 m/s at 45 degrees: a short lob just ahead of the angler
    assert!(landed.y.abs() < 0.5, "landed at {landed}");
    assert!(landed.z < -0.5 && landed.z > -10.0, "landed at {landed}");

    let world = app.world_mut();
    let mut q = world.query_filtered::<&RigidBody, With<BobberBody>>();
    assert_eq!(*q.single(world), RigidBody::KinematicPositionBased);
}

#[test]
fn obstacle_probe_stops_short_of_solid_colliders() {
    let mut app = build_app();
    app.world_mut().spawn((
        TransformBundle::from_transform(Transform::from_xyz(10.0, 0.0, -20.0)),
        RigidBody::Fixed,
        Collider::ball(1.0),
    ));
    // let rapier register the collider and refresh its query pipeline
    for _ in 0..3 { app.update(); }

    let ctx = app.world().resource::<RapierContext>();
    let probe = RapierObstacleProbe { ctx, exclude: None };
    let hit = probe.linecast(Vec3::new(0.0, 0.0, -20.0), Vec3::new(20.0, 0.0, -20.0));
    let hit = hit.unwrap_or(Vec3::NAN);
    assert!((hit.x - 9.0).abs() < 1e-3, "hit at {hit}");

    // the water sensor alone never blocks
    assert!(probe.linecast(Vec3::new(0.0, -0.2, -5.0), Vec3::new(0.0, -0.2, -30.0)).is_none());
}
