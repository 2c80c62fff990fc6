use bevy::prelude::*;
use bevy::math::primitives::{Cuboid, Cylinder, Sphere};
use bevy::render::camera::ClearColorConfig;
use bevy_rapier3d::prelude::*;
use rand::prelude::*;

use crate::plugins::bobber::Water;
use crate::plugins::fishing::{ActiveSession, Angler, FishingSet};

// Lake occupies z < SHORE_Z; the angler stands on the shore facing -Z.
const LAKE_HALF_EXTENT: f32 = 60.0;
const SHORE_Z: f32 = 4.0;
const SHORE_DEPTH: f32 = 12.0;
const WATER_LEVEL: f32 = 0.0;
const WATER_DEPTH: f32 = 1.0; // sensor slab thickness below the surface
const ROCK_COUNT: usize = 8;
const ANGLER_EYE: f32 = 1.7;
const ROD_REST_PITCH_DEG: f32 = -50.0;
const ROD_MAX_SWING_DEG: f32 = 35.0;

/// Rod mesh; its rotation follows the session's bend values.
#[derive(Component)]
pub struct RodVisual;

pub struct ScenePlugin;
impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene)
            .add_systems(Update, bend_rod.in_set(FishingSet::Present));
    }
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<StandardMaterial>>,
) {
    commands
        .spawn((
            SpatialBundle::from_transform(
                Transform::from_xyz(0.0, ANGLER_EYE, SHORE_Z + 2.0).looking_to(Vec3::NEG_Z, Vec3::Y),
            ),
            Angler,
        ))
        .with_children(|p| {
            p.spawn(Camera3dBundle {
                camera: Camera { clear_color: ClearColorConfig::Custom(Color::srgb(0.52, 0.80, 0.92)), ..default() },
                projection: PerspectiveProjection { fov: 70f32.to_radians(), ..default() }.into(),
                ..default()
            });
            // rod: a thin pole from the hands toward the tip offset
            p.spawn((
                PbrBundle {
                    mesh: meshes.add(Mesh::from(Cylinder { radius: 0.02, half_height: 0.45 })),
                    material: mats.add(StandardMaterial { base_color: Color::srgb(0.35, 0.22, 0.1), ..default() }),
                    transform: Transform::from_xyz(0.3, -0.3, -0.3)
                        .with_rotation(Quat::from_rotation_x(ROD_REST_PITCH_DEG.to_radians())),
                    ..default()
                },
                RodVisual,
            ));
        });

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 40_000.0,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_xyz(30.0, 60.0, 30.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    // Water: a sensor slab whose top face is the surface. Thick enough that a
    // falling bobber cannot step over it in one physics tick.
    let water_half = Vec3::new(LAKE_HALF_EXTENT, WATER_DEPTH * 0.5, LAKE_HALF_EXTENT);
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Mesh::from(Cuboid { half_size: water_half })),
            material: mats.add(StandardMaterial {
                base_color: Color::srgba(0.1, 0.35, 0.55, 0.85),
                alpha_mode: AlphaMode::Blend,
                perceptual_roughness: 0.15,
                ..default()
            }),
            transform: Transform::from_xyz(0.0, WATER_LEVEL - water_half.y, SHORE_Z - LAKE_HALF_EXTENT),
            ..default()
        },
        RigidBody::Fixed,
        Collider::cuboid(water_half.x, water_half.y, water_half.z),
        Sensor,
        Water,
    ));

    // Shore the angler stands on. Casting into it counts as an obstacle.
    let shore_half = Vec3::new(LAKE_HALF_EXTENT, 0.5, SHORE_DEPTH * 0.5);
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Mesh::from(Cuboid { half_size: shore_half })),
            material: mats.add(StandardMaterial {
                base_color: Color::srgb(0.35, 0.55, 0.25),
                perceptual_roughness: 0.9,
                ..default()
            }),
            transform: Transform::from_xyz(0.0, WATER_LEVEL + 0.2 - shore_half.y, SHORE_Z + shore_half.z),
            ..default()
        },
        RigidBody::Fixed,
        Collider::cuboid(shore_half.x, shore_half.y, shore_half.z),
    ));

    let rock_mesh = meshes.add(Mesh::from(Sphere { radius: 1.0 }));
    let rock_mat = mats.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.43, 0.40),
        perceptual_roughness: 1.0,
        ..default()
    });
    let mut rng = thread_rng();
    for _ in 0..ROCK_COUNT {
        let x = rng.gen_range(-25.0..25.0);
        let z = rng.gen_range(-45.0..-8.0);
        let r = rng.gen_range(0.8..2.2);
        commands.spawn((
            PbrBundle {
                mesh: rock_mesh.clone(),
                material: rock_mat.clone(),
                transform: Transform::from_xyz(x, WATER_LEVEL, z).with_scale(Vec3::splat(r)),
                ..default()
            },
            RigidBody::Fixed,
            Collider::ball(1.0),
        ));
    }
}

fn bend_rod(session: Res<ActiveSession>, mut q: Query<&mut Transform, With<RodVisual>>) {
    let bend = session.0.view().rod_bend;
    let swing = ROD_MAX_SWING_DEG.to_radians();
    for mut t in &mut q {
        t.rotation = Quat::from_rotation_y(-bend.horizontal * swing)
            * Quat::from_rotation_x(ROD_REST_PITCH_DEG.to_radians() - bend.vertical * swing);
    }
}
