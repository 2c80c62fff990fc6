// Bobber entity: spawned as a rapier ball on launch, pinned kinematic once it
// touches water, and driven from the session while a fish is hooked.
use bevy::prelude::*;
use bevy::math::primitives::Sphere;
use bevy_rapier3d::prelude::*;

use crate::fishing::bobber::ObstacleProbe;
use crate::fishing::session::{EnvironmentEvent, SessionEvent};
use crate::plugins::fishing::{ActiveSession, BobberContact, FishingEvent, FishingSet};

#[derive(Component)]
pub struct BobberBody;

/// Marks the lake surface sensor. Any other collider the bobber touches is an obstacle.
#[derive(Component)]
pub struct Water;

/// Rapier-backed linecast that ignores sensors (water) and the bobber itself.
pub struct RapierObstacleProbe<'a> {
    pub ctx: &'a RapierContext,
    pub exclude: Option<Entity>,
}

impl ObstacleProbe for RapierObstacleProbe<'_> {
    fn linecast(&self, from: Vec3, to: Vec3) -> Option<Vec3> {
        let delta = to - from;
        let len = delta.length();
        if len <= f32::EPSILON {
            return None;
        }
        let dir = delta / len;
        let mut filter = QueryFilter::default().exclude_sensors();
        if let Some(e) = self.exclude {
            filter = filter.exclude_rigid_body(e);
        }
        self.ctx
            .cast_ray(from, dir, len, true, filter)
            .map(|(_, toi)| from + dir * toi)
    }
}

pub struct BobberPlugin;
impl Plugin for BobberPlugin {
    fn build(&self, app: &mut App) {
        // also registered by RapierPhysicsPlugin; headless apps run without it
        app.add_event::<CollisionEvent>()
            .add_systems(
                Update,
                (collect_contacts, sync_flight_position).chain().in_set(FishingSet::Input),
            )
            .add_systems(
                Update,
                (bobber_lifecycle, place_settled_bobber).chain().in_set(FishingSet::Present),
            );
    }
}

fn collect_contacts(
    mut collisions: EventReader<CollisionEvent>,
    mut q_bobber: Query<(Entity, &Transform, &mut RigidBody, Option<&mut Velocity>), With<BobberBody>>,
    q_water: Query<(), With<Water>>,
    mut out: EventWriter<BobberContact>,
) {
    for ev in collisions.read() {
        let CollisionEvent::Started(a, b, _) = ev else { continue; };
        let (bobber, other) = if q_bobber.contains(*a) {
            (*a, *b)
        } else if q_bobber.contains(*b) {
            (*b, *a)
        } else {
            continue;
        };
        let Ok((_, t, mut body, vel)) = q_bobber.get_mut(bobber) else { continue; };
        if q_water.contains(other) {
            if *body == RigidBody::Dynamic {
                *body = RigidBody::KinematicPositionBased;
                if let Some(mut vel) = vel {
                    *vel = Velocity::zero();
                }
                out.send(BobberContact(EnvironmentEvent::EnteredWater { position: t.translation }));
            }
        } else if *body == RigidBody::Dynamic {
            debug!("bobber hit obstacle {:?}", other);
            out.send(BobberContact(EnvironmentEvent::HitObstacle));
        }
    }
}

/// While physics flies the bobber the session only mirrors its position.
fn sync_flight_position(
    q_bobber: Query<(&Transform, &RigidBody), With<BobberBody>>,
    mut session: ResMut<ActiveSession>,
) {
    if let Ok((t, body)) = q_bobber.get_single() {
        if *body == RigidBody::Dynamic {
            session.0.sync_bobber_position(t.translation);
        }
    }
}

fn bobber_lifecycle(
    mut commands: Commands,
    mut events: EventReader<FishingEvent>,
    q_bobber: Query<Entity, With<BobberBody>>,
    session: Res<ActiveSession>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    mats: Option<ResMut<Assets<StandardMaterial>>>,
) {
    let bobber_cfg = session.0.config().bobber;
    let radius = bobber_cfg.collider_radius;
    let mut visuals = meshes.zip(mats);
    for ev in events.read() {
        match ev.0 {
            SessionEvent::BobberLaunched { origin, impulse } => {
                let mut e = commands.spawn((
                    BobberBody,
                    TransformBundle::from_transform(Transform::from_translation(origin)),
                    VisibilityBundle::default(),
                    RigidBody::Dynamic,
                    Collider::ball(radius),
                    ColliderMassProperties::Mass(bobber_cfg.mass),
                    Ccd::enabled(),
                    ActiveEvents::COLLISION_EVENTS,
                    // launch impulse expressed as the body's initial velocity
                    Velocity::linear(impulse / bobber_cfg.mass.max(f32::EPSILON)),
                ));
                if let Some((meshes, mats)) = visuals.as_mut() {
                    e.insert((
                        meshes.add(Mesh::from(Sphere { radius: radius * 2.0 })),
                        mats.add(StandardMaterial {
                            base_color: Color::srgb(0.95, 0.2, 0.15),
                            perceptual_roughness: 0.6,
                            ..default()
                        }),
                    ));
                }
                info!("BOBBER spawned at ({:.2},{:.2},{:.2})", origin.x, origin.y, origin.z);
            }
            SessionEvent::BobberDespawned => {
                for e in &q_bobber {
                    commands.entity(e).despawn_recursive();
                }
            }
            _ => {}
        }
    }
}

/// Once landed, the session owns the bobber position (fish pulling it around).
fn place_settled_bobber(
    session: Res<ActiveSession>,
    mut q_bobber: Query<(&mut Transform, &RigidBody), With<BobberBody>>,
) {
    let Some(agent) = session.0.bobber() else { return; };
    if !agent.in_water {
        return;
    }
    for (mut t, body) in &mut q_bobber {
        if *body != RigidBody::Dynamic {
            t.translation = agent.position;
        }
    }
}
