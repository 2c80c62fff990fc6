// Fishing plugin: owns the session resource, feeds it player input and
// bobber contacts each frame, and republishes its events for presentation.
//
// Frame order (FishingSet, chained):
//  - Input:    mouse/keyboard -> FishingInput, rapier contacts -> BobberContact
//  - Simulate: FishingSession::tick
//  - Present:  bobber entity lifecycle, HUD, rod visual

use bevy::prelude::*;
use bevy_rapier3d::prelude::RapierContext;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::fishing::bobber::OpenWater;
use crate::fishing::rod::RodPose;
use crate::fishing::session::{EnvironmentEvent, FishingSession, FishingState, FrameInput, SessionEvent};
use crate::plugins::bobber::{BobberBody, RapierObstacleProbe};
use crate::plugins::settings::{load_settings, FishingSettings};

// Rod tip relative to the angler, in the angler's local frame.
const ROD_TIP_FORWARD: f32 = 0.5;
const ROD_TIP_UP: f32 = 0.5;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FishingSet {
    Input,
    Simulate,
    Present,
}

/// The player; its transform is the rod frame.
#[derive(Component)]
pub struct Angler;

#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct FishingInput(pub FrameInput);

#[derive(Resource)]
pub struct FishingRng(pub StdRng);

#[derive(Resource, Debug, Clone)]
pub struct ActiveSession(pub FishingSession);

/// Re-broadcast of everything the session reported this frame.
#[derive(Event, Debug, Clone, Copy)]
pub struct FishingEvent(pub SessionEvent);

/// Physics report about the live bobber.
#[derive(Event, Debug, Clone, Copy)]
pub struct BobberContact(pub EnvironmentEvent);

pub struct FishingPlugin;
impl Plugin for FishingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FishingEvent>()
            .add_event::<BobberContact>()
            .init_resource::<FishingInput>()
            .configure_sets(
                Update,
                (FishingSet::Input, FishingSet::Simulate, FishingSet::Present).chain(),
            )
            .add_systems(Startup, init_session.after(load_settings))
            .add_systems(
                Update,
                (read_player_input, toggle_fishing).in_set(FishingSet::Input),
            )
            .add_systems(Update, drive_session.in_set(FishingSet::Simulate));
    }
}

fn init_session(mut commands: Commands, settings: Option<Res<FishingSettings>>) {
    let cfg = settings.map(|s| s.0).unwrap_or_default();
    let mut rng = match cfg.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = FishingSession::new(cfg, &mut rng);
    session.enable();
    info!(
        "FISHING ready seed={:?} first_bite_delay={:.2}s",
        cfg.rng_seed,
        session.bite_timer().bite_delay
    );
    commands.insert_resource(ActiveSession(session));
    commands.insert_resource(FishingRng(rng));
}

/// Left mouse held charges the cast, right mouse strikes. The angler's
/// transform supplies the rod frame; without one the default pose is used.
fn read_player_input(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    q_angler: Query<&Transform, With<Angler>>,
    mut input: ResMut<FishingInput>,
) {
    if let Some(buttons) = buttons {
        input.0.cast_held = buttons.pressed(MouseButton::Left);
        input.0.reel_pressed = buttons.just_pressed(MouseButton::Right);
    }
    if let Ok(t) = q_angler.get_single() {
        input.0.rod = rod_pose(t);
    }
}

pub fn rod_pose(t: &Transform) -> RodPose {
    let forward = t.forward().as_vec3();
    let up = t.up().as_vec3();
    RodPose {
        tip: t.translation + forward * ROD_TIP_FORWARD + up * ROD_TIP_UP,
        position: t.translation,
        forward,
        up,
        right: t.right().as_vec3(),
    }
}

fn toggle_fishing(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut session: ResMut<ActiveSession>,
    mut out: EventWriter<FishingEvent>,
) {
    let Some(keys) = keys else { return; };
    if !keys.just_pressed(KeyCode::KeyF) {
        return;
    }
    let events = if session.0.state() == FishingState::Inactive {
        session.0.enable()
    } else {
        session.0.disable()
    };
    info!("FISHING toggled -> {:?}", session.0.state());
    out.send_batch(events.into_iter().map(FishingEvent));
}

fn drive_session(
    time: Res<Time>,
    input: Res<FishingInput>,
    rapier: Option<Res<RapierContext>>,
    q_bobber: Query<Entity, With<BobberBody>>,
    mut contacts: EventReader<BobberContact>,
    mut session: ResMut<ActiveSession>,
    mut rng: ResMut<FishingRng>,
    mut out: EventWriter<FishingEvent>,
) {
    let session = &mut session.0;
    let mut events = Vec::new();
    for contact in contacts.read() {
        events.extend(session.handle_environment(contact.0));
    }

    let dt = time.delta_seconds();
    let frame_events = match rapier.as_deref() {
        Some(ctx) => {
            let probe = RapierObstacleProbe { ctx, exclude: q_bobber.get_single().ok() };
            session.tick(&input.0, dt, &mut rng.0, &probe)
        }
        None => session.tick(&input.0, dt, &mut rng.0, &OpenWater),
    };
    events.extend(frame_events);
    out.send_batch(events.into_iter().map(FishingEvent));
}
