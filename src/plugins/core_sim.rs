use bevy::prelude::*;
use bevy::app::AppExit;
use bevy::time::Fixed;

// Core simulation timing & optional run limit for headless/demo runs.
#[derive(Resource, Default, Debug)]
pub struct SimState {
    pub tick: u64,
    pub elapsed_seconds: f32,
}
impl SimState {
    pub fn advance_fixed(&mut self) {
        self.tick += 1;
        self.elapsed_seconds = self.tick as f32 / 60.0;
    }
}

#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct RunLimit {
    pub run_duration_seconds: Option<f32>,
}

#[derive(Resource, Default)]
pub struct ExitState { pub triggered: bool }

pub struct CoreSimPlugin;
impl Plugin for CoreSimPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimState::default())
            .init_resource::<RunLimit>() // respect pre-inserted RunLimit (e.g. from --runtime flag)
            .insert_resource(ExitState::default())
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_systems(FixedUpdate, tick_state)
            .add_systems(Update, exit_after_runtime);
    }
}

fn tick_state(mut sim: ResMut<SimState>) {
    sim.advance_fixed();
}

fn exit_after_runtime(
    sim: Res<SimState>,
    limit: Res<RunLimit>,
    mut exit_state: ResMut<ExitState>,
    mut ev_exit: EventWriter<AppExit>,
) {
    if exit_state.triggered { return; }
    let Some(limit) = limit.run_duration_seconds else { return; };
    if sim.elapsed_seconds >= limit {
        info!("EXIT runtime reached seconds={}", sim.elapsed_seconds);
        exit_state.triggered = true;
        ev_exit.send(AppExit::Success);
    }
}
