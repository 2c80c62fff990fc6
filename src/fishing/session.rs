// Top-level fishing state machine. Sequences casting, bite wait and the reel
// skill check; every abnormal path funnels into `restart`.
use bevy::log::{debug, info};
use bevy::math::Vec3;
use rand::Rng;

use crate::fishing::bite::{BiteEvent, BiteWindowTimer};
use crate::fishing::bobber::{BobberAgent, ObstacleProbe};
use crate::fishing::casting::{launch_impulse, CastEvent, CastingController};
use crate::fishing::config::FishingConfig;
use crate::fishing::rod::{RodBend, RodController, RodPose, RodState};
use crate::fishing::score::ScoreBoard;
use crate::fishing::skill_check::{SkillCheckGame, SkillCheckOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FishingState {
    #[default]
    Inactive,
    Idle,
    Casting,
    WaitingForCatch,
    Reeling,
}

/// Per-frame input from the input collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub cast_held: bool,
    pub reel_pressed: bool, // edge: pressed this frame
    pub rod: RodPose,
}

/// Signals from the physics collaborator about the bobber.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnvironmentEvent {
    EnteredWater { position: Vec3 },
    HitObstacle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartReason {
    PrematureReel,
    Obstacle,
    Escaped,
    Caught,
    Disabled,
    Requested,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    StateChanged { from: FishingState, to: FishingState },
    CastCommitted { force: f32, forced: bool },
    BobberLaunched { origin: Vec3, impulse: Vec3 },
    LaunchCancelled,
    BobberLanded { position: Vec3 },
    BiteStarted,
    BiteMissed { next_delay: f32 },
    FishHooked,
    ReelAttempt { hit: bool, progress: f32 },
    FishCaught { points: u32, total: u32 },
    FishEscaped,
    BobberDespawned,
    Restarted { reason: RestartReason },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillCheckView {
    pub value: f32,
    pub target_center: f32,
    pub target_width: f32,
    pub progress: f32,
}

/// Everything the rendering and UI collaborators need for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FishingView {
    pub state: FishingState,
    pub cast_force: f32,
    pub max_force: f32,
    pub casting_bar_visible: bool,
    pub skill_check: Option<SkillCheckView>,
    pub score: u32,
    pub last_delta: u32,
    pub congrats_visible: bool,
    pub bobber_position: Option<Vec3>,
    pub bobber_biting: bool,
    pub rod_state: RodState,
    pub rod_bend: RodBend,
    pub movement_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct FishingSession {
    state: FishingState,
    cfg: FishingConfig,
    casting: CastingController,
    bite: BiteWindowTimer,
    skill_check: SkillCheckGame,
    bobber: Option<BobberAgent>,
    rod: RodController,
    rod_bend: RodBend,
    score: ScoreBoard,
    movement_enabled: bool,
}

impl FishingSession {
    pub fn new(cfg: FishingConfig, rng: &mut impl Rng) -> Self {
        Self {
            state: FishingState::Inactive,
            casting: CastingController::new(cfg.casting),
            bite: BiteWindowTimer::new(cfg.bite, rng),
            skill_check: SkillCheckGame::new(cfg.skill_check),
            bobber: None,
            rod: RodController::new(cfg.rod),
            rod_bend: RodBend::default(),
            score: ScoreBoard::new(cfg.score),
            movement_enabled: true,
            cfg,
        }
    }

    pub fn state(&self) -> FishingState { self.state }
    pub fn config(&self) -> &FishingConfig { &self.cfg }
    pub fn casting(&self) -> &CastingController { &self.casting }
    pub fn bite_timer(&self) -> &BiteWindowTimer { &self.bite }
    #[cfg(test)]
    pub(crate) fn bite_timer_mut(&mut self) -> &mut BiteWindowTimer { &mut self.bite }
    pub fn skill_check(&self) -> &SkillCheckGame { &self.skill_check }
    #[cfg(test)]
    pub(crate) fn skill_check_mut(&mut self) -> &mut SkillCheckGame { &mut self.skill_check }
    pub fn bobber(&self) -> Option<&BobberAgent> { self.bobber.as_ref() }
    pub fn score(&self) -> &ScoreBoard { &self.score }
    pub fn rod(&self) -> &RodController { &self.rod }
    pub fn movement_enabled(&self) -> bool { self.movement_enabled }

    pub fn enable(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.state == FishingState::Inactive {
            self.rod.set_state(RodState::Idle);
            self.transition(FishingState::Idle, &mut events);
        }
        events
    }

    pub fn disable(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.state == FishingState::Inactive {
            return events;
        }
        self.restart_into(RestartReason::Disabled, &mut events);
        self.rod.set_state(RodState::Default);
        self.transition(FishingState::Inactive, &mut events);
        self.movement_enabled = true;
        events
    }

    /// Physics owns the bobber while it flies; mirror its position until it lands.
    pub fn sync_bobber_position(&mut self, position: Vec3) {
        if let Some(bobber) = self.bobber.as_mut() {
            if !bobber.in_water {
                bobber.position = position;
            }
        }
    }

    pub fn handle_environment(&mut self, event: EnvironmentEvent) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        match event {
            EnvironmentEvent::EnteredWater { position } => {
                if self.state != FishingState::WaitingForCatch {
                    return events;
                }
                let Some(bobber) = self.bobber.as_mut() else { return events; };
                if bobber.settle(position) {
                    self.bite.reset();
                    debug!("bobber landed at ({:.2},{:.2},{:.2})", position.x, position.y, position.z);
                    events.push(SessionEvent::BobberLanded { position });
                }
            }
            EnvironmentEvent::HitObstacle => {
                if self.state != FishingState::Inactive {
                    self.restart_into(RestartReason::Obstacle, &mut events);
                }
            }
        }
        events
    }

    pub fn restart(&mut self, reason: RestartReason) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.state != FishingState::Inactive {
            self.restart_into(reason, &mut events);
        }
        events
    }

    pub fn tick(
        &mut self,
        input: &FrameInput,
        dt: f32,
        rng: &mut impl Rng,
        probe: &impl ObstacleProbe,
    ) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        self.score.tick(dt);

        match self.state {
            FishingState::Inactive => return events,
            FishingState::Idle => {
                if self.casting.is_pending() {
                    // a launch cancelled by a restart drains here
                    if self.casting.tick(false, dt) == CastEvent::Cancelled {
                        debug!("pending launch cancelled");
                        events.push(SessionEvent::LaunchCancelled);
                    }
                } else if input.cast_held {
                    self.transition(FishingState::Casting, &mut events);
                    self.tick_casting(input, dt, &mut events);
                }
            }
            FishingState::Casting => self.tick_casting(input, dt, &mut events),
            FishingState::WaitingForCatch => self.tick_waiting(input, dt, rng, probe, &mut events),
            FishingState::Reeling => self.tick_reeling(input, dt, rng, probe, &mut events),
        }

        let bobber_pos = self.bobber.as_ref().map(|b| b.position);
        self.rod_bend = self.rod.update(dt, &input.rod, bobber_pos);
        events
    }

    pub fn view(&self) -> FishingView {
        let skill_check = self.skill_check.active.then(|| SkillCheckView {
            value: self.skill_check.value,
            target_center: self.skill_check.target_center,
            target_width: self.skill_check.target_width,
            progress: self.skill_check.progress,
        });
        FishingView {
            state: self.state,
            cast_force: self.casting.force,
            max_force: self.casting.config().max_force,
            casting_bar_visible: self.state == FishingState::Casting,
            skill_check,
            score: self.score.total,
            last_delta: self.score.last_delta,
            congrats_visible: self.score.congrats_visible(),
            bobber_position: self.bobber.as_ref().map(|b| b.position),
            bobber_biting: self.bobber.as_ref().is_some_and(|b| b.biting),
            rod_state: self.rod.state,
            rod_bend: self.rod_bend,
            movement_enabled: self.movement_enabled,
        }
    }

    fn tick_casting(&mut self, input: &FrameInput, dt: f32, events: &mut Vec<SessionEvent>) {
        match self.casting.tick(input.cast_held, dt) {
            CastEvent::Idle => self.transition(FishingState::Idle, events),
            CastEvent::Charging { .. } | CastEvent::Winding => {}
            CastEvent::Committed { force, forced } => {
                debug!("cast committed force={:.2} forced={}", force, forced);
                events.push(SessionEvent::CastCommitted { force, forced });
            }
            CastEvent::Launched { force } => {
                let origin = input.rod.tip;
                let impulse = launch_impulse(input.rod.forward, force);
                info!(
                    "LAUNCH force={:.2} origin=({:.2},{:.2},{:.2}) impulse=({:.2},{:.2},{:.2})",
                    force, origin.x, origin.y, origin.z, impulse.x, impulse.y, impulse.z
                );
                self.bobber = Some(BobberAgent::new(origin, self.cfg.bobber));
                self.bite.reset();
                self.rod.set_state(RodState::WaitingForCatch);
                events.push(SessionEvent::BobberLaunched { origin, impulse });
                self.transition(FishingState::WaitingForCatch, events);
            }
            CastEvent::Cancelled => {
                events.push(SessionEvent::LaunchCancelled);
                self.transition(FishingState::Idle, events);
            }
        }
    }

    fn tick_waiting(
        &mut self,
        input: &FrameInput,
        dt: f32,
        rng: &mut impl Rng,
        probe: &impl ObstacleProbe,
        events: &mut Vec<SessionEvent>,
    ) {
        let Some(bobber) = self.bobber.as_mut() else { return; };
        if !bobber.in_water {
            if input.reel_pressed {
                debug!("reel ignored: bobber still in flight");
            }
            return;
        }

        match self.bite.tick(dt, input.reel_pressed, rng) {
            BiteEvent::Waiting | BiteEvent::Biting => {}
            BiteEvent::BiteStarted => {
                bobber.biting = true;
                debug!("bite started after {:.2}s", self.bite.bite_delay);
                events.push(SessionEvent::BiteStarted);
            }
            BiteEvent::Missed => {
                bobber.biting = false;
                debug!("bite missed, next delay {:.2}s", self.bite.bite_delay);
                events.push(SessionEvent::BiteMissed { next_delay: self.bite.bite_delay });
            }
            BiteEvent::Caught => {
                bobber.hook(rng, probe);
                self.skill_check.activate();
                self.rod.set_state(RodState::Reeling);
                info!("HOOKED fish, reeling");
                events.push(SessionEvent::FishHooked);
                self.transition(FishingState::Reeling, events);
            }
            BiteEvent::Premature => self.restart_into(RestartReason::PrematureReel, events),
        }
    }

    fn tick_reeling(
        &mut self,
        input: &FrameInput,
        dt: f32,
        rng: &mut impl Rng,
        probe: &impl ObstacleProbe,
        events: &mut Vec<SessionEvent>,
    ) {
        if let Some(bobber) = self.bobber.as_mut() {
            bobber.tick(dt, rng, probe);
        }

        self.skill_check.tick(dt);
        let hit = self.skill_check.in_target();
        let outcome = self.skill_check.evaluate(input.reel_pressed, rng);
        if input.reel_pressed {
            events.push(SessionEvent::ReelAttempt { hit, progress: self.skill_check.progress });
        }

        match outcome {
            SkillCheckOutcome::Pending => {}
            SkillCheckOutcome::Failure => {
                info!("ESCAPED fish got away");
                events.push(SessionEvent::FishEscaped);
                self.restart_into(RestartReason::Escaped, events);
            }
            SkillCheckOutcome::Success => {
                let points = self.score.roll(rng);
                self.score.award(points);
                info!("CAUGHT +{} total={}", points, self.score.total);
                events.push(SessionEvent::FishCaught { points, total: self.score.total });
                self.restart_into(RestartReason::Caught, events);
            }
        }
    }

    fn restart_into(&mut self, reason: RestartReason, events: &mut Vec<SessionEvent>) {
        let busy = self.state != FishingState::Idle
            || self.bobber.is_some()
            || self.casting.is_pending()
            || self.casting.force > 0.0
            || self.skill_check.active;

        self.skill_check.reset();
        self.casting.cancel();
        self.bite.reset();
        if self.bobber.take().is_some() {
            events.push(SessionEvent::BobberDespawned);
        }
        self.rod.set_state(RodState::Idle);
        self.transition(FishingState::Idle, events);
        self.movement_enabled = true;

        if busy {
            debug!("restart reason={:?}", reason);
            events.push(SessionEvent::Restarted { reason });
        }
    }

    fn transition(&mut self, to: FishingState, events: &mut Vec<SessionEvent>) {
        if self.state == to {
            return;
        }
        let from = self.state;
        debug!("fishing state {:?} -> {:?}", from, to);
        self.state = to;
        self.movement_enabled = !matches!(to, FishingState::WaitingForCatch | FishingState::Reeling);
        events.push(SessionEvent::StateChanged { from, to });
    }
}
