// Bobber agent: tracks where the float is, whether it settled in water, and
// drives the hooked fish's wandering once a bite is struck.
use bevy::math::{Vec2, Vec3};
use rand::Rng;

use crate::fishing::config::BobberConfig;

/// Answers "what non-water surface lies on the segment from `from` to `to`?".
pub trait ObstacleProbe {
    fn linecast(&self, from: Vec3, to: Vec3) -> Option<Vec3>;
}

/// Probe for an unobstructed lake.
pub struct OpenWater;
impl ObstacleProbe for OpenWater {
    fn linecast(&self, _from: Vec3, _to: Vec3) -> Option<Vec3> { None }
}

#[derive(Debug, Clone)]
pub struct BobberAgent {
    pub position: Vec3,
    pub in_water: bool,
    pub biting: bool,
    pub hooked: bool,
    pub target_point: Vec3,
    cfg: BobberConfig,
}

impl BobberAgent {
    pub fn new(position: Vec3, cfg: BobberConfig) -> Self {
        Self { position, in_water: false, biting: false, hooked: false, target_point: position, cfg }
    }

    /// Fixes the bobber on the surface. Returns false if it had already landed.
    pub fn settle(&mut self, position: Vec3) -> bool {
        if self.in_water {
            return false;
        }
        self.in_water = true;
        self.position = position;
        self.target_point = position;
        true
    }

    pub fn hook(&mut self, rng: &mut impl Rng, probe: &impl ObstacleProbe) {
        self.biting = false;
        self.hooked = true;
        self.target_point = self.pick_target(rng, probe);
    }

    /// Moves toward the current target and re-targets on arrival.
    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng, probe: &impl ObstacleProbe) {
        if !self.hooked {
            return;
        }
        let dir = (self.target_point - self.position).normalize_or_zero();
        self.position += dir * self.cfg.move_speed * dt;
        if self.position.distance(self.target_point) <= self.cfg.arrival_tolerance {
            self.target_point = self.pick_target(rng, probe);
        }
    }

    /// Random point in a disk around the bobber, pulled back from any obstacle
    /// between here and there. The pulled-back point is not re-checked.
    pub fn pick_target(&self, rng: &mut impl Rng, probe: &impl ObstacleProbe) -> Vec3 {
        let offset = random_in_unit_disk(rng) * self.cfg.new_point_radius;
        let candidate = self.position + Vec3::new(offset.x, 0.0, offset.y);
        match probe.linecast(self.position, candidate) {
            Some(hit) => hit - (hit - self.position).normalize_or_zero() * self.cfg.obstacle_offset,
            None => candidate,
        }
    }
}

fn random_in_unit_disk(rng: &mut impl Rng) -> Vec2 {
    loop {
        let p = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        if p.length_squared() <= 1.0 {
            return p;
        }
    }
}
