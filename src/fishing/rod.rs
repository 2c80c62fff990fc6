// Rod visual state and bend values for the animation collaborator.
use bevy::math::{Vec2, Vec3};

use crate::fishing::config::RodConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RodState {
    #[default]
    Default,
    Idle,
    WaitingForCatch,
    Reeling,
}

/// World-space frame of the rod (and the angler holding it) for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RodPose {
    pub tip: Vec3, // line attachment, where bobbers spawn
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub right: Vec3,
}

impl Default for RodPose {
    fn default() -> Self {
        Self {
            tip: Vec3::new(0.0, 1.5, -0.5),
            position: Vec3::new(0.0, 1.0, 0.0),
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
        }
    }
}

/// Bend values in [-1, 1] for the rod animation blend.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RodBend {
    pub horizontal: f32,
    pub vertical: f32,
}

#[derive(Debug, Clone)]
pub struct RodController {
    pub state: RodState,
    angle: Vec2, // smoothed (horizontal, vertical) in degrees
    cfg: RodConfig,
}

impl RodController {
    pub fn new(cfg: RodConfig) -> Self {
        Self { state: RodState::Default, angle: Vec2::ZERO, cfg }
    }

    pub fn set_state(&mut self, state: RodState) {
        self.state = state;
    }

    pub fn bend(&self) -> RodBend {
        RodBend {
            horizontal: remap_angle(self.angle.x, self.cfg.bend_min_deg, self.cfg.bend_max_deg),
            vertical: remap_angle(self.angle.y, self.cfg.bend_min_deg, self.cfg.bend_max_deg),
        }
    }

    pub fn update(&mut self, dt: f32, pose: &RodPose, bobber: Option<Vec3>) -> RodBend {
        let target = match (self.state, bobber) {
            (RodState::Default, _) | (RodState::WaitingForCatch, _) => return self.bend(),
            (RodState::Reeling, Some(bobber)) => bobber_angle(pose, bobber),
            _ => Vec2::ZERO,
        };
        let t = (self.cfg.bend_speed * dt).clamp(0.0, 1.0);
        self.angle = self.angle.lerp(target, t);
        self.bend()
    }
}

/// (horizontal, vertical) degrees off the rod's right/up axes, zero when aligned.
pub fn bobber_angle(pose: &RodPose, bobber: Vec3) -> Vec2 {
    let dir = pose.position - bobber;
    if dir.length_squared() < 1e-8 {
        return Vec2::ZERO;
    }
    let vertical = dir.angle_between(pose.up).to_degrees() - 90.0;
    let horizontal = dir.angle_between(pose.right).to_degrees() - 90.0;
    Vec2::new(horizontal, vertical)
}

fn remap_angle(angle: f32, min: f32, max: f32) -> f32 {
    if max <= min {
        return 0.0;
    }
    let x = ((angle - min) / (max - min)).clamp(0.0, 1.0);
    -1.0 + 2.0 * x
}
