// Tuning values for every fishing sub-machine, loadable from RON.
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct CastingConfig {
    pub max_force: f32,
    pub ramp_rate: f32,    // force units per second while held
    pub launch_delay: f32, // seconds between commit and bobber spawn
}
impl Default for CastingConfig {
    fn default() -> Self {
        Self { max_force: 10.0, ramp_rate: 1.5, launch_delay: 1.5 }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct BiteConfig {
    pub delay_min: f32,
    pub delay_max: f32, // exclusive
    pub response_window: f32,
}
impl Default for BiteConfig {
    fn default() -> Self {
        Self { delay_min: 5.0, delay_max: 15.0, response_window: 2.0 }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SkillCheckConfig {
    pub min_value: f32,
    pub max_value: f32,
    pub base_speed: f32,
    pub base_width: f32,
    pub base_center: f32,
    pub initial_value: f32,
    pub initial_progress: f32,
    pub progress_step: f32,
    pub speed_step: f32,
    pub width_step: f32,
    pub center_min: f32,
    pub center_max: f32,
    /// Lower bound for the target width after hits. `None` lets it shrink without limit.
    pub width_floor: Option<f32>,
}
impl Default for SkillCheckConfig {
    fn default() -> Self {
        Self {
            min_value: 0.0,
            max_value: 1.0,
            base_speed: 1.0,
            base_width: 0.2,
            base_center: 0.5,
            initial_value: 0.5,
            initial_progress: 0.2,
            progress_step: 0.2,
            speed_step: 0.1,
            width_step: 0.05,
            center_min: 0.2,
            center_max: 0.8,
            width_floor: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct BobberConfig {
    pub move_speed: f32,
    pub new_point_radius: f32,
    pub arrival_tolerance: f32,
    pub obstacle_offset: f32,
    pub collider_radius: f32,
    pub mass: f32, // kg; impulse / mass is the launch speed
}
impl Default for BobberConfig {
    fn default() -> Self {
        Self {
            move_speed: 7.0,
            new_point_radius: 20.0,
            arrival_tolerance: 1.0,
            obstacle_offset: 1.5,
            collider_radius: 0.1,
            mass: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RodConfig {
    pub bend_min_deg: f32,
    pub bend_max_deg: f32,
    pub bend_speed: f32,
}
impl Default for RodConfig {
    fn default() -> Self {
        Self { bend_min_deg: -90.0, bend_max_deg: 90.0, bend_speed: 10.0 }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub min_points: u32,
    pub max_points: u32, // exclusive
    pub congrats_seconds: f32,
}
impl Default for ScoreConfig {
    fn default() -> Self {
        Self { min_points: 20, max_points: 60, congrats_seconds: 5.0 }
    }
}

/// Full fishing tuning set. Missing sections fall back to their defaults.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct FishingConfig {
    pub casting: CastingConfig,
    pub bite: BiteConfig,
    pub skill_check: SkillCheckConfig,
    pub bobber: BobberConfig,
    pub rod: RodConfig,
    pub score: ScoreConfig,
    pub rng_seed: Option<u64>,
}
