// Cumulative catch score plus the short-lived "congratulations" banner.
use rand::Rng;

use crate::fishing::config::ScoreConfig;

#[derive(Debug, Clone)]
pub struct ScoreBoard {
    pub total: u32,
    pub last_delta: u32,
    pub congrats_remaining: f32,
    cfg: ScoreConfig,
}

impl ScoreBoard {
    pub fn new(cfg: ScoreConfig) -> Self {
        Self { total: 0, last_delta: 0, congrats_remaining: 0.0, cfg }
    }

    /// Draws a catch value in `[min_points, max_points)`.
    pub fn roll(&self, rng: &mut impl Rng) -> u32 {
        if self.cfg.max_points > self.cfg.min_points {
            rng.gen_range(self.cfg.min_points..self.cfg.max_points)
        } else {
            self.cfg.min_points
        }
    }

    pub fn award(&mut self, points: u32) {
        self.total += points;
        self.last_delta = points;
        self.congrats_remaining = self.cfg.congrats_seconds;
    }

    pub fn congrats_visible(&self) -> bool { self.congrats_remaining > 0.0 }

    pub fn tick(&mut self, dt: f32) {
        self.congrats_remaining = (self.congrats_remaining - dt).max(0.0);
    }
}
