// Reel-in quick-time event: an oscillating marker and a target band that
// tightens on every hit and loosens on every miss.
use rand::Rng;

use crate::fishing::config::SkillCheckConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Rising,
    Falling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillCheckOutcome {
    Pending,
    Success,
    Failure,
}

#[derive(Debug, Clone)]
pub struct SkillCheckGame {
    pub value: f32,
    pub direction: Direction,
    pub progress: f32, // may leave [0,1]; outcome decided on crossing
    pub target_center: f32,
    pub target_width: f32,
    pub speed: f32,
    pub active: bool,
    cfg: SkillCheckConfig,
}

impl SkillCheckGame {
    pub fn new(cfg: SkillCheckConfig) -> Self {
        Self {
            value: cfg.initial_value,
            direction: Direction::Rising,
            progress: cfg.initial_progress,
            target_center: cfg.base_center,
            target_width: cfg.base_width,
            speed: cfg.base_speed,
            active: false,
            cfg,
        }
    }

    pub fn config(&self) -> &SkillCheckConfig { &self.cfg }

    /// Restores every field to its initial constant and deactivates the check.
    pub fn reset(&mut self) {
        *self = Self::new(self.cfg);
    }

    /// Resets and starts accepting attempts.
    pub fn activate(&mut self) {
        self.reset();
        self.active = true;
    }

    /// Moves the marker, bouncing off both bounds.
    pub fn tick(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        let step = self.speed * dt;
        match self.direction {
            Direction::Rising => self.value += step,
            Direction::Falling => self.value -= step,
        }
        if self.value >= self.cfg.max_value {
            self.value = self.cfg.max_value;
            self.direction = Direction::Falling;
        } else if self.value <= self.cfg.min_value {
            self.value = self.cfg.min_value;
            self.direction = Direction::Rising;
        }
    }

    pub fn in_target(&self) -> bool {
        let half = self.target_width / 2.0;
        self.value >= self.target_center - half && self.value <= self.target_center + half
    }

    /// Applies this frame's attempt (if any) and reports whether the reel is decided.
    pub fn evaluate(&mut self, attempt: bool, rng: &mut impl Rng) -> SkillCheckOutcome {
        if !self.active {
            return SkillCheckOutcome::Pending;
        }
        if attempt {
            if self.in_target() {
                self.progress += self.cfg.progress_step;
                self.speed += self.cfg.speed_step;
                self.target_width -= self.cfg.width_step;
                if let Some(floor) = self.cfg.width_floor {
                    self.target_width = self.target_width.max(floor);
                }
                self.target_center = draw_center(&self.cfg, rng);
            } else {
                self.progress -= self.cfg.progress_step;
                self.speed -= self.cfg.speed_step;
                self.target_width += self.cfg.width_step;
            }
        }
        if self.progress < 0.0 {
            SkillCheckOutcome::Failure
        } else if self.progress >= 1.0 {
            SkillCheckOutcome::Success
        } else {
            SkillCheckOutcome::Pending
        }
    }
}

fn draw_center(cfg: &SkillCheckConfig, rng: &mut impl Rng) -> f32 {
    if cfg.center_max > cfg.center_min {
        rng.gen_range(cfg.center_min..cfg.center_max)
    } else {
        cfg.center_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn active_game() -> SkillCheckGame {
        let mut g = SkillCheckGame::new(SkillCheckConfig::default());
        g.activate();
        g
    }

    #[test]
    fn value_bounces_inside_bounds() {
        let mut g = active_game();
        g.speed = 3.7;
        let mut flips = 0;
        let mut last = g.direction;
        for _ in 0..500 {
            g.tick(0.033);
            assert!((0.0..=1.0).contains(&g.value));
            if g.direction != last {
                assert!(g.value == 0.0 || g.value == 1.0, "flip away from bound at {}", g.value);
                flips += 1;
                last = g.direction;
            }
        }
        assert!(flips > 10);
    }

    #[test]
    fn negative_speed_still_clamped() {
        let mut g = active_game();
        g.speed = -2.0;
        for _ in 0..100 {
            g.tick(0.05);
            assert!((0.0..=1.0).contains(&g.value));
        }
    }

    #[test]
    fn inactive_game_neither_moves_nor_decides() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut g = SkillCheckGame::new(SkillCheckConfig::default());
        g.progress = 2.0;
        g.tick(0.5);
        assert_eq!(g.value, 0.5);
        assert_eq!(g.evaluate(true, &mut rng), SkillCheckOutcome::Pending);
        assert_eq!(g.progress, 2.0);
    }

    #[test]
    fn hit_tightens_target() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut g = active_game();
        g.value = g.target_center;
        assert_eq!(g.evaluate(true, &mut rng), SkillCheckOutcome::Pending);
        assert!((g.progress - 0.4).abs() < 1e-6);
        assert!((g.speed - 1.1).abs() < 1e-6);
        assert!((g.target_width - 0.15).abs() < 1e-6);
        assert!((0.2..0.8).contains(&g.target_center));
    }

    #[test]
    fn miss_loosens_target_and_keeps_center() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut g = active_game();
        g.value = 0.95;
        assert_eq!(g.evaluate(true, &mut rng), SkillCheckOutcome::Pending);
        assert!(g.progress.abs() < 1e-6);
        assert!((g.speed - 0.9).abs() < 1e-6);
        assert!((g.target_width - 0.25).abs() < 1e-6);
        assert_eq!(g.target_center, 0.5);
        assert_eq!(g.evaluate(true, &mut rng), SkillCheckOutcome::Failure);
    }

    #[test]
    fn no_attempt_leaves_progress() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut g = active_game();
        g.value = 0.0;
        assert_eq!(g.evaluate(false, &mut rng), SkillCheckOutcome::Pending);
        assert_eq!(g.progress, 0.2);
    }

    #[test]
    fn four_hits_win() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut g = active_game();
        for _ in 0..3 {
            g.value = g.target_center;
            assert_eq!(g.evaluate(true, &mut rng), SkillCheckOutcome::Pending);
        }
        g.value = g.target_center;
        assert_eq!(g.evaluate(true, &mut rng), SkillCheckOutcome::Success);
        assert!(g.progress >= 1.0);
    }

    #[test]
    fn width_floor_applies_when_configured() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut g = SkillCheckGame::new(SkillCheckConfig { width_floor: Some(0.12), ..Default::default() });
        g.activate();
        for _ in 0..3 {
            g.value = g.target_center;
            g.evaluate(true, &mut rng);
        }
        assert_eq!(g.target_width, 0.12);
    }

    #[test]
    fn reset_restores_constants() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut g = active_game();
        g.value = g.target_center;
        g.evaluate(true, &mut rng);
        g.tick(0.3);
        g.reset();
        assert_eq!(g.value, 0.5);
        assert_eq!(g.progress, 0.2);
        assert_eq!(g.speed, 1.0);
        assert_eq!(g.target_width, 0.2);
        assert_eq!(g.target_center, 0.5);
        assert!(!g.active);
    }

    #[test]
    fn pinned_center_range_keeps_target_fixed() {
        let cfg = SkillCheckConfig { center_min: 0.5, center_max: 0.5, ..Default::default() };
        let mut g = SkillCheckGame::new(cfg);
        g.activate();
        let mut rng = StdRng::seed_from_u64(3);
        g.value = g.target_center;
        assert_eq!(g.evaluate(true, &mut rng), SkillCheckOutcome::Pending);
        assert_eq!(g.target_center, 0.5);
    }
}
