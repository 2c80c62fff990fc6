// Cast charging: held input ramps force, release (or hitting the cap) commits
// a launch that fires after a fixed delay.
use bevy::math::Vec3;

use crate::fishing::config::CastingConfig;

/// Launch committed but not yet fired. Force is captured at commit time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingLaunch {
    pub force: f32,
    pub elapsed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CastEvent {
    /// Nothing held, nothing pending.
    Idle,
    Charging { force: f32 },
    /// Launch sequence entered; `forced` when the cap was reached while held.
    Committed { force: f32, forced: bool },
    /// Waiting out the launch delay.
    Winding,
    Launched { force: f32 },
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct CastingController {
    pub force: f32,
    pub pending: Option<PendingLaunch>,
    cancel_requested: bool,
    cfg: CastingConfig,
}

impl CastingController {
    pub fn new(cfg: CastingConfig) -> Self {
        Self { force: 0.0, pending: None, cancel_requested: false, cfg }
    }

    pub fn config(&self) -> &CastingConfig { &self.cfg }

    pub fn is_pending(&self) -> bool { self.pending.is_some() }

    /// Asks the in-flight launch to abort at the next tick boundary.
    pub fn cancel(&mut self) {
        self.force = 0.0;
        if self.pending.is_some() {
            self.cancel_requested = true;
        }
    }

    pub fn reset(&mut self) {
        self.force = 0.0;
        self.pending = None;
        self.cancel_requested = false;
    }

    pub fn tick(&mut self, held: bool, dt: f32) -> CastEvent {
        if let Some(mut pending) = self.pending {
            if self.cancel_requested {
                self.reset();
                return CastEvent::Cancelled;
            }
            pending.elapsed += dt;
            if pending.elapsed >= self.cfg.launch_delay {
                self.pending = None;
                self.force = 0.0;
                return CastEvent::Launched { force: pending.force };
            }
            self.pending = Some(pending);
            return CastEvent::Winding;
        }

        if held {
            self.force = (self.force + self.cfg.ramp_rate * dt).min(self.cfg.max_force);
            if self.force >= self.cfg.max_force {
                return self.commit(true);
            }
            return CastEvent::Charging { force: self.force };
        }

        if self.force > 0.0 {
            return self.commit(false);
        }
        CastEvent::Idle
    }

    fn commit(&mut self, forced: bool) -> CastEvent {
        self.pending = Some(PendingLaunch { force: self.force, elapsed: 0.0 });
        self.cancel_requested = false;
        CastEvent::Committed { force: self.force, forced }
    }
}

/// Impulse applied to a freshly spawned bobber: unit (forward + up) scaled by force.
pub fn launch_impulse(forward: Vec3, force: f32) -> Vec3 {
    (forward + Vec3::Y).normalize_or_zero() * force
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> CastingController {
        CastingController::new(CastingConfig::default())
    }

    #[test]
    fn force_ramps_monotonically_and_caps() {
        let mut c = controller();
        let mut last = 0.0;
        let mut commits = 0;
        for _ in 0..200 {
            match c.tick(true, 0.1) {
                CastEvent::Committed { forced, .. } => {
                    assert!(forced);
                    commits += 1;
                }
                CastEvent::Launched { force } => assert_eq!(force, 10.0),
                _ => {}
            }
            if c.is_pending() {
                assert_eq!(c.force, 10.0);
            }
            assert!(c.force >= 0.0 && c.force <= 10.0);
            if c.pending.is_none() && c.force > 0.0 {
                assert!(c.force >= last);
            }
            last = c.force;
        }
        assert!(commits >= 1);
    }

    #[test]
    fn release_launches_once_after_delay() {
        let mut c = controller();
        for _ in 0..4 {
            c.tick(true, 0.5);
        }
        assert_eq!(c.force, 3.0);
        assert_eq!(c.tick(false, 0.5), CastEvent::Committed { force: 3.0, forced: false });
        // held again while winding is ignored
        assert_eq!(c.tick(true, 0.5), CastEvent::Winding);
        assert_eq!(c.force, 3.0);
        assert_eq!(c.tick(false, 0.5), CastEvent::Winding);
        assert_eq!(c.tick(false, 0.5), CastEvent::Launched { force: 3.0 });
        assert_eq!(c.force, 0.0);
        assert_eq!(c.tick(false, 0.5), CastEvent::Idle);
    }

    #[test]
    fn cancel_aborts_pending_launch() {
        let mut c = controller();
        c.tick(true, 1.0);
        c.tick(false, 0.1);
        assert!(c.is_pending());
        c.cancel();
        assert_eq!(c.tick(false, 5.0), CastEvent::Cancelled);
        assert!(!c.is_pending());
        assert_eq!(c.force, 0.0);
    }

    #[test]
    fn release_without_force_does_nothing() {
        let mut c = controller();
        assert_eq!(c.tick(false, 0.1), CastEvent::Idle);
        assert!(!c.is_pending());
    }

    #[test]
    fn impulse_magnitude_matches_force() {
        let imp = launch_impulse(Vec3::new(0.0, 0.0, -1.0), 3.0);
        assert!((imp.length() - 3.0).abs() < 1e-5);
        assert!(imp.y > 0.0 && imp.z < 0.0);
    }
}
