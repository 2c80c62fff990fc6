// Bite wait: a silent randomized delay followed by a short response window.
use rand::Rng;

use crate::fishing::config::BiteConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiteEvent {
    Waiting,
    BiteStarted,
    Biting,
    /// Window expired without a strike; timer recycled with a fresh delay.
    Missed,
    Caught,
    /// Strike before any bite.
    Premature,
}

#[derive(Debug, Clone)]
pub struct BiteWindowTimer {
    pub elapsed_wait: f32,
    pub bite_delay: f32,
    pub biting: bool,
    cfg: BiteConfig,
}

impl BiteWindowTimer {
    pub fn new(cfg: BiteConfig, rng: &mut impl Rng) -> Self {
        let delay = draw_delay(&cfg, rng);
        Self::with_delay(cfg, delay)
    }

    pub fn with_delay(cfg: BiteConfig, bite_delay: f32) -> Self {
        Self { elapsed_wait: 0.0, bite_delay, biting: false, cfg }
    }

    pub fn response_window(&self) -> f32 { self.cfg.response_window }

    /// Clears the current cycle but keeps the drawn delay.
    pub fn reset(&mut self) {
        self.elapsed_wait = 0.0;
        self.biting = false;
    }

    pub fn tick(&mut self, dt: f32, reel_pressed: bool, rng: &mut impl Rng) -> BiteEvent {
        self.elapsed_wait += dt;

        if self.elapsed_wait < self.bite_delay {
            return if reel_pressed { BiteEvent::Premature } else { BiteEvent::Waiting };
        }

        if self.elapsed_wait >= self.bite_delay + self.cfg.response_window {
            self.elapsed_wait = 0.0;
            self.bite_delay = draw_delay(&self.cfg, rng);
            self.biting = false;
            return BiteEvent::Missed;
        }

        if reel_pressed {
            self.reset();
            return BiteEvent::Caught;
        }

        if self.biting {
            BiteEvent::Biting
        } else {
            self.biting = true;
            BiteEvent::BiteStarted
        }
    }
}

fn draw_delay(cfg: &BiteConfig, rng: &mut impl Rng) -> f32 {
    if cfg.delay_max > cfg.delay_min {
        rng.gen_range(cfg.delay_min..cfg.delay_max)
    } else {
        cfg.delay_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn timer(delay: f32) -> BiteWindowTimer {
        BiteWindowTimer::with_delay(BiteConfig::default(), delay)
    }

    #[test]
    fn bite_then_timeout_redraws_delay() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut t = timer(5.0);
        for _ in 0..9 {
            assert_eq!(t.tick(0.5, false, &mut rng), BiteEvent::Waiting);
        }
        assert_eq!(t.tick(0.5, false, &mut rng), BiteEvent::BiteStarted);
        assert_eq!(t.elapsed_wait, 5.0);
        assert!(t.biting);
        for _ in 0..3 {
            assert_eq!(t.tick(0.5, false, &mut rng), BiteEvent::Biting);
        }
        assert_eq!(t.tick(0.5, false, &mut rng), BiteEvent::Missed);
        assert_eq!(t.elapsed_wait, 0.0);
        assert!(!t.biting);
        assert!((5.0..15.0).contains(&t.bite_delay));
    }

    #[test]
    fn strike_during_bite_is_caught_and_keeps_delay() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut t = timer(5.0);
        t.tick(5.5, false, &mut rng);
        assert!(t.biting);
        assert_eq!(t.tick(0.1, true, &mut rng), BiteEvent::Caught);
        assert_eq!(t.elapsed_wait, 0.0);
        assert_eq!(t.bite_delay, 5.0);
    }

    #[test]
    fn early_strike_is_premature() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut t = timer(5.0);
        t.tick(2.0, false, &mut rng);
        assert_eq!(t.tick(0.1, true, &mut rng), BiteEvent::Premature);
        assert_eq!(t.bite_delay, 5.0);
    }

    #[test]
    fn strike_after_window_is_not_caught() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut t = timer(5.0);
        assert_eq!(t.tick(7.0, true, &mut rng), BiteEvent::Missed);
    }

    #[test]
    fn drawn_delays_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(15);
        for _ in 0..100 {
            let t = BiteWindowTimer::new(BiteConfig::default(), &mut rng);
            assert!((5.0..15.0).contains(&t.bite_delay));
        }
    }
}
