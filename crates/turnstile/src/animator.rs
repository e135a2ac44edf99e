//! Time-based tween driving the cube angle towards a rest position.

use crate::config::{Easing, Timing};
use std::time::Duration;

impl Easing {
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    Running(f64),
    /// Last frame of a tween; carries the exact target value.
    Finished(f64),
}

#[derive(Debug, Clone, Default)]
pub struct Tween {
    active: bool,
    from: f64,
    to: f64,
    elapsed: Duration,
    timing: Timing,
}

impl Tween {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self, from: f64, to: f64, timing: Timing) {
        self.active = true;
        self.from = from;
        self.to = to;
        self.elapsed = Duration::ZERO;
        self.timing = timing;
    }

    /// Advances the tween by `dt`. Returns `None` once inactive. A zero-length
    /// tween finishes on its first tick.
    pub fn tick(&mut self, dt: Duration) -> Option<Frame> {
        if !self.active {
            return None;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.timing.duration {
            self.active = false;
            return Some(Frame::Finished(self.to));
        }
        let t = self.elapsed.as_secs_f64() / self.timing.duration.as_secs_f64();
        let eased = self.timing.easing.apply(t);
        Some(Frame::Running(self.from + (self.to - self.from) * eased))
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
        assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
        assert!(Easing::EaseIn.apply(0.25) < 0.25);
        assert!(Easing::EaseOut.apply(0.25) > 0.25);
    }

    #[test]
    fn test_tween_runs_to_target() {
        let mut tween = Tween::new();
        tween.start(0.0, 90.0, Timing::new(100 * MS, Easing::Linear));

        assert_eq!(tween.tick(50 * MS), Some(Frame::Running(45.0)));
        assert_eq!(tween.tick(50 * MS), Some(Frame::Finished(90.0)));
        assert!(!tween.is_active());
        assert_eq!(tween.tick(50 * MS), None);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut tween = Tween::new();
        tween.start(180.0, 90.0, Timing::new(Duration::ZERO, Easing::EaseOut));
        assert_eq!(tween.tick(Duration::ZERO), Some(Frame::Finished(90.0)));
    }

    #[test]
    fn test_cancel_stops_without_finishing() {
        let mut tween = Tween::new();
        tween.start(0.0, 90.0, Timing::step());
        tween.cancel();
        assert_eq!(tween.tick(Duration::from_secs(5)), None);
    }
}
