use crate::config::AutoplaySettings;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Autoplay {
    enabled: bool,
    interval: Duration,
    elapsed: Duration,
}

impl Autoplay {
    pub fn new(settings: &AutoplaySettings) -> Self {
        Self {
            enabled: settings.enabled,
            interval: settings.interval,
            elapsed: Duration::ZERO,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Returns true when an interval has elapsed. Fires at most once per call,
    /// so a long stall does not replay the missed intervals.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.enabled || self.interval.is_zero() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed < self.interval {
            return false;
        }
        self.elapsed -= self.interval;
        if self.elapsed >= self.interval {
            self.elapsed = Duration::ZERO;
        }
        true
    }
}
