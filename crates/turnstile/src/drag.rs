use crate::config::{Axis, DragSettings, RotationDirection};

pub const QUARTER_TURN: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Signed number of quarter-turns nearest to `offset` degrees.
pub fn quarter_turns(offset: f64) -> i64 {
    (offset / QUARTER_TURN).round() as i64
}

/// Pointer state for a single drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragTracker {
    origin: Point,
    start_angle: f64,
    angle: f64,
    engaged: bool,
}

impl DragTracker {
    pub fn new(origin: Point, start_angle: f64) -> Self {
        Self {
            origin,
            start_angle,
            angle: start_angle,
            engaged: false,
        }
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Whether the pointer has left the deadzone at least once.
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Feeds a pointer position. Returns the new cube angle when it changed.
    pub fn update(
        &mut self,
        point: Point,
        direction: RotationDirection,
        settings: &DragSettings,
    ) -> Option<f64> {
        let travel = match direction.axis() {
            Axis::Horizontal => point.x - self.origin.x,
            Axis::Vertical => point.y - self.origin.y,
        };

        if !self.engaged {
            if travel.abs() <= settings.deadzone {
                return None;
            }
            self.engaged = true;
        }

        // dragging towards the origin of the axis is forward for left/top cubes
        // min/max rather than clamp: a negative or NaN limit must not panic
        let limit = settings.max_degrees.abs();
        let offset = (-direction.sign() * travel * settings.sensitivity)
            .max(-limit)
            .min(limit);
        let target = self.start_angle + offset;
        let next = self.angle + (target - self.angle) * (1.0 - settings.smoothing);

        if next == self.angle {
            return None;
        }
        self.angle = next;
        Some(next)
    }

    /// Net quarter-turns the gesture would snap to if released now.
    pub fn turns(&self) -> i64 {
        quarter_turns(self.angle - self.start_angle)
    }

    pub fn snap_target(&self) -> f64 {
        self.start_angle + self.turns() as f64 * QUARTER_TURN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> DragSettings {
        DragSettings::default()
    }

    #[test]
    fn test_quarter_turns_rounding() {
        assert_eq!(quarter_turns(0.0), 0);
        assert_eq!(quarter_turns(44.0), 0);
        assert_eq!(quarter_turns(46.0), 1);
        assert_eq!(quarter_turns(-46.0), -1);
        assert_eq!(quarter_turns(120.0), 1);
        assert_eq!(quarter_turns(-180.0), -2);
    }

    #[test]
    fn test_deadzone_holds_until_crossed() {
        let mut drag = DragTracker::new(Point::default(), 0.0);
        assert_eq!(
            drag.update(Point::new(-4.0, 30.0), RotationDirection::Left, &settings()),
            None
        );
        assert!(!drag.is_engaged());

        // 1:1 tracking once engaged, including the travel inside the deadzone
        assert_eq!(
            drag.update(Point::new(-10.0, 0.0), RotationDirection::Left, &settings()),
            Some(5.0)
        );
        assert!(drag.is_engaged());
        assert_eq!(
            drag.update(Point::new(-2.0, 0.0), RotationDirection::Left, &settings()),
            Some(1.0)
        );
    }

    #[test]
    fn test_vertical_axis_reads_y() {
        let mut drag = DragTracker::new(Point::new(100.0, 100.0), 90.0);
        assert_eq!(
            drag.update(Point::new(400.0, 100.0), RotationDirection::Top, &settings()),
            None
        );
        assert_eq!(
            drag.update(Point::new(100.0, 40.0), RotationDirection::Top, &settings()),
            Some(120.0)
        );
    }

    #[test]
    fn test_right_direction_inverts_travel() {
        let mut drag = DragTracker::new(Point::default(), 0.0);
        assert_eq!(
            drag.update(Point::new(100.0, 0.0), RotationDirection::Right, &settings()),
            Some(50.0)
        );
        assert_eq!(drag.turns(), 1);
    }

    #[test]
    fn test_clamped_to_max_degrees() {
        let mut drag = DragTracker::new(Point::default(), 180.0);
        drag.update(Point::new(-1000.0, 0.0), RotationDirection::Left, &settings());
        assert_eq!(drag.angle(), 300.0);
        assert_eq!(drag.turns(), 1);
        assert_eq!(drag.snap_target(), 270.0);

        drag.update(Point::new(1000.0, 0.0), RotationDirection::Left, &settings());
        assert_eq!(drag.angle(), 60.0);
        assert_eq!(drag.turns(), -1);
    }

    #[test]
    fn test_smoothing_lags_behind_pointer() {
        let smooth = DragSettings {
            smoothing: 0.5,
            ..settings()
        };
        let mut drag = DragTracker::new(Point::default(), 0.0);
        assert_eq!(
            drag.update(Point::new(-80.0, 0.0), RotationDirection::Left, &smooth),
            Some(20.0)
        );
        assert_eq!(
            drag.update(Point::new(-80.0, 0.0), RotationDirection::Left, &smooth),
            Some(30.0)
        );
    }

    #[test]
    fn test_bad_limits_do_not_panic() {
        let negative = DragSettings {
            max_degrees: -10.0,
            ..settings()
        };
        let mut drag = DragTracker::new(Point::default(), 0.0);
        assert_eq!(
            drag.update(Point::new(-100.0, 0.0), RotationDirection::Left, &negative),
            Some(10.0)
        );

        let nan = DragSettings {
            max_degrees: f64::NAN,
            ..settings()
        };
        let mut drag = DragTracker::new(Point::default(), 0.0);
        assert_eq!(
            drag.update(Point::new(-100.0, 0.0), RotationDirection::Left, &nan),
            Some(50.0)
        );
    }
}
