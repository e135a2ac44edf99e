use crate::a11y::Announcement;
use crate::animator::{Frame, Tween};
use crate::autoplay::Autoplay;
use crate::config::{Axis, CarouselConfig, Timing};
use crate::drag::{DragTracker, Point, QUARTER_TURN};
use crate::faces::{FACE_COUNT, FaceRing, Step, wrap};
use crate::item::CarouselItem;
use std::time::Duration;
use strum::EnumString;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// A step or a drag snap is animating; new commands are dropped.
    Rotating,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    /// Raised once per settled rotation with the new logical index.
    IndexChanged(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum NavKey {
    #[strum(serialize = "left", serialize = "arrowleft")]
    Left,
    #[strum(serialize = "right", serialize = "arrowright")]
    Right,
    #[strum(serialize = "up", serialize = "arrowup")]
    Up,
    #[strum(serialize = "down", serialize = "arrowdown")]
    Down,
}

/// Imperative handle offered to whatever hosts the carousel.
pub trait CarouselControl {
    fn advance(&mut self, step: Step) -> bool;

    fn current_index(&self) -> usize;

    fn next(&mut self) -> bool {
        self.advance(Step::Forward)
    }

    fn prev(&mut self) -> bool {
        self.advance(Step::Backward)
    }
}

#[derive(Debug, Clone)]
enum Motion {
    Idle,
    Rotating { turns: i64 },
    Dragging(DragTracker),
}

#[derive(Debug, Clone)]
pub struct Carousel {
    items: Vec<CarouselItem>,
    config: CarouselConfig,
    logical_index: usize,
    faces: FaceRing,
    angle: f64,
    motion: Motion,
    tween: Tween,
    autoplay: Autoplay,
    announcement: Option<Announcement>,
    torn_down: bool,
}

impl Carousel {
    pub fn new(items: Vec<CarouselItem>, config: CarouselConfig) -> Self {
        let config = config.sanitized();
        let faces = FaceRing::seeded(0, items.len());
        let announcement = Announcement::for_item(&items, 0);
        Self {
            autoplay: Autoplay::new(&config.autoplay),
            items,
            config,
            logical_index: 0,
            faces,
            angle: 0.0,
            motion: Motion::Idle,
            tween: Tween::new(),
            announcement,
            torn_down: false,
        }
    }

    pub fn items(&self) -> &[CarouselItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&CarouselItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        match self.motion {
            Motion::Idle => Phase::Idle,
            Motion::Rotating { .. } => Phase::Rotating,
            Motion::Dragging(_) => Phase::Dragging,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.motion, Motion::Rotating { .. })
    }

    /// Cube angle in degrees; positive is forward progress.
    pub fn rotation_angle(&self) -> f64 {
        self.angle
    }

    pub fn front_face(&self) -> usize {
        self.faces.front()
    }

    /// Item index painted on each physical face.
    pub fn face_bindings(&self) -> [Option<usize>; FACE_COUNT] {
        self.faces.bindings()
    }

    pub fn announcement(&self) -> Option<&Announcement> {
        self.announcement.as_ref()
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.autoplay.is_enabled()
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        if self.torn_down {
            return;
        }
        self.autoplay.set_enabled(enabled);
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.config.reduced_motion = reduced;
    }

    /// Applies new settings. Any motion in flight is abandoned at the last rest angle.
    pub fn set_config(&mut self, config: CarouselConfig) {
        if self.torn_down {
            return;
        }
        self.cancel_motion();
        let config = config.sanitized();
        if config.autoplay != self.config.autoplay {
            self.autoplay = Autoplay::new(&config.autoplay);
        }
        self.config = config;
    }

    /// Replaces the item list and resets to the first item at rest. No event is raised.
    pub fn set_items(&mut self, items: Vec<CarouselItem>) {
        if self.torn_down {
            return;
        }
        self.cancel_motion();
        self.items = items;
        self.logical_index = 0;
        self.faces = FaceRing::seeded(0, self.items.len());
        self.angle = 0.0;
        self.autoplay.reset();
        self.announcement = Announcement::for_item(&self.items, 0);
        log::debug!("Carousel reset with {} items", self.items.len());
    }

    /// Stops everything; later calls are no-ops.
    pub fn teardown(&mut self) {
        self.cancel_motion();
        self.autoplay.set_enabled(false);
        self.torn_down = true;
    }

    fn cancel_motion(&mut self) {
        self.tween.cancel();
        self.motion = Motion::Idle;
        self.angle = self.rest_angle();
    }

    fn rest_angle(&self) -> f64 {
        self.faces.front() as f64 * QUARTER_TURN
    }

    fn timing(&self, timing: Timing) -> Timing {
        if self.config.reduced_motion {
            Timing::new(Duration::ZERO, timing.easing)
        } else {
            timing
        }
    }

    fn start_rotation(&mut self, target: f64, turns: i64, timing: Timing) {
        let timing = self.timing(timing);
        self.tween.start(self.angle, target, timing);
        self.motion = Motion::Rotating { turns };
    }

    pub fn key(&mut self, key: NavKey) -> bool {
        let step = match (self.config.direction.axis(), key) {
            (Axis::Horizontal, NavKey::Right) | (Axis::Vertical, NavKey::Down) => Step::Forward,
            (Axis::Horizontal, NavKey::Left) | (Axis::Vertical, NavKey::Up) => Step::Backward,
            _ => return false,
        };
        self.advance(step)
    }

    pub fn pointer_down(&mut self, point: Point) -> bool {
        if self.torn_down || self.items.is_empty() || !self.config.drag.enabled {
            return false;
        }
        if !matches!(self.motion, Motion::Idle) {
            log::debug!("Ignoring press while {:?}", self.phase());
            return false;
        }
        self.motion = Motion::Dragging(DragTracker::new(point, self.angle));
        true
    }

    /// Returns true when the cube angle changed.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        let Motion::Dragging(tracker) = &mut self.motion else {
            return false;
        };
        match tracker.update(point, self.config.direction, &self.config.drag) {
            Some(angle) => {
                self.angle = angle;
                true
            }
            None => false,
        }
    }

    /// Ends a drag. Returns true when a snap animation started.
    pub fn pointer_up(&mut self) -> bool {
        let tracker = match std::mem::replace(&mut self.motion, Motion::Idle) {
            Motion::Dragging(tracker) => tracker,
            other => {
                self.motion = other;
                return false;
            }
        };

        if !tracker.is_engaged() {
            self.angle = tracker.start_angle();
            return false;
        }

        let turns = tracker.turns();
        log::debug!("Drag released at {:.1}°, snapping {} turns", self.angle, turns);
        self.start_rotation(tracker.snap_target(), turns, self.config.snap);
        true
    }

    pub fn pointer_cancel(&mut self) -> bool {
        self.pointer_up()
    }

    /// Drives animations and autoplay by `dt` of host time.
    pub fn tick(&mut self, dt: Duration) -> Option<CarouselEvent> {
        if self.torn_down {
            return None;
        }

        let mut event = None;
        if let Motion::Rotating { turns } = self.motion {
            match self.tween.tick(dt) {
                Some(Frame::Running(angle)) => self.angle = angle,
                Some(Frame::Finished(angle)) => {
                    self.angle = angle;
                    event = self.settle(turns);
                }
                None => event = self.settle(turns),
            }
        }

        if self.autoplay.tick(dt) {
            self.advance(Step::Forward);
        }
        event
    }

    fn settle(&mut self, turns: i64) -> Option<CarouselEvent> {
        self.motion = Motion::Idle;
        let len = self.items.len();
        let step = Step::from_turns(turns);

        if let Some(step) = step
            && len > 0
        {
            for _ in 0..turns.unsigned_abs() {
                self.logical_index = wrap(self.logical_index as i64 + step.delta(), len);
                self.faces.turn(step, self.logical_index, len);
            }
        }
        self.angle = self.rest_angle();

        if step.is_none() || len == 0 {
            return None;
        }

        self.announcement = Announcement::for_item(&self.items, self.logical_index);
        log::debug!(
            "Settled on item {} after {} turns",
            self.logical_index,
            turns
        );
        Some(CarouselEvent::IndexChanged(self.logical_index))
    }
}

impl CarouselControl for Carousel {
    fn advance(&mut self, step: Step) -> bool {
        if self.torn_down || self.items.is_empty() {
            return false;
        }
        if !matches!(self.motion, Motion::Idle) {
            log::debug!("Dropping {} step while {:?}", step, self.phase());
            return false;
        }
        let target = self.angle + step.delta() as f64 * QUARTER_TURN;
        self.start_rotation(target, step.delta(), self.config.step);
        true
    }

    fn current_index(&self) -> usize {
        self.logical_index
    }
}
