use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, DurationMilliSeconds, serde_as};
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Which way the cube turns on a forward step.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RotationDirection {
    #[default]
    #[strum(to_string = "left", serialize = "l")]
    Left,
    #[strum(to_string = "right", serialize = "r")]
    Right,
    #[strum(to_string = "top", serialize = "up", serialize = "t")]
    Top,
    #[strum(to_string = "bottom", serialize = "down", serialize = "b")]
    Bottom,
}

impl RotationDirection {
    pub fn axis(&self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Top | Self::Bottom => Axis::Vertical,
        }
    }

    /// +1 when forward motion pulls content towards the origin of the axis
    /// (leftwards or upwards), -1 otherwise.
    pub fn sign(&self) -> f64 {
        match self {
            Self::Left | Self::Top => 1.0,
            Self::Right | Self::Bottom => -1.0,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[strum(to_string = "linear")]
    Linear,
    #[strum(to_string = "ease-in", serialize = "easein", serialize = "in")]
    EaseIn,
    #[strum(to_string = "ease-out", serialize = "easeout", serialize = "out")]
    EaseOut,
    #[default]
    #[strum(to_string = "ease-in-out", serialize = "easeinout", serialize = "in-out")]
    EaseInOut,
}

#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    #[serde(rename = "duration_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub duration: Duration,
    pub easing: Easing,
}

impl Timing {
    pub const fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    pub fn step() -> Self {
        Self::new(Duration::from_millis(600), Easing::EaseInOut)
    }

    pub fn snap() -> Self {
        Self::new(Duration::from_millis(300), Easing::EaseOut)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::step()
    }
}

#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplaySettings {
    pub enabled: bool,
    #[serde(rename = "interval_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub interval: Duration,
}

impl Default for AutoplaySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            interval: Duration::from_millis(3000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSettings {
    pub enabled: bool,
    /// Degrees of rotation per pixel of pointer travel.
    pub sensitivity: f64,
    /// Pixels of travel before a press turns into a drag.
    pub deadzone: f64,
    /// Largest rotation one gesture may apply, either way.
    pub max_degrees: f64,
    /// 0 tracks the pointer 1:1, values towards 1 lag behind it.
    pub smoothing: f64,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            sensitivity: 0.5,
            deadzone: 5.0,
            max_degrees: 120.0,
            smoothing: 0.0,
        }
    }
}

pub const MIN_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(100);
pub const MAX_SMOOTHING: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub direction: RotationDirection,
    pub width: f64,
    pub height: f64,
    pub perspective: f64,
    #[serde(default = "Timing::step")]
    pub step: Timing,
    #[serde(default = "Timing::snap")]
    pub snap: Timing,
    pub autoplay: AutoplaySettings,
    pub drag: DragSettings,
    pub reduced_motion: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            direction: RotationDirection::default(),
            width: 480.0,
            height: 270.0,
            perspective: 1200.0,
            step: Timing::step(),
            snap: Timing::snap(),
            autoplay: AutoplaySettings::default(),
            drag: DragSettings::default(),
            reduced_motion: false,
        }
    }
}

impl CarouselConfig {
    /// Replaces values that would make the carousel misbehave with their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.width.is_finite() && self.width > 0.0) {
            log::warn!("Ignoring invalid width {}", self.width);
            self.width = defaults.width;
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            log::warn!("Ignoring invalid height {}", self.height);
            self.height = defaults.height;
        }
        if !(self.perspective.is_finite() && self.perspective > 0.0) {
            self.perspective = defaults.perspective;
        }
        if !(self.drag.sensitivity.is_finite() && self.drag.sensitivity > 0.0) {
            log::warn!("Ignoring invalid drag sensitivity {}", self.drag.sensitivity);
            self.drag.sensitivity = defaults.drag.sensitivity;
        }
        if !(self.drag.deadzone.is_finite() && self.drag.deadzone >= 0.0) {
            self.drag.deadzone = defaults.drag.deadzone;
        }
        if !(self.drag.max_degrees.is_finite() && self.drag.max_degrees >= 0.0) {
            self.drag.max_degrees = defaults.drag.max_degrees;
        }
        if !self.drag.smoothing.is_finite() {
            self.drag.smoothing = defaults.drag.smoothing;
        }
        self.drag.smoothing = self.drag.smoothing.clamp(0.0, MAX_SMOOTHING);
        self.autoplay.interval = self.autoplay.interval.max(MIN_AUTOPLAY_INTERVAL);
        self
    }
}

/// Environment overlay where `<PREFIX>_CAROUSEL__DRAG__ENABLED=false` sets
/// `carousel.drag.enabled`.
pub fn env_overrides(prefix: &str) -> ::config::Environment {
    ::config::Environment::with_prefix(prefix)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
