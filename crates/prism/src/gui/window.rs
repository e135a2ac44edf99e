use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use std::time::Duration;
use turnstile::{CarouselConfig, NavKey};

/// Room around the cube so the receding faces stay on screen mid-turn.
pub const STAGE_MARGIN: f64 = 1.5;

/// Longest frame gap fed to the carousel; a suspended window should not skip a whole turn.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

pub fn nav_key(key: gdk::Key) -> Option<NavKey> {
    match key {
        gdk::Key::Left | gdk::Key::KP_Left => Some(NavKey::Left),
        gdk::Key::Right | gdk::Key::KP_Right => Some(NavKey::Right),
        gdk::Key::Up | gdk::Key::KP_Up => Some(NavKey::Up),
        gdk::Key::Down | gdk::Key::KP_Down => Some(NavKey::Down),
        _ => None,
    }
}

/// True when the desktop asks for animations to be turned off.
pub fn prefers_reduced_motion() -> bool {
    gtk::Settings::default().is_some_and(|settings| !settings.is_gtk_enable_animations())
}

pub fn stage_size(config: &CarouselConfig) -> (i32, i32) {
    (
        (config.width * STAGE_MARGIN).ceil() as i32,
        (config.height * STAGE_MARGIN).ceil() as i32,
    )
}

pub fn resize_stage(area: &gtk::DrawingArea, config: &CarouselConfig) {
    let (width, height) = stage_size(config);
    area.set_content_width(width);
    area.set_content_height(height);
}

/// Time since the previous frame from frame-clock microseconds.
pub fn frame_delta(previous: Option<i64>, now: i64) -> Duration {
    previous
        .map(|prev| Duration::from_micros(now.saturating_sub(prev).max(0) as u64))
        .unwrap_or(Duration::ZERO)
        .min(MAX_FRAME_DELTA)
}
