//! Rendering-agnostic state machine for a four-faced rotating media carousel.

pub mod a11y;
pub mod animator;
pub mod autoplay;
pub mod carousel;
pub mod config;
pub mod control;
pub mod drag;
pub mod faces;
pub mod item;
pub mod macros;
pub mod script;

pub use carousel::{Carousel, CarouselControl, CarouselEvent, NavKey, Phase};
pub use config::CarouselConfig;
pub use drag::Point;
pub use faces::Step;
pub use item::CarouselItem;
