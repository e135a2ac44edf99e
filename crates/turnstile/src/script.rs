//! Scripted input for driving a carousel without a display.
//!
//! One instruction per line:
//!
//! ```text
//! next | prev
//! key <left|right|up|down>
//! drag <dx> <dy>
//! tick <ms>
//! settle
//! autoplay <on|off>
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use crate::carousel::{Carousel, CarouselControl, CarouselEvent, NavKey};
use crate::drag::Point;
use crate::faces::Step;
use std::time::Duration;
use thiserror::Error;

pub const FRAME: Duration = Duration::from_millis(16);
const DRAG_STEPS: u32 = 4;
const SETTLE_FRAME_LIMIT: usize = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Advance(Step),
    Key(NavKey),
    Drag { dx: f64, dy: f64 },
    Tick(Duration),
    Settle,
    Autoplay(bool),
}

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown instruction '{word}'")]
    UnknownInstruction { line: usize, word: String },
    #[error("line {line}: '{word}' expects {expected}")]
    MissingArgument {
        line: usize,
        word: String,
        expected: &'static str,
    },
    #[error("line {line}: invalid argument '{value}'")]
    InvalidArgument { line: usize, value: String },
    #[error("line {line}: unexpected trailing input '{rest}'")]
    TrailingInput { line: usize, rest: String },
}

pub fn parse(source: &str) -> Result<Vec<Instruction>, ScriptError> {
    source
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, text.trim()))
        .filter(|(_, text)| !text.is_empty() && !text.starts_with('#'))
        .map(|(line, text)| parse_line(line, text))
        .collect()
}

fn parse_line(line: usize, text: &str) -> Result<Instruction, ScriptError> {
    let mut words = text.split_whitespace();
    let word = words.next().unwrap_or_default().to_ascii_lowercase();

    let mut arg = |expected: &'static str| {
        words.next().ok_or_else(|| ScriptError::MissingArgument {
            line,
            word: word.clone(),
            expected,
        })
    };
    let invalid = |value: &str| ScriptError::InvalidArgument {
        line,
        value: value.to_string(),
    };

    let instruction = match word.as_str() {
        "next" | "forward" => Instruction::Advance(Step::Forward),
        "prev" | "previous" | "back" => Instruction::Advance(Step::Backward),
        "key" => {
            let name = arg("a key name")?;
            Instruction::Key(name.parse().map_err(|_| invalid(name))?)
        }
        "drag" => {
            let dx = arg("two distances")?;
            let dy = arg("two distances")?;
            Instruction::Drag {
                dx: dx.parse().map_err(|_| invalid(dx))?,
                dy: dy.parse().map_err(|_| invalid(dy))?,
            }
        }
        "tick" => {
            let ms = arg("milliseconds")?;
            Instruction::Tick(Duration::from_millis(ms.parse().map_err(|_| invalid(ms))?))
        }
        "settle" => Instruction::Settle,
        "autoplay" => match arg("on or off")?.to_ascii_lowercase().as_str() {
            "on" | "true" => Instruction::Autoplay(true),
            "off" | "false" => Instruction::Autoplay(false),
            other => return Err(invalid(other)),
        },
        _ => {
            return Err(ScriptError::UnknownInstruction {
                line,
                word: word.clone(),
            });
        }
    };

    let rest: Vec<&str> = words.collect();
    if !rest.is_empty() {
        return Err(ScriptError::TrailingInput {
            line,
            rest: rest.join(" "),
        });
    }
    Ok(instruction)
}

/// Runs instructions against `carousel`, handing every event to `on_event` in order.
pub fn run(
    carousel: &mut Carousel,
    instructions: &[Instruction],
    mut on_event: impl FnMut(&Carousel, CarouselEvent),
) {
    let mut emit = |carousel: &mut Carousel, dt: Duration| {
        if let Some(event) = carousel.tick(dt) {
            on_event(carousel, event);
        }
    };

    for instruction in instructions {
        log::trace!("{:?}", instruction);
        match instruction {
            Instruction::Advance(step) => {
                if !carousel.advance(*step) {
                    log::debug!("{} step dropped", step);
                }
            }
            Instruction::Key(key) => {
                carousel.key(*key);
            }
            Instruction::Drag { dx, dy } => {
                if carousel.pointer_down(Point::default()) {
                    for i in 1..=DRAG_STEPS {
                        let t = f64::from(i) / f64::from(DRAG_STEPS);
                        carousel.pointer_move(Point::new(dx * t, dy * t));
                        emit(carousel, FRAME);
                    }
                    carousel.pointer_up();
                }
            }
            Instruction::Tick(total) => {
                let mut remaining = *total;
                while !remaining.is_zero() {
                    let dt = remaining.min(FRAME);
                    remaining -= dt;
                    emit(carousel, dt);
                }
            }
            Instruction::Settle => {
                let mut frames = 0;
                while carousel.is_animating() && frames < SETTLE_FRAME_LIMIT {
                    emit(carousel, FRAME);
                    frames += 1;
                }
            }
            Instruction::Autoplay(enabled) => carousel.set_autoplay(*enabled),
        }
    }
}
