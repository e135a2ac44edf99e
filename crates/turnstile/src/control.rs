//! Line protocol spoken over the viewer's control socket.

use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const SOCKET_PATH: &str = "/tmp/prism.sock";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum ControlCommand {
    #[strum(to_string = "next", serialize = "forward")]
    Next,
    #[strum(to_string = "prev", serialize = "previous", serialize = "back")]
    Prev,
    #[strum(to_string = "autoplay-on")]
    AutoplayOn,
    #[strum(to_string = "autoplay-off")]
    AutoplayOff,
    #[strum(to_string = "reload")]
    Reload,
}

impl ControlCommand {
    pub fn parse_line(line: &str) -> Option<Self> {
        line.trim().parse().ok()
    }
}
