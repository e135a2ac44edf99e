use turnstile::control::ControlCommand;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Next,
    Prev,
    SetAutoplay(bool),
    ConfigReload,
}

impl From<ControlCommand> for AppEvent {
    fn from(command: ControlCommand) -> Self {
        match command {
            ControlCommand::Next => AppEvent::Next,
            ControlCommand::Prev => AppEvent::Prev,
            ControlCommand::AutoplayOn => AppEvent::SetAutoplay(true),
            ControlCommand::AutoplayOff => AppEvent::SetAutoplay(false),
            ControlCommand::Reload => AppEvent::ConfigReload,
        }
    }
}
