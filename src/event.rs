//! Inbound events delivered to the conversation manager.

/// One user action, as reported by a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A slash command, without the slash (`start`, `delete`).
    Command(String),
    /// A clicked option, carrying the option's tag.
    Selection(String),
    /// A typed message that is not a command.
    Text(String),
}

impl Event {
    pub fn command(name: impl Into<String>) -> Self {
        Self::Command(name.into())
    }

    pub fn selection(tag: impl Into<String>) -> Self {
        Self::Selection(tag.into())
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Event::Command(_) => "command",
            Event::Selection(_) => "selection",
            Event::Text(_) => "text",
        }
    }
}


/// Commands the manager reacts to. Anything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Delete,
}

impl BotCommand {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "start" => Some(BotCommand::Start),
            "delete" => Some(BotCommand::Delete),
            _ => None,
        }
    }
}
