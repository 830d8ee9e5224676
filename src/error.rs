//! Error types for the bot.

/// Top-level error returned from the binary's run loop.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("channel: {0}")]
    Channel(#[from] ChannelError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("expected {0} in the environment")]
    Missing(&'static str),

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Failure while talking to the presentation side of a channel.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;
