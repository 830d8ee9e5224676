use std::env;
use std::fmt;

use crate::error::ConfigError;

const DEFAULT_USER_ID: &str = "console";
pub const DEFAULT_LOG_FILTER: &str = "fasttrack_bot=info";


pub struct BotConfig {
    pub bot_token: String,
    pub user_id: String,
    pub log_filter: String,
}


// The token never reaches logs.
impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_token", &format_args!("<redacted, {} chars>", self.bot_token.len()))
            .field("user_id", &self.user_id)
            .field("log_filter", &self.log_filter)
            .finish()
    }
}


impl BotConfig {
    /// Builds the config from an arbitrary variable lookup.
    ///
    /// `BOT_TOKEN` is required; `BOT_USER_ID` and `RUST_LOG` fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup("BOT_TOKEN").ok_or(ConfigError::Missing("BOT_TOKEN"))?;
        if bot_token.trim().is_empty() {
            return Err(ConfigError::Empty("BOT_TOKEN"));
        }

        let user_id = lookup("BOT_USER_ID")
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string());

        let log_filter = lookup("RUST_LOG")
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            bot_token,
            user_id,
            log_filter,
        })
    }
}


/// Loads `.env` if present, then reads the process environment.
pub fn config_from_env() -> Result<BotConfig, ConfigError> {
    // .env is optional
    let _ = dotenvy::dotenv();

    BotConfig::from_lookup(|key| env::var(key).ok())
}
