
mod communication_channel;
mod config;
mod console_channel;
mod conversation_manager;
mod conversation_state;
mod error;
mod event;
mod portal_link;
mod transition;


use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{config_from_env, BotConfig};
use crate::console_channel::{ConsoleChannel, ConsoleInput};
use crate::conversation_manager::ConversationManager;
use crate::error::Result;
use crate::transition::Outcome;


fn init_logging(log_filter: &str) {
    let filter = EnvFilter::try_new(log_filter)
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    // stdout carries the conversation itself
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}


async fn run(config: BotConfig) -> Result<()> {
    info!(?config, "configuration loaded");

    let channel = Arc::new(ConsoleChannel::new());
    let manager = ConversationManager::new(channel.clone());
    let mut input = ConsoleInput::new();

    while let Some(line) = input.next_line().await? {
        let Some(event) = channel.parse_line(&line) else {
            continue;
        };

        match manager.handle_event(&config.user_id, event).await {
            Ok(Outcome::Completed(order)) => match serde_json::to_string(&order) {
                Ok(json) => info!(order = %json, "order collected"),
                Err(why) => warn!("could not serialize order: {why}"),
            },
            Ok(_) => {}
            Err(why) => return Err(why.into()),
        }
    }

    info!(active_sessions = manager.active_sessions(), "input closed, shutting down");
    Ok(())
}


#[tokio::main]
async fn main() -> ExitCode {
    let config = config_from_env();
    let log_filter = config
        .as_ref()
        .map_or(config::DEFAULT_LOG_FILTER, |config| config.log_filter.as_str());
    init_logging(log_filter);

    let result = match config {
        Ok(config) => run(config).await,
        Err(why) => Err(why.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(why) => {
            error!("{why}");
            ExitCode::FAILURE
        }
    }
}
