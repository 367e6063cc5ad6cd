//! CLI parser and config loading.

use anyhow::Result;
use botkit_http::BotConfig;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "botkit")]
#[command(about = "Bot API client: run the command bot or make a single API call", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot: long-poll updates and dispatch /commands (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Call one API method through the middleware chain and print the result as JSON.
    Call {
        /// API method name, e.g. getMe or sendMessage.
        method: String,
        /// Parameters as a JSON object.
        #[arg(short, long, default_value = "{}")]
        params: String,
        #[arg(short, long)]
        token: Option<String>,
    },
}

/// Load and validate BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    let config = BotConfig::load(token)?;
    config.validate()?;
    Ok(config)
}
