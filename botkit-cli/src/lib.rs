//! # botkit-cli
//!
//! CLI foundation: argument parsing, config loading, bot assembly (transport + middleware chain)
//! and the built-in command set.

pub mod cli;
pub mod commands;

use anyhow::Result;
use botkit_core::{params, Bot, MiddlewareChain};
use botkit_http::{BotConfig, HttpTransport};
use middleware::{DefaultParamsMiddleware, LoggingMiddleware, ResultMiddleware, ValidationMiddleware};
use serde_json::json;
use std::sync::Arc;

pub use cli::{load_config, Cli, Commands};
pub use commands::{build_dispatcher, BUILTIN_COMMANDS};

/// Builds the bot facade: HTTP transport wrapped by logging → validation → default params →
/// envelope unwrapping.
pub fn build_bot(config: &BotConfig) -> Result<Bot> {
    let transport = HttpTransport::from_config(config)?;
    let mut chain = MiddlewareChain::new(Arc::new(transport))
        .add_middleware(Arc::new(LoggingMiddleware))
        .add_middleware(Arc::new(ValidationMiddleware::new()));
    if let Some(parse_mode) = &config.default_parse_mode {
        let defaults = DefaultParamsMiddleware::new(params(json!({ "parse_mode": parse_mode })))
            .for_methods(["sendMessage", "editMessageText"]);
        chain = chain.add_middleware(Arc::new(defaults));
    }
    chain = chain.add_middleware(Arc::new(ResultMiddleware));
    Ok(Bot::new(chain))
}
