//! botkit CLI: run the command bot, or call a single API method. Config from env and optional CLI args.

use anyhow::{Context, Result};
use botkit_cli::{build_bot, build_dispatcher, load_config, Cli, Commands};
use botkit_core::{init_tracing, LogOptions, Params};
use botkit_http::UpdatePoller;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => handle_run(token).await,
        Commands::Call {
            method,
            params,
            token,
        } => handle_call(method, params, token).await,
    }
}

/// Runs the long-polling bot until Ctrl-C (or a fail-fast handler error).
async fn handle_run(token: Option<String>) -> Result<()> {
    let config = load_config(token)?;
    init_tracing(&config.log_options())?;

    let bot = build_bot(&config)?;
    let me = bot.get_me().await.context("getMe failed (check BOT_TOKEN and BOT_API_URL)")?;
    let username = me.get("username").and_then(|v| v.as_str());
    info!(username = ?username, api_url = %config.api_url, "Bot started");

    let dispatcher = Arc::new(build_dispatcher(username)?);

    let shutdown = bot.cancellation().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received, shutting down");
            shutdown.cancel();
        }
    });

    UpdatePoller::new(bot, dispatcher, config.poller_options())
        .run()
        .await?;
    Ok(())
}

/// Handle the call command: one API call through the middleware chain, result printed as JSON.
async fn handle_call(method: String, params: String, token: Option<String>) -> Result<()> {
    init_tracing(&LogOptions::stderr("warn"))?;

    let config = load_config(token)?;
    let params: Params = serde_json::from_str(&params)
        .context("--params must be a JSON object, e.g. '{\"chat_id\": 1, \"text\": \"hi\"}'")?;

    let bot = build_bot(&config)?;
    let result = bot.call(&method, params).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
