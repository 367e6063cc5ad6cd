//! Runtime configuration: API access, HTTP timeouts, logging and update-loop policy.
//! Loaded from environment variables (BOT_TOKEN, BOT_API_URL, HTTP_TIMEOUT_SECS, ...).

use anyhow::Result;
use botkit_core::LogOptions;
use std::env;

use crate::poller::PollerOptions;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Bot configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// BOT_API_URL (or TELEGRAM_API_URL); defaults to the public API
    pub api_url: String,
    /// HTTP_TIMEOUT_SECS: whole-request timeout; must exceed the long-poll timeout
    pub http_timeout_secs: u64,
    /// POLL_TIMEOUT_SECS: `timeout` sent with getUpdates
    pub poll_timeout_secs: u64,
    /// LOG_FILE
    pub log_file: String,
    /// LOG_LEVEL: filter used when RUST_LOG is unset
    pub log_level: String,
    /// DISPATCH_CONCURRENT: one task per update instead of sequential dispatch
    pub concurrent_dispatch: bool,
    /// FAIL_FAST: stop the update loop on the first handler error
    pub fail_fast: bool,
    /// DEFAULT_PARSE_MODE: injected into outgoing text messages when set
    pub default_parse_mode: Option<String>,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let api_url = env::var("BOT_API_URL")
            .or_else(|_| env::var("TELEGRAM_API_URL"))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let http_timeout_secs = parse_env("HTTP_TIMEOUT_SECS", 30)?;
        let poll_timeout_secs = parse_env("POLL_TIMEOUT_SECS", 25)?;
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/botkit.log".to_string());
        let log_level = env::var("LOG_LEVEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());
        let concurrent_dispatch = env_flag("DISPATCH_CONCURRENT");
        let fail_fast = env_flag("FAIL_FAST");
        let default_parse_mode = env::var("DEFAULT_PARSE_MODE")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Ok(Self {
            bot_token,
            api_url,
            http_timeout_secs,
            poll_timeout_secs,
            log_file,
            log_level,
            concurrent_dispatch,
            fail_fast,
            default_parse_mode,
        })
    }

    /// Uses the given token; everything else at its default.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            api_url: DEFAULT_API_URL.to_string(),
            http_timeout_secs: 30,
            poll_timeout_secs: 25,
            log_file: "logs/botkit.log".to_string(),
            log_level: "info".to_string(),
            concurrent_dispatch: false,
            fail_fast: false,
            default_parse_mode: None,
        }
    }

    /// Validate config: non-empty token, valid API URL, HTTP timeout longer than the poll timeout.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if reqwest::Url::parse(&self.api_url).is_err() {
            anyhow::bail!("BOT_API_URL is not a valid URL: {}", self.api_url);
        }
        if self.http_timeout_secs <= self.poll_timeout_secs {
            anyhow::bail!(
                "HTTP_TIMEOUT_SECS ({}) must be greater than POLL_TIMEOUT_SECS ({})",
                self.http_timeout_secs,
                self.poll_timeout_secs
            );
        }
        Ok(())
    }

    pub fn poller_options(&self) -> PollerOptions {
        PollerOptions {
            poll_timeout_secs: self.poll_timeout_secs,
            concurrent: self.concurrent_dispatch,
            fail_fast: self.fail_fast,
        }
    }

    /// Logging for the long-running bot: console plus LOG_FILE, thread ids when dispatching
    /// concurrently.
    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            default_filter: self.log_level.clone(),
            file: Some(self.log_file.clone().into()),
            thread_ids: self.concurrent_dispatch,
            ..LogOptions::default()
        }
    }
}

fn parse_env(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a non-negative integer, got {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}
