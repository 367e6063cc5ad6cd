//! Error types for the bot core.
//!
//! [`BotError`] is the top-level error; [`HandlerError`] covers failures raised by command handlers.

use thiserror::Error;

/// Top-level error for botkit (validation, network, API, handler, config, IO).
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Validation error: missing or invalid parameter `{param}`")]
    Validation { param: String },

    #[error("Network error: {message}")]
    Network {
        status: Option<u16>,
        body: Option<String>,
        message: String,
    },

    #[error("API error {code}: {description}")]
    Api { code: i64, description: String },

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors produced by command handlers.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Empty content")]
    EmptyContent,

    #[error("Cancelled")]
    Cancelled,
}

impl BotError {
    pub fn validation(param: impl Into<String>) -> Self {
        Self::Validation {
            param: param.into(),
        }
    }

    /// Network failure without an HTTP status (connection refused, timeout, ...).
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            status: None,
            body: None,
            message: message.into(),
        }
    }

    /// HTTP status carried by a network failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            _ => None,
        }
    }

    /// Debug rendering followed by every `source()` in the chain, one per line.
    /// Used as the `trace` field when a failure is logged.
    pub fn diagnostic(&self) -> String {
        let mut out = format!("{:?}", self);
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str("\ncaused by: ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
        out
    }
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
