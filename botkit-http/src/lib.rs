//! # botkit-http
//!
//! HTTP layer for the bot API: [`HttpTransport`] (reqwest implementation of
//! [`botkit_core::Transport`]), environment [`BotConfig`], and the long-polling [`UpdatePoller`]
//! that feeds updates to a [`command_router::CommandDispatcher`].

mod config;
mod poller;
mod transport;

pub use config::{BotConfig, DEFAULT_API_URL};
pub use poller::{PollerOptions, UpdatePoller};
pub use transport::{mask_token, HttpTransport};
