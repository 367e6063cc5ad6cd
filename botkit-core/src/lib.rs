//! # botkit-core
//!
//! Core types and traits for the bot API client: [`Update`], [`Transport`], [`Middleware`],
//! [`CommandHandler`], the outbound [`MiddlewareChain`], the [`Bot`] facade, errors, and tracing
//! initialization. Transport-agnostic; used by command-router, botkit-middleware and botkit-http.

pub mod bot;
pub mod chain;
pub mod error;
pub mod logger;
pub mod types;
pub mod update;

pub use bot::{api_result, params, Bot};
pub use chain::{MiddlewareChain, Next};
pub use error::{BotError, HandlerError, Result};
pub use logger::{init_tracing, Console, LogOptions};
pub use types::{CommandHandler, Middleware, Params, Transport};
pub use update::Update;
