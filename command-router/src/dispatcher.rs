//! Command registry and dispatcher.
//!
//! Registration happens through `&mut self`, dispatch through `&self`: once a dispatcher is shared
//! (usually as `Arc<CommandDispatcher>`) the registry is read-only and concurrent dispatches do not
//! share mutable state.

use botkit_core::{Bot, BotError, CommandHandler, Result, Update};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::handler::handler_fn;
use crate::parse::{normalize_command, parse_command};

/// Maps normalized command names to handlers and routes updates to them.
#[derive(Clone, Default)]
pub struct CommandDispatcher {
    commands: HashMap<String, Arc<dyn CommandHandler>>,
    bot_username: Option<String>,
}

impl CommandDispatcher {
    /// Creates an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bot's own username. Commands addressed to another bot (`/start@other_bot`) then
    /// no longer match.
    pub fn with_bot_username(mut self, username: impl AsRef<str>) -> Self {
        let username = username.as_ref();
        self.bot_username = Some(username.strip_prefix('@').unwrap_or(username).to_lowercase());
        self
    }

    /// Registers `handler` under the normalized `name` (lowercase, one leading `/` stripped),
    /// replacing any handler already registered under that name.
    ///
    /// Names that normalize to an empty string or contain whitespace or `@` could never match a
    /// command token and are rejected with [`BotError::Validation`].
    pub fn register(&mut self, name: &str, handler: Arc<dyn CommandHandler>) -> Result<&mut Self> {
        let command = normalize_command(name.trim());
        if command.is_empty() || command.contains(|c: char| c.is_whitespace() || c == '@') {
            return Err(BotError::validation("name"));
        }
        debug!(command = %command, "Command registered");
        self.commands.insert(command, handler);
        Ok(self)
    }

    /// Registers an async closure; see [`handler_fn`].
    pub fn register_fn<F, Fut>(&mut self, name: &str, f: F) -> Result<&mut Self>
    where
        F: Fn(Update, Bot, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.register(name, handler_fn(f))
    }

    /// Removes the handler for `name`. Returns whether one was registered.
    pub fn unregister(&mut self, name: &str) -> bool {
        let command = normalize_command(name.trim());
        let removed = self.commands.remove(&command).is_some();
        if removed {
            debug!(command = %command, "Command unregistered");
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(&normalize_command(name.trim()))
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Routes `update` to its command handler.
    ///
    /// Returns `Ok(false)` when the update has no message, its text is not a command, the command
    /// is addressed to another bot, or no handler is registered. Returns `Ok(true)` after the
    /// handler succeeds. A handler error is logged once at error level and returned unchanged.
    #[instrument(skip_all, fields(update_id = ?update.id()))]
    pub async fn dispatch(&self, update: &Update, bot: &Bot) -> Result<bool> {
        if !update.has_message() {
            return Ok(false);
        }
        let Some(invocation) = parse_command(update.text()) else {
            return Ok(false);
        };

        if let (Some(me), Some(target)) = (&self.bot_username, &invocation.mention) {
            if me != target {
                debug!(
                    command = %invocation.command,
                    mention = %target,
                    "Command addressed to another bot"
                );
                return Ok(false);
            }
        }

        let Some(handler) = self.commands.get(&invocation.command) else {
            debug!(command = %invocation.command, "No handler registered");
            return Ok(false);
        };

        info!(
            command = %invocation.command,
            chat_id = ?update.chat_id(),
            user_id = ?update.user_id(),
            "Dispatching command"
        );

        match handler.handle(update, bot, invocation.args).await {
            Ok(()) => Ok(true),
            Err(e) => {
                error!(
                    command = %invocation.command,
                    error = %e,
                    trace = %e.diagnostic(),
                    "Command handler failed"
                );
                Err(e)
            }
        }
    }
}

// Dispatch behavior is covered in tests/dispatcher_test.rs
