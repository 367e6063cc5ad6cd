//! Built-in commands of the `botkit run` bot: /start, /help, /ping, /echo.

use async_trait::async_trait;
use botkit_core::{Bot, BotError, CommandHandler, HandlerError, Result, Update};
use command_router::CommandDispatcher;
use std::sync::Arc;
use tracing::info;

/// Name and one-line description of every built-in command, in /help order.
pub const BUILTIN_COMMANDS: &[(&str, &str)] = &[
    ("start", "greet and show how to get help"),
    ("help", "list available commands"),
    ("ping", "check that the bot is alive"),
    ("echo", "repeat the text after the command"),
];

struct StartCommand;

#[async_trait]
impl CommandHandler for StartCommand {
    async fn handle(&self, update: &Update, bot: &Bot, _args: &str) -> Result<()> {
        let name = update.get_str("message.from.first_name", "there");
        bot.reply_to(update, &format!("Hello, {}! Send /help to see what I can do.", name))
            .await?;
        Ok(())
    }
}

struct HelpCommand {
    text: String,
}

impl HelpCommand {
    fn new() -> Self {
        let mut text = String::from("These commands are supported:\n");
        for (name, description) in BUILTIN_COMMANDS {
            text.push_str(&format!("/{} - {}\n", name, description));
        }
        Self { text }
    }
}

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn handle(&self, update: &Update, bot: &Bot, _args: &str) -> Result<()> {
        bot.reply_to(update, self.text.trim_end()).await?;
        Ok(())
    }
}

/// Dispatcher with the built-in commands. `bot_username` enables `/cmd@bot` filtering in groups.
pub fn build_dispatcher(bot_username: Option<&str>) -> Result<CommandDispatcher> {
    let mut dispatcher = match bot_username {
        Some(username) => CommandDispatcher::new().with_bot_username(username),
        None => CommandDispatcher::new(),
    };

    dispatcher
        .register("/start", Arc::new(StartCommand))?
        .register("/help", Arc::new(HelpCommand::new()))?
        .register_fn("/ping", |update, bot, _args| async move {
            bot.reply_to(&update, "pong").await?;
            Ok::<(), BotError>(())
        })?
        .register_fn("/echo", |update, bot, args| async move {
            let text = args.trim();
            if text.is_empty() {
                return Err(BotError::from(HandlerError::EmptyContent));
            }
            bot.reply_to(&update, text).await?;
            Ok::<(), BotError>(())
        })?;

    info!(commands = ?dispatcher.commands(), "Built-in commands registered");
    Ok(dispatcher)
}
