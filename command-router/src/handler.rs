//! Closure adapter for [`CommandHandler`].

use async_trait::async_trait;
use botkit_core::{Bot, CommandHandler, Result, Update};
use std::future::Future;
use std::sync::Arc;

/// Wraps an async closure `Fn(Update, Bot, String) -> Future<Output = Result<()>>`.
pub struct FnHandler<F> {
    f: F,
}

/// Builds a [`CommandHandler`] from an async closure. Arguments are passed owned so the closure's
/// future can be `'static`; [`Update`] and [`Bot`] are reference-counted and cheap to clone.
pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn CommandHandler>
where
    F: Fn(Update, Bot, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    Arc::new(FnHandler { f })
}

#[async_trait]
impl<F, Fut> CommandHandler for FnHandler<F>
where
    F: Fn(Update, Bot, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    async fn handle(&self, update: &Update, bot: &Bot, args: &str) -> Result<()> {
        (self.f)(update.clone(), bot.clone(), args.to_string()).await
    }
}
