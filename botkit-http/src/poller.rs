//! Long-polling update loop: fetches updates with `getUpdates`, advances the offset, and hands each
//! update to the [`CommandDispatcher`].
//!
//! Handler errors are already logged by the dispatcher; the loop only decides what happens next:
//! stop on the first one (`fail_fast`) or skip the update and continue. Shutdown is cooperative
//! through the bot's cancellation token; in-flight handlers run to completion.

use botkit_core::{Bot, BotError, Result, Update};
use command_router::CommandDispatcher;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinSet};
use tracing::{error, info, instrument, warn};

/// Delay before retrying after a failed `getUpdates`.
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(3);

/// Update-loop policy.
#[derive(Debug, Clone)]
pub struct PollerOptions {
    /// `timeout` sent with getUpdates (long-poll duration).
    pub poll_timeout_secs: u64,
    /// Dispatch each update in its own task instead of one after another.
    pub concurrent: bool,
    /// Stop the loop on the first handler error instead of skipping the update.
    pub fail_fast: bool,
}

impl Default for PollerOptions {
    fn default() -> Self {
        Self {
            poll_timeout_secs: 25,
            concurrent: false,
            fail_fast: false,
        }
    }
}

/// Drives the dispatcher from `getUpdates`.
pub struct UpdatePoller {
    bot: Bot,
    dispatcher: Arc<CommandDispatcher>,
    options: PollerOptions,
    offset: Option<i64>,
    tasks: JoinSet<Result<bool>>,
}

impl UpdatePoller {
    pub fn new(bot: Bot, dispatcher: Arc<CommandDispatcher>, options: PollerOptions) -> Self {
        Self {
            bot,
            dispatcher,
            options,
            offset: None,
            tasks: JoinSet::new(),
        }
    }

    /// Offset that the next `getUpdates` will send (last seen `update_id` + 1).
    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Fetches one batch and dispatches it. Returns the number of updates received.
    ///
    /// In concurrent mode the handlers may still be running when this returns; see
    /// [`UpdatePoller::finish`].
    pub async fn poll_once(&mut self) -> Result<usize> {
        let updates = self.fetch().await?;
        let count = updates.len();
        self.process(updates).await?;
        Ok(count)
    }

    /// Waits for every in-flight dispatch task. Returns the first error under `fail_fast`.
    pub async fn finish(&mut self) -> Result<()> {
        let mut first_error = None;
        while let Some(joined) = self.tasks.join_next().await {
            if let Err(e) = self.on_task_done(joined) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Runs until the bot's cancellation token fires or, under `fail_fast`, a handler fails.
    /// `getUpdates` failures are logged and retried after a short delay.
    ///
    /// In concurrent mode finished dispatch tasks are collected while waiting on `getUpdates`, so
    /// a fail-fast error stops the loop even when no further updates arrive.
    #[instrument(skip(self), fields(concurrent = self.options.concurrent, fail_fast = self.options.fail_fast))]
    pub async fn run(mut self) -> Result<()> {
        let shutdown = self.bot.cancellation().clone();
        info!("Update loop started");

        let outcome = loop {
            let bot = &self.bot;
            let (offset, poll_timeout) = (self.offset, self.options.poll_timeout_secs);
            let fetched = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break Ok(()),
                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    // Drops the pending getUpdates; the offset is unchanged so nothing is lost.
                    if let Err(e) = self.on_task_done(joined) {
                        shutdown.cancel();
                        break Err(e);
                    }
                    continue;
                }
                fetched = bot.get_updates(offset, poll_timeout) => fetched,
            };
            let updates = match fetched {
                Ok(updates) => updates,
                Err(e) => {
                    warn!(error = %e, "getUpdates failed, retrying");
                    tokio::select! {
                        biased;
                        _ = shutdown.cancelled() => break Ok(()),
                        _ = tokio::time::sleep(POLL_ERROR_BACKOFF) => continue,
                    }
                }
            };
            if let Err(e) = self.process(updates).await {
                shutdown.cancel();
                break Err(e);
            }
        };

        let drained = self.finish().await;
        info!(offset = ?self.offset, "Update loop stopped");
        outcome.and(drained)
    }

    async fn fetch(&self) -> Result<Vec<Update>> {
        self.bot
            .get_updates(self.offset, self.options.poll_timeout_secs)
            .await
    }

    async fn process(&mut self, updates: Vec<Update>) -> Result<()> {
        for update in updates {
            // Updates left after shutdown keep the offset, so the next start receives them again.
            if self.bot.is_cancelled() {
                break;
            }
            // Advance before dispatching so a failing update is not redelivered.
            if let Some(id) = update.id() {
                self.offset = Some(self.offset.map_or(id + 1, |o| o.max(id + 1)));
            }

            if self.options.concurrent {
                let dispatcher = self.dispatcher.clone();
                let bot = self.bot.clone();
                self.tasks
                    .spawn(async move { dispatcher.dispatch(&update, &bot).await });
                self.reap()?;
            } else {
                let result = self.dispatcher.dispatch(&update, &self.bot).await;
                self.on_dispatched(update.id(), result)?;
            }
        }
        Ok(())
    }

    /// Collects tasks that already finished without waiting for the rest.
    fn reap(&mut self) -> Result<()> {
        while let Some(joined) = self.tasks.try_join_next() {
            self.on_task_done(joined)?;
        }
        Ok(())
    }

    fn on_task_done(&self, joined: std::result::Result<Result<bool>, JoinError>) -> Result<()> {
        match joined {
            Ok(result) => self.on_dispatched(None, result),
            Err(e) => {
                error!(error = %e, "Dispatch task panicked");
                if self.options.fail_fast {
                    Err(BotError::Other(anyhow::anyhow!("dispatch task panicked: {}", e)))
                } else {
                    Ok(())
                }
            }
        }
    }

    fn on_dispatched(&self, update_id: Option<i64>, result: Result<bool>) -> Result<()> {
        match result {
            Ok(_) => Ok(()),
            Err(e) if self.options.fail_fast => Err(e),
            Err(e) => {
                warn!(update_id = ?update_id, error = %e, "Skipping update after handler error");
                Ok(())
            }
        }
    }
}
