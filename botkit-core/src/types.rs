//! Core traits: [`Transport`], [`Middleware`], [`CommandHandler`], plus the parameter map type.

use async_trait::async_trait;
use serde_json::Value;

use crate::bot::Bot;
use crate::chain::Next;
use crate::error::Result;
use crate::update::Update;

/// Parameters of an outbound API call, keyed by parameter name.
pub type Params = serde_json::Map<String, Value>;

/// Performs the network call for an API method. Returns the raw decoded response body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: &str, params: &Params) -> Result<Value>;
}

/// Interceptor around every outbound API call.
///
/// Call `next.run(method, params)` to continue the chain (possibly with transformed inputs, and
/// possibly transforming the returned value), or return a response directly to short-circuit it.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, method: &str, params: Params, next: Next<'_>) -> Result<Value>;
}

/// Handler for one registered command. Receives the update, the bot facade and the argument
/// text following the command token (`""` when there is none).
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, update: &Update, bot: &Bot, args: &str) -> Result<()>;
}
