//! Bot facade handed to command handlers.
//!
//! [`Bot`] sends API calls through the [`MiddlewareChain`] and carries the cancellation token that
//! long-running handlers observe on shutdown.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::chain::MiddlewareChain;
use crate::error::{BotError, Result};
use crate::types::Params;
use crate::update::Update;

/// Handle through which handlers make further API calls. Cheap to clone.
#[derive(Clone)]
pub struct Bot {
    chain: Arc<MiddlewareChain>,
    cancellation: CancellationToken,
}

impl Bot {
    pub fn new(chain: MiddlewareChain) -> Self {
        Self {
            chain: Arc::new(chain),
            cancellation: CancellationToken::new(),
        }
    }

    /// Replaces the cancellation token (e.g. with one owned by the update poller).
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Calls `method` through the middleware chain and returns the (possibly reshaped) response.
    pub async fn call(&self, method: &str, params: Params) -> Result<Value> {
        self.chain.call(method, params).await
    }

    /// Like [`Bot::call`], unwrapping the API envelope and decoding the result into `T`.
    pub async fn call_as<T: DeserializeOwned>(&self, method: &str, params: Params) -> Result<T> {
        let value = api_result(self.call(method, params).await?)?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Value> {
        self.call("sendMessage", params(json!({ "chat_id": chat_id, "text": text })))
            .await
    }

    /// Sends `text` to the chat the update's message came from.
    pub async fn reply_to(&self, update: &Update, text: &str) -> Result<Value> {
        let chat_id = update
            .chat_id()
            .ok_or_else(|| BotError::validation("chat_id"))?;
        self.send_message(chat_id, text).await
    }

    pub async fn get_me(&self) -> Result<Value> {
        api_result(self.call("getMe", Params::new()).await?)
    }

    /// Long-polls for updates starting at `offset`.
    pub async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>> {
        let mut request = Params::new();
        if let Some(offset) = offset {
            request.insert("offset".to_string(), json!(offset));
        }
        request.insert("timeout".to_string(), json!(timeout_secs));
        let updates: Vec<Value> = self.call_as("getUpdates", request).await?;
        Ok(updates.into_iter().map(Update::new).collect())
    }
}

/// Unwraps the API envelope `{"ok": true, "result": X}` into `X`.
///
/// `{"ok": false, ...}` becomes [`BotError::Api`]. Values that are not an envelope (for example
/// because a middleware already unwrapped them) are returned unchanged.
pub fn api_result(value: Value) -> Result<Value> {
    let Value::Object(mut map) = value else {
        return Ok(value);
    };
    match map.get("ok").and_then(Value::as_bool) {
        Some(true) => Ok(map.remove("result").unwrap_or(Value::Null)),
        Some(false) => Err(BotError::Api {
            code: map.get("error_code").and_then(Value::as_i64).unwrap_or(0),
            description: map
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string(),
        }),
        None => Ok(Value::Object(map)),
    }
}

/// Converts a JSON object literal into [`Params`]; anything else yields an empty map.
pub fn params(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => Params::new(),
    }
}
