//! Required-parameter validation for known API methods.

use async_trait::async_trait;
use botkit_core::{BotError, Middleware, Next, Params, Result};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Required parameters of the built-in API methods. Unknown methods have none.
pub fn required_params(method: &str) -> &'static [&'static str] {
    match method {
        "sendMessage" => &["chat_id", "text"],
        "forwardMessage" | "copyMessage" => &["chat_id", "from_chat_id", "message_id"],
        "sendPhoto" => &["chat_id", "photo"],
        "sendAudio" => &["chat_id", "audio"],
        "sendDocument" => &["chat_id", "document"],
        "sendVideo" => &["chat_id", "video"],
        "sendVoice" => &["chat_id", "voice"],
        "sendSticker" => &["chat_id", "sticker"],
        "sendLocation" => &["chat_id", "latitude", "longitude"],
        "sendContact" => &["chat_id", "phone_number", "first_name"],
        "sendChatAction" => &["chat_id", "action"],
        "editMessageText" => &["text"],
        "deleteMessage" => &["chat_id", "message_id"],
        "answerCallbackQuery" => &["callback_query_id"],
        "getChat" | "leaveChat" | "getChatAdministrators" => &["chat_id"],
        "getChatMember" | "banChatMember" | "unbanChatMember" => &["chat_id", "user_id"],
        "getFile" => &["file_id"],
        _ => &[],
    }
}

/// Rejects calls that miss a required parameter with [`BotError::Validation`] naming it.
///
/// A parameter counts as missing when absent, `null`, or an empty string. `chat_id` must also be
/// an integer or a non-empty string (`@channelusername`).
#[derive(Default)]
pub struct ValidationMiddleware {
    extra: HashMap<String, Vec<String>>,
}

impl ValidationMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds required parameters for `method` on top of the built-in table.
    pub fn with_rule<I, S>(mut self, method: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra
            .entry(method.into())
            .or_default()
            .extend(params.into_iter().map(Into::into));
        self
    }

    /// Returns the first missing or malformed parameter of `method`, if any.
    pub fn check(&self, method: &str, params: &Params) -> Result<()> {
        let builtin = required_params(method).iter().copied();
        let extra = self
            .extra
            .get(method)
            .into_iter()
            .flatten()
            .map(String::as_str);
        for name in builtin.chain(extra) {
            let valid = match params.get(name) {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.is_empty(),
                Some(value) if name == "chat_id" => value.is_i64(),
                Some(_) => true,
            };
            if !valid {
                return Err(BotError::validation(name));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Middleware for ValidationMiddleware {
    async fn handle(&self, method: &str, params: Params, next: Next<'_>) -> Result<Value> {
        if let Err(e) = self.check(method, &params) {
            warn!(method = %method, error = %e, "Rejected API call");
            return Err(e);
        }
        next.run(method, params).await
    }
}
