use async_trait::async_trait;
use botkit_core::{api_result, Middleware, Next, Params, Result};
use serde_json::Value;
use tracing::debug;

/// Response shaping: unwraps `{"ok": true, "result": X}` into `X` and turns `{"ok": false, ...}`
/// into [`botkit_core::BotError::Api`]. Non-envelope responses pass through.
pub struct ResultMiddleware;

#[async_trait]
impl Middleware for ResultMiddleware {
    async fn handle(&self, method: &str, params: Params, next: Next<'_>) -> Result<Value> {
        let response = next.run(method, params).await?;
        api_result(response).map_err(|e| {
            debug!(method = %method, error = %e, "API returned an error envelope");
            e
        })
    }
}
