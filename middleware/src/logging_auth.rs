use async_trait::async_trait;
use botkit_core::{Middleware, Next, Params, Result};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

/// Logs every outbound call: parameter names before, outcome and elapsed time after.
pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
    #[instrument(skip(self, params, next))]
    async fn handle(&self, method: &str, params: Params, next: Next<'_>) -> Result<Value> {
        let keys: Vec<&str> = params.keys().map(String::as_str).collect();
        debug!(method = %method, params = ?keys, "step: api call started");
        let started = Instant::now();
        let result = next.run(method, params).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => info!(method = %method, elapsed_ms, "step: api call done"),
            Err(e) => error!(method = %method, elapsed_ms, error = %e, "API call failed"),
        }
        result
    }
}

/// Injects parameters the call site did not set (e.g. `parse_mode`, credentials).
///
/// Explicit values at the call site always win. `only_methods` restricts injection to the listed
/// methods; empty means every method.
pub struct DefaultParamsMiddleware {
    defaults: Params,
    only_methods: Vec<String>,
}

impl DefaultParamsMiddleware {
    pub fn new(defaults: Params) -> Self {
        Self {
            defaults,
            only_methods: Vec::new(),
        }
    }

    /// Limits injection to `methods`.
    pub fn for_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only_methods = methods.into_iter().map(Into::into).collect();
        self
    }

    fn applies_to(&self, method: &str) -> bool {
        self.only_methods.is_empty() || self.only_methods.iter().any(|m| m == method)
    }
}

#[async_trait]
impl Middleware for DefaultParamsMiddleware {
    async fn handle(&self, method: &str, mut params: Params, next: Next<'_>) -> Result<Value> {
        if self.applies_to(method) {
            for (key, value) in &self.defaults {
                params
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
            }
        }
        next.run(method, params).await
    }
}
