//! reqwest implementation of [`Transport`]: POSTs JSON parameters to `{api_url}/bot{token}/{method}`.

use async_trait::async_trait;
use botkit_core::{BotError, Params, Result, Transport};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::BotConfig;

/// Masks a bot token for logging: first 7 and last 4 characters kept when long enough.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}

/// HTTP transport for the bot API.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl HttpTransport {
    /// Creates a transport with a whole-request `timeout`.
    pub fn new(api_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, api_url, token))
    }

    /// Uses an existing client (shared connection pool, custom TLS, ...).
    pub fn with_client(client: reqwest::Client, api_url: &str, token: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    pub fn from_config(config: &BotConfig) -> Result<Self> {
        Self::new(
            &config.api_url,
            &config.bot_token,
            Duration::from_secs(config.http_timeout_secs),
        )
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("api_url", &self.api_url)
            .field("token", &mask_token(&self.token))
            .finish()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    /// Non-2xx statuses, request failures and undecodable bodies become [`BotError::Network`].
    /// Error messages never include the request URL, which contains the token.
    #[instrument(skip(self, params), fields(token = %mask_token(&self.token)))]
    async fn send(&self, method: &str, params: &Params) -> Result<Value> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(params)
            .send()
            .await
            .map_err(|e| BotError::Network {
                status: e.status().map(|s| s.as_u16()),
                body: None,
                message: format!("{} request failed: {}", method, e.without_url()),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| BotError::Network {
            status: Some(status.as_u16()),
            body: None,
            message: format!("{} response unreadable: {}", method, e.without_url()),
        })?;
        debug!(method = %method, status = status.as_u16(), body_len = body.len(), "HTTP response");

        if !status.is_success() {
            return Err(BotError::Network {
                status: Some(status.as_u16()),
                message: format!("{} returned HTTP {}", method, status),
                body: Some(body),
            });
        }

        serde_json::from_str(&body).map_err(|e| BotError::Network {
            status: Some(status.as_u16()),
            message: format!("{} returned invalid JSON: {}", method, e),
            body: Some(body.clone()),
        })
    }
}
