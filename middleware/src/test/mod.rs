//! Unit test module
//!
//! Middleware unit tests live here, separate from source files.
//! Each test builds a small chain over [`EchoTransport`] and checks what reaches the transport
//! and what comes back.

mod result_middleware_test;

use async_trait::async_trait;
use botkit_core::{Params, Result, Transport};
use serde_json::{json, Value};
use std::sync::Mutex;

/// Returns `{"ok": true, "result": {"method": .., "params": ..}}` and remembers every call.
#[derive(Default)]
pub(crate) struct EchoTransport {
    pub(crate) calls: Mutex<Vec<(String, Params)>>,
}

#[async_trait]
impl Transport for EchoTransport {
    async fn send(&self, method: &str, params: &Params) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params.clone()));
        Ok(json!({ "ok": true, "result": { "method": method, "params": params } }))
    }
}

/// Transport that always answers with `response`.
pub(crate) struct FixedTransport {
    pub(crate) response: Value,
}

#[async_trait]
impl Transport for FixedTransport {
    async fn send(&self, _method: &str, _params: &Params) -> Result<Value> {
        Ok(self.response.clone())
    }
}
