//! Shared helpers for command-router integration tests: a recording transport, update builders,
//! and a tracing layer that captures events so tests can assert on log output.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use botkit_core::{Bot, MiddlewareChain, Params, Result, Transport, Update};
use serde_json::{json, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

/// One recorded outbound call.
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub method: String,
    pub params: Params,
}

/// Transport that records every call and answers `{"ok": true, "result": true}`.
#[derive(Default)]
pub struct RecordingTransport {
    pub calls: Mutex<Vec<CallRecord>>,
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, method: &str, params: &Params) -> Result<Value> {
        self.calls.lock().unwrap().push(CallRecord {
            method: method.to_string(),
            params: params.clone(),
        });
        Ok(json!({ "ok": true, "result": true }))
    }
}

/// Bot backed by a fresh [`RecordingTransport`].
pub fn recording_bot() -> (Bot, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    let bot = Bot::new(MiddlewareChain::new(transport.clone()));
    (bot, transport)
}

/// Text message update in chat 456 from user 123.
pub fn text_update(text: &str) -> Update {
    Update::new(json!({
        "update_id": 1000,
        "message": {
            "message_id": 1,
            "date": 0,
            "text": text,
            "chat": { "id": 456, "type": "private" },
            "from": { "id": 123, "is_bot": false, "first_name": "Test" }
        }
    }))
}

/// One captured tracing event.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub message: String,
    pub fields: BTreeMap<String, String>,
}

/// Layer that stores every event it sees.
#[derive(Clone, Default)]
pub struct CaptureLayer {
    pub events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureLayer {
    pub fn at_level(&self, level: Level) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let message = visitor.fields.remove("message").unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: BTreeMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.insert(field.name().to_string(), value.to_string());
    }
}

/// Installs a capturing subscriber for the current thread; keep the guard alive for the test.
pub fn capture_logs() -> (CaptureLayer, tracing::subscriber::DefaultGuard) {
    let layer = CaptureLayer::default();
    let subscriber = Registry::default().with(layer.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (layer, guard)
}
