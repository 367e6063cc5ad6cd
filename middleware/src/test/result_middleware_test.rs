//! Unit tests for ResultMiddleware.

use std::sync::Arc;

use botkit_core::{BotError, MiddlewareChain, Params};
use serde_json::json;

use super::{EchoTransport, FixedTransport};
use crate::{LoggingMiddleware, ResultMiddleware};

#[tokio::test]
async fn test_unwraps_ok_envelope() {
    let chain = MiddlewareChain::new(Arc::new(EchoTransport::default()))
        .add_middleware(Arc::new(ResultMiddleware));

    let result = chain.call("getMe", Params::new()).await.unwrap();

    assert_eq!(result, json!({ "method": "getMe", "params": {} }));
}

#[tokio::test]
async fn test_error_envelope_becomes_api_error() {
    let transport = Arc::new(FixedTransport {
        response: json!({ "ok": false, "error_code": 403, "description": "Forbidden: bot was blocked by the user" }),
    });
    let chain = MiddlewareChain::new(transport).add_middleware(Arc::new(ResultMiddleware));

    match chain.call("sendMessage", Params::new()).await {
        Err(BotError::Api { code, description }) => {
            assert_eq!(code, 403);
            assert!(description.starts_with("Forbidden"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_outer_middleware_sees_unwrapped_result() {
    // LoggingMiddleware is outermost; the value it passes back is already unwrapped.
    let transport = Arc::new(FixedTransport {
        response: json!({ "ok": true, "result": [1, 2, 3] }),
    });
    let chain = MiddlewareChain::new(transport)
        .add_middleware(Arc::new(LoggingMiddleware))
        .add_middleware(Arc::new(ResultMiddleware));

    assert_eq!(chain.call("getUpdates", Params::new()).await.unwrap(), json!([1, 2, 3]));
}
