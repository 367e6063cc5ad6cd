//! # Middleware chain
//!
//! Wraps every outbound API call in an ordered sequence of [`Middleware`]. Middleware run in
//! registration order on the way in; responses flow back in reverse order. The last `next` is the
//! [`Transport`]. Errors from any node or the transport propagate unchanged.

use serde_json::Value;
use std::sync::Arc;
use tracing::trace;

use crate::error::Result;
use crate::types::{Middleware, Params, Transport};

/// Continuation handed to a middleware: the rest of the chain plus the terminal transport.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    middleware: &'a [Arc<dyn Middleware>],
    transport: &'a dyn Transport,
}

impl<'a> Next<'a> {
    /// Runs the remaining middleware, then the transport.
    pub async fn run(self, method: &str, params: Params) -> Result<Value> {
        match self.middleware.split_first() {
            Some((current, rest)) => {
                let next = Next {
                    middleware: rest,
                    transport: self.transport,
                };
                current.handle(method, params, next).await
            }
            None => {
                trace!(method = %method, "step: transport call");
                self.transport.send(method, &params).await
            }
        }
    }
}

/// Ordered middleware plus the transport they wrap.
#[derive(Clone)]
pub struct MiddlewareChain {
    middleware: Vec<Arc<dyn Middleware>>,
    transport: Arc<dyn Transport>,
}

impl MiddlewareChain {
    /// Creates a chain with no middleware; every call goes straight to `transport`.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            middleware: Vec::new(),
            transport,
        }
    }

    /// Appends a middleware (runs after every previously added one on the way in).
    pub fn add_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn len(&self) -> usize {
        self.middleware.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middleware.is_empty()
    }

    /// Sends `method` through the whole chain.
    pub async fn call(&self, method: &str, params: Params) -> Result<Value> {
        Next {
            middleware: &self.middleware,
            transport: self.transport.as_ref(),
        }
        .run(method, params)
        .await
    }
}

// Ordering and propagation tests live in tests/middleware_chain_test.rs
