//! # Command router
//!
//! Registry of `/command` handlers and the dispatcher that routes each incoming update to one of
//! them. Handler failures are logged at error level and returned to the caller unchanged, so the
//! surrounding update loop decides between fail-fast and skip-and-continue.

mod dispatcher;
mod handler;
mod parse;

pub use dispatcher::CommandDispatcher;
pub use handler::{handler_fn, FnHandler};
pub use parse::{normalize_command, parse_command, Invocation};
