//! # botkit-middleware
//!
//! Ready-made [`botkit_core::Middleware`] for the outbound call chain:
//! logging, default-parameter injection, required-parameter validation and API envelope unwrapping.

mod logging_auth;
mod result;
mod validation;

#[cfg(test)]
mod test;

pub use logging_auth::{DefaultParamsMiddleware, LoggingMiddleware};
pub use result::ResultMiddleware;
pub use validation::{required_params, ValidationMiddleware};
