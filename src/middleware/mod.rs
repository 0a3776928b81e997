//! # Middleware Module
//!
//! Ordered pre-controller processing with short-circuit semantics.
//!
//! ## Overview
//!
//! A middleware inspects (and may mutate) the request before the controller
//! runs. Each [`Middleware::handle`] call returns a [`Flow`] decision:
//!
//! - [`Flow::Continue`]: hand control to the next middleware in the chain;
//! - [`Flow::Halt`]: stop the chain without error; neither the remaining
//!   middleware nor the controller run (deliberate short-circuit);
//! - [`Flow::Respond`]: stop the chain and use the supplied response
//!   verbatim, bypassing the controller and the error path entirely.
//!
//! Returning `Err` aborts the chain and the whole request.
//!
//! ## Ordering
//!
//! [`MiddlewareChain::run`] executes stages strictly in the order given,
//! application-level middleware concatenated before route-level middleware,
//! each stage fully completing before the next starts. All stages share the
//! same mutable [`crate::request::Request`]; writes to its context store by
//! an earlier stage are visible to later stages and to the controller.

mod auth;
mod core;
mod tracing;

pub use auth::AuthMiddleware;
pub use core::{ChainOutcome, Flow, Middleware, MiddlewareChain};
pub use self::tracing::TracingMiddleware;
