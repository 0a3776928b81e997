//! # Router Module
//!
//! Path matching and route resolution.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling the route table's `:name` path patterns into matchers, once,
//!   at construction
//! - Matching incoming events to registered routes in registration order
//! - Extracting named path parameters from matched routes
//!
//! ## Architecture
//!
//! A two-phase approach:
//!
//! 1. **Compilation**: at startup, patterns like `/users/:id` become anchored
//!    regexes with one capture per placeholder. Compilation failures are
//!    registration-time errors; nothing is compiled per request.
//!
//! 2. **Matching**: for each incoming event, the router scans the table in
//!    registration order, testing only routes whose method matches. The first
//!    pattern match wins. Precedence is registration order, so more specific
//!    patterns must be registered before more general ones.
//!
//! Resolution is stateless per call and purely read-only against the table.

mod core;
mod path;

pub use core::{RouteMatch, Router};
pub use path::PathPattern;
