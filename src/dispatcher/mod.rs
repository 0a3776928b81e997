//! # Dispatcher Module
//!
//! Turns a resolved route and a request into a controller invocation.
//!
//! ## Request Flow
//!
//! 1. [`Dispatcher::resolve_handler`] asks the resolver capability for the
//!    route's controller instance and re-checks the action exists. This runs
//!    *before* the middleware chain, so a request that cannot possibly
//!    succeed never triggers side-effecting middleware.
//! 2. The middleware chain runs (see [`crate::middleware`]).
//! 3. [`Dispatcher::invoke`] builds the ordered argument list from the
//!    route's binding declarations: the request object for `Request`
//!    bindings, values looked up from path/query/body/context for the rest,
//!    and invokes the controller action.
//!
//! ## Error Handling
//!
//! Resolution and argument-binding failures are structured
//! ([`crate::Error::HandlerResolution`], [`crate::Error::ArgumentBinding`])
//! so the outer error handler can format them uniformly; controller errors
//! pass through unmodified.

mod core;

pub use core::{Argument, Arguments, Dispatcher, PreparedHandler, MAX_INLINE_ARGS};
