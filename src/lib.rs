//! # Switchboard
//!
//! **Switchboard** is a transport-agnostic request routing and dispatch core
//! for serverless-style handlers: given an inbound HTTP-like event, it
//! resolves a matching route, runs an ordered middleware chain with
//! short-circuit semantics, binds declared parameters out of the request,
//! invokes a controller action, and produces a normalized response. It binds
//! to no HTTP server; the host transport (an AWS Lambda adapter, a test
//! harness) feeds it [`RequestEvent`]s and ships the [`Response`]s.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`route`]** - Static route definitions, parameter binding declarations,
//!   and registration-time validation
//! - **[`router`]** - Path pattern compilation and registration-order route
//!   resolution
//! - **[`request`]** - Inbound events and the per-request runtime object with
//!   its mutable context store
//! - **[`middleware`]** - Ordered pre-controller processing with
//!   continue/halt/respond flow control
//! - **[`dispatcher`]** - Argument binding and controller invocation through
//!   the resolver capability
//! - **[`resolver`]** - The `resolve(key) -> instance` capability and the
//!   default name-keyed registry
//! - **[`app`]** - The assembled pipeline: `Application::handle(event)`
//! - **[`error`]** - The branchable failure taxonomy
//!
//! ## Request Flow
//!
//! 1. Router matches the incoming event → route + extracted path parameters
//! 2. Dispatcher resolves the controller instance (before any middleware, so
//!    configuration faults never trigger middleware side effects)
//! 3. The event is promoted to a [`Request`] (body deserialized, context
//!    store attached)
//! 4. The middleware chain runs in order; any stage may halt the chain or
//!    answer with an early response
//! 5. The dispatcher binds the route's declared arguments and invokes the
//!    controller action
//! 6. The response, or an error rendered by the [`app::ErrorHandler`],
//!    goes back to the transport
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use http::Method;
//! use switchboard::{
//!     Application, Arguments, Controller, ControllerResult, ParamBinding, Registry,
//!     RequestEvent, Response, Route, RouteTable,
//! };
//!
//! struct Users;
//!
//! impl Controller for Users {
//!     fn actions(&self) -> &[&str] {
//!         &["get_user"]
//!     }
//!
//!     fn invoke(&self, action: &str, args: Arguments<'_>) -> ControllerResult {
//!         match action {
//!             "get_user" => {
//!                 let id = args.text(0).ok_or_else(|| anyhow::anyhow!("missing id"))?;
//!                 Ok(Response::ok(serde_json::json!({ "id": id })))
//!             }
//!             other => Err(anyhow::anyhow!("unknown action '{other}'")),
//!         }
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! registry.register_controller("users", Arc::new(Users));
//!
//! let table = RouteTable::new().with_route(
//!     Route::new(Method::GET, "/users/:id", "users", "get_user")
//!         .with_binding(ParamBinding::path("id")),
//! );
//!
//! let app = Application::new(table, Arc::new(registry)).expect("valid table");
//! let response = app.handle(&RequestEvent::new(Method::GET, "/users/42"));
//! assert_eq!(response.status, 200);
//! assert_eq!(response.body["id"], "42");
//! ```

pub mod app;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod ids;
pub mod logging;
pub mod middleware;
pub mod request;
pub mod resolver;
pub mod response;
pub mod route;
pub mod router;
pub mod runtime_config;

pub use app::{Application, DefaultErrorHandler, ErrorHandler};
pub use controller::{Controller, ControllerResult};
pub use dispatcher::{Argument, Arguments, Dispatcher, PreparedHandler};
pub use error::Error;
pub use ids::RequestId;
pub use middleware::{AuthMiddleware, ChainOutcome, Flow, Middleware, MiddlewareChain, TracingMiddleware};
pub use request::{
    parse_method, BodyDeserializer, HeaderVec, JsonBodyDeserializer, ParamVec, Request,
    RequestEvent,
};
pub use resolver::{Registry, Resolver};
pub use response::Response;
pub use route::{BindingSource, ParamBinding, Route, RouteTable};
pub use router::{PathPattern, RouteMatch, Router};
pub use runtime_config::RuntimeConfig;
