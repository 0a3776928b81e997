//! Application entry point: glue for router, middleware chain, dispatcher,
//! and error rendering.

use std::sync::Arc;
use tracing::{error, warn};

use crate::dispatcher::Dispatcher;
use crate::error::Error;
use crate::middleware::ChainOutcome;
use crate::middleware::MiddlewareChain;
use crate::request::{BodyDeserializer, JsonBodyDeserializer, Request, RequestEvent};
use crate::resolver::Resolver;
use crate::response::Response;
use crate::route::RouteTable;
use crate::router::Router;

/// Renders pipeline errors into transport responses.
///
/// The core only classifies failures; this hook owns the mapping to status
/// codes and envelopes. Supply a custom implementation via
/// [`Application::with_error_handler`] to control the wire shape.
pub trait ErrorHandler: Send + Sync {
    /// Turn a pipeline error into the response sent to the client.
    fn render(&self, error: &Error) -> Response;
}

/// Default error rendering: `{"error": message}` envelopes.
///
/// Client-side faults (no matching route, unbindable or malformed input)
/// map to 404/400. Configuration faults, middleware failures, and
/// controller failures map to 500.
pub struct DefaultErrorHandler;

impl ErrorHandler for DefaultErrorHandler {
    fn render(&self, error: &Error) -> Response {
        let status = match error {
            Error::RouteNotFound { .. } => 404,
            Error::ArgumentBinding { .. }
            | Error::BodyDeserialize(_)
            | Error::UnsupportedMethod(_)
            | Error::MissingKey(_)
            | Error::MissingHeader(_) => 400,
            _ => 500,
        };

        if status < 500 {
            warn!(status, error = %error, "Request rejected");
        } else {
            error!(status, error = %error, "Request failed");
        }

        Response::error(status, &error.to_string())
    }
}

/// The assembled request pipeline: `handle(event) -> Response`.
///
/// Construction validates the whole route table against the resolver, so a
/// misregistered controller, action, binding, or middleware reference is a
/// startup failure rather than a steady-state 500.
pub struct Application {
    router: Router,
    dispatcher: Dispatcher,
    resolver: Arc<dyn Resolver>,
    middleware: Vec<String>,
    error_handler: Arc<dyn ErrorHandler>,
    body_deserializer: Arc<dyn BodyDeserializer>,
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("router", &self.router)
            .field("middleware", &self.middleware)
            .finish_non_exhaustive()
    }
}

impl Application {
    /// Build an application from a route table and a resolver capability.
    ///
    /// # Errors
    ///
    /// Propagates registration-time validation failures
    /// ([`Error::InvalidPattern`], [`Error::InvalidBinding`],
    /// [`Error::UnknownAction`], [`Error::HandlerResolution`]).
    pub fn new(table: RouteTable, resolver: Arc<dyn Resolver>) -> Result<Self, Error> {
        table.validate(resolver.as_ref())?;
        let router = Router::new(table)?;
        Ok(Self {
            router,
            dispatcher: Dispatcher::new(Arc::clone(&resolver)),
            resolver,
            middleware: Vec::new(),
            error_handler: Arc::new(DefaultErrorHandler),
            body_deserializer: Arc::new(JsonBodyDeserializer::default()),
        })
    }

    /// Append an application-level middleware reference.
    ///
    /// Application-level middleware run before every route's own middleware,
    /// in the order added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HandlerResolution`] when the reference does not
    /// resolve, checked here so the mistake surfaces at startup.
    pub fn with_middleware(mut self, reference: impl Into<String>) -> Result<Self, Error> {
        let reference = reference.into();
        self.resolver
            .middleware(&reference)
            .map_err(|source| Error::HandlerResolution {
                reference: reference.clone(),
                source,
            })?;
        self.middleware.push(reference);
        Ok(self)
    }

    /// Replace the default error handler.
    #[must_use]
    pub fn with_error_handler(mut self, handler: Arc<dyn ErrorHandler>) -> Self {
        self.error_handler = handler;
        self
    }

    /// Replace the default JSON body deserializer.
    #[must_use]
    pub fn with_body_deserializer(mut self, deserializer: Arc<dyn BodyDeserializer>) -> Self {
        self.body_deserializer = deserializer;
        self
    }

    /// Process one inbound event to completion.
    ///
    /// Never fails: pipeline errors are rendered through the configured
    /// [`ErrorHandler`]. A middleware early response bypasses the error path
    /// and is returned verbatim.
    pub fn handle(&self, event: &RequestEvent) -> Response {
        match self.try_handle(event) {
            Ok(response) => response,
            Err(error) => self.error_handler.render(&error),
        }
    }

    fn try_handle(&self, event: &RequestEvent) -> Result<Response, Error> {
        // Resolution-time failures (unknown route, unresolvable controller,
        // missing action) happen here, before the request object is built
        // and before any middleware side effects.
        let route_match = self.router.resolve(event)?;
        let handler = self.dispatcher.resolve_handler(&route_match.route)?;

        let mut request =
            Request::from_event(event, &route_match, self.body_deserializer.as_ref())?;

        let chain = MiddlewareChain::assemble(
            self.resolver.as_ref(),
            self.middleware
                .iter()
                .chain(route_match.route.middleware.iter()),
        )?;

        match chain.run(&mut request)? {
            ChainOutcome::Responded(response) => return Ok(response),
            ChainOutcome::Halted => return Ok(Response::no_content()),
            ChainOutcome::Completed => {}
        }

        self.dispatcher.invoke(&handler, &route_match.route, &request)
    }
}
