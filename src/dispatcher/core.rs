use serde_json::Value;
use smallvec::SmallVec;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::controller::Controller;
use crate::error::Error;
use crate::request::Request;
use crate::resolver::Resolver;
use crate::response::Response;
use crate::route::{BindingSource, Route};

/// Maximum controller arguments before heap allocation.
/// Actions rarely take more than a handful of parameters.
pub const MAX_INLINE_ARGS: usize = 8;

/// One bound controller argument.
#[derive(Debug)]
pub enum Argument<'req> {
    /// A JSON value looked up from path, query, body, or context.
    Value(Value),
    /// The request object itself, for `Request`-sourced bindings.
    Request(&'req Request),
}

/// Ordered argument list delivered to a controller action.
///
/// Positions correspond one-to-one with the route's binding declarations.
#[derive(Debug, Default)]
pub struct Arguments<'req> {
    args: SmallVec<[Argument<'req>; MAX_INLINE_ARGS]>,
}

impl<'req> Arguments<'req> {
    /// Create an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an argument; order of calls is positional order.
    pub fn push(&mut self, arg: Argument<'req>) {
        self.args.push(arg);
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// The argument at `idx`, if any.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&Argument<'req>> {
        self.args.get(idx)
    }

    /// The JSON value at `idx`; `None` for a request-object argument.
    #[must_use]
    pub fn value(&self, idx: usize) -> Option<&Value> {
        match self.args.get(idx) {
            Some(Argument::Value(v)) => Some(v),
            _ => None,
        }
    }

    /// The string content at `idx`; `None` when the value is not a JSON
    /// string. Path and query values always surface as strings.
    #[must_use]
    pub fn text(&self, idx: usize) -> Option<&str> {
        self.value(idx).and_then(Value::as_str)
    }

    /// The request object at `idx`; `None` for a plain value argument.
    #[must_use]
    pub fn request(&self, idx: usize) -> Option<&'req Request> {
        match self.args.get(idx) {
            Some(Argument::Request(req)) => Some(req),
            _ => None,
        }
    }

    /// Iterate arguments in positional order.
    pub fn iter(&self) -> impl Iterator<Item = &Argument<'req>> {
        self.args.iter()
    }
}

/// A controller instance resolved ahead of middleware execution.
pub struct PreparedHandler {
    controller: Arc<dyn Controller>,
    reference: String,
}

impl std::fmt::Debug for PreparedHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedHandler")
            .field("reference", &self.reference)
            .finish_non_exhaustive()
    }
}

impl PreparedHandler {
    /// The registry key the controller was resolved under.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

/// Binds arguments and invokes controller actions through the resolver
/// capability.
#[derive(Clone)]
pub struct Dispatcher {
    resolver: Arc<dyn Resolver>,
}

impl Dispatcher {
    /// Create a dispatcher over the given resolver.
    #[must_use]
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self { resolver }
    }

    /// Resolve the route's controller instance and verify the action exists.
    ///
    /// Called before the middleware chain runs so resolution faults never
    /// trigger middleware side effects.
    ///
    /// # Errors
    ///
    /// [`Error::HandlerResolution`] wrapping the resolver's failure, or
    /// [`Error::UnknownAction`] when the controller does not expose the
    /// route's action.
    pub fn resolve_handler(&self, route: &Route) -> Result<PreparedHandler, Error> {
        debug!(
            controller = %route.controller,
            action = %route.action,
            "Handler lookup"
        );

        let controller =
            self.resolver
                .controller(&route.controller)
                .map_err(|source| Error::HandlerResolution {
                    reference: route.controller.clone(),
                    source,
                })?;

        if !controller.actions().contains(&route.action.as_str()) {
            return Err(Error::UnknownAction {
                controller: route.controller.clone(),
                action: route.action.clone(),
            });
        }

        Ok(PreparedHandler {
            controller,
            reference: route.controller.clone(),
        })
    }

    /// Bind the route's declared arguments out of the request and invoke the
    /// controller action.
    ///
    /// # Errors
    ///
    /// [`Error::ArgumentBinding`] when a required binding has no value in its
    /// source; [`Error::Controller`] passing a controller failure through
    /// unmodified.
    pub fn invoke(
        &self,
        handler: &PreparedHandler,
        route: &Route,
        request: &Request,
    ) -> Result<Response, Error> {
        let args = Self::bind_arguments(route, request)?;

        info!(
            request_id = %request.id(),
            controller = %route.controller,
            action = %route.action,
            args = args.len(),
            "Request dispatched to controller"
        );
        let start = Instant::now();

        let response = handler
            .controller
            .invoke(&route.action, args)
            .map_err(Error::Controller)?;

        info!(
            request_id = %request.id(),
            controller = %route.controller,
            action = %route.action,
            status = response.status,
            latency_ms = start.elapsed().as_millis() as u64,
            "Controller response received"
        );

        Ok(response)
    }

    /// Build the ordered argument list from the route's bindings.
    ///
    /// `Request`-sourced bindings (and `Auto` bindings literally keyed
    /// `request`) receive the request object itself; every other binding is
    /// looked up in its declared source, with `Auto` cascading through
    /// context, path, query, then body; the first source that defines the
    /// key wins.
    fn bind_arguments<'req>(
        route: &Route,
        request: &'req Request,
    ) -> Result<Arguments<'req>, Error> {
        let mut args = Arguments::new();

        for binding in &route.bindings {
            let arg = match binding.source {
                BindingSource::Request => Some(Argument::Request(request)),
                BindingSource::Auto if binding.key == "request" => {
                    Some(Argument::Request(request))
                }
                BindingSource::Auto => request.get(&binding.key).map(Argument::Value),
                BindingSource::Path => request
                    .path_param(&binding.key)
                    .map(|v| Argument::Value(Value::String(v.to_string()))),
                BindingSource::Query => request
                    .query_param(&binding.key)
                    .map(|v| Argument::Value(Value::String(v.to_string()))),
                BindingSource::Body => request.body().get(&binding.key).cloned().map(Argument::Value),
                BindingSource::Context => {
                    request.context_get(&binding.key).cloned().map(Argument::Value)
                }
            };

            match arg {
                Some(arg) => args.push(arg),
                None if binding.required => {
                    return Err(Error::ArgumentBinding {
                        parameter: binding.key.clone(),
                        controller: route.controller.clone(),
                        action: route.action.clone(),
                    });
                }
                None => args.push(Argument::Value(Value::Null)),
            }
        }

        Ok(args)
    }
}
