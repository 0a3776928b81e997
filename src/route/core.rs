use http::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::binding::{BindingSource, ParamBinding};
use crate::error::Error;
use crate::resolver::Resolver;
use crate::router::PathPattern;

/// A static mapping from (method, path pattern) to a controller action.
///
/// `controller` and `action` are opaque registry keys; the resolver
/// capability turns the controller key into a live instance at dispatch
/// time. `middleware` lists per-route middleware references, run after the
/// application-level middleware in declaration order.
#[derive(Debug, Clone)]
pub struct Route {
    /// HTTP method this route answers
    pub method: Method,
    /// Path pattern with `:name` placeholder segments (e.g. `/users/:id`)
    pub pattern: String,
    /// Registry key of the controller
    pub controller: String,
    /// Action name invoked on the controller
    pub action: String,
    /// Ordered argument declarations for the action
    pub bindings: Vec<ParamBinding>,
    /// Per-route middleware references, in execution order
    pub middleware: Vec<String>,
    /// Free-form metadata exposed to middleware and controllers via the
    /// request (`Value::Null` when unset)
    pub metadata: Value,
}

impl Route {
    /// Create a route with no bindings, middleware, or metadata.
    #[must_use]
    pub fn new(
        method: Method,
        pattern: impl Into<String>,
        controller: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            method,
            pattern: pattern.into(),
            controller: controller.into(),
            action: action.into(),
            bindings: Vec::new(),
            middleware: Vec::new(),
            metadata: Value::Null,
        }
    }

    /// Append an argument binding; order of calls is argument order.
    #[must_use]
    pub fn with_binding(mut self, binding: ParamBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Append a per-route middleware reference.
    #[must_use]
    pub fn with_middleware(mut self, reference: impl Into<String>) -> Self {
        self.middleware.push(reference.into());
        self
    }

    /// Attach free-form metadata readable via `Request::route_metadata`.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Ordered collection of routes.
///
/// Registration order is matching precedence: when two patterns can both
/// match a concrete path, the earlier-registered route wins, so register the
/// more specific pattern first.
#[derive(Debug, Default, Clone)]
pub struct RouteTable {
    routes: Vec<Arc<Route>>,
}

impl RouteTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route, keeping registration order.
    #[must_use]
    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.push(Arc::new(route));
        self
    }

    /// Append a route in place.
    pub fn push(&mut self, route: Route) {
        self.routes.push(Arc::new(route));
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.routes.iter()
    }

    pub(crate) fn into_routes(self) -> Vec<Arc<Route>> {
        self.routes
    }

    /// Validate every route against the resolver before serving requests.
    ///
    /// Checks, per route:
    /// - the path pattern compiles;
    /// - the controller key resolves;
    /// - the action is one the controller exposes;
    /// - binding keys are unique, and `Path`-sourced keys name a placeholder
    ///   of the pattern;
    /// - every middleware reference resolves.
    ///
    /// Running this at startup turns what would otherwise be steady-state
    /// 500s into registration-time failures.
    ///
    /// # Errors
    ///
    /// The first offending route aborts validation with the matching
    /// registration-time error.
    pub fn validate(&self, resolver: &dyn Resolver) -> Result<(), Error> {
        for route in &self.routes {
            let pattern = PathPattern::compile(&route.pattern)?;

            let controller =
                resolver
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

            for (idx, binding) in route.bindings.iter().enumerate() {
                let duplicated = route.bindings[..idx]
                    .iter()
                    .any(|earlier| earlier.key == binding.key);
                if duplicated {
                    return Err(Error::InvalidBinding {
                        key: binding.key.clone(),
                        controller: route.controller.clone(),
                        action: route.action.clone(),
                        reason: "binding key declared more than once".to_string(),
                    });
                }

                if binding.source == BindingSource::Path
                    && !pattern.param_names().iter().any(|p| p.as_ref() == binding.key)
                {
                    return Err(Error::InvalidBinding {
                        key: binding.key.clone(),
                        controller: route.controller.clone(),
                        action: route.action.clone(),
                        reason: format!(
                            "pattern '{}' has no ':{}' placeholder",
                            route.pattern, binding.key
                        ),
                    });
                }
            }

            for reference in &route.middleware {
                resolver
                    .middleware(reference)
                    .map_err(|source| Error::HandlerResolution {
                        reference: reference.clone(),
                        source,
                    })?;
            }

            debug!(
                method = %route.method,
                pattern = %route.pattern,
                controller = %route.controller,
                action = %route.action,
                bindings = route.bindings.len(),
                "Route validated"
            );
        }

        Ok(())
    }
}
