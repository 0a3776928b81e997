use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::path::PathPattern;
use crate::error::Error;
use crate::request::{ParamVec, RequestEvent};
use crate::route::{Route, RouteTable};

/// Result of successfully resolving an event to a route.
///
/// Created fresh per incoming request and discarded after dispatch. The
/// argument declarations the dispatcher needs live on the route itself as
/// its binding list.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route (Arc to avoid cloning the definition per request)
    pub route: Arc<Route>,
    /// Path parameters extracted from the URL (e.g. `:id` → `("id", "42")`)
    pub path_params: ParamVec,
}

impl RouteMatch {
    /// Get an extracted path parameter by name; last write wins for
    /// duplicate names at different path depths.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Resolves inbound events against the registered route table.
///
/// All patterns are compiled once at construction; resolution is a
/// registration-order linear scan, which makes precedence between
/// structurally overlapping patterns explicit and deterministic.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<(Arc<Route>, PathPattern)>,
}

impl Router {
    /// Build a router from a route table, compiling every pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] for the first pattern that fails to
    /// compile.
    pub fn new(table: RouteTable) -> Result<Self, Error> {
        let mut routes = Vec::with_capacity(table.len());
        for route in table.into_routes() {
            let pattern = PathPattern::compile(&route.pattern)?;
            routes.push((route, pattern));
        }

        let routes_summary: Vec<String> = routes
            .iter()
            .take(10)
            .map(|(route, _)| format!("{} {} -> {}.{}", route.method, route.pattern, route.controller, route.action))
            .collect();

        info!(
            routes_count = routes.len(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );

        Ok(Self { routes })
    }

    /// Resolve an event to the first registered route whose method and
    /// pattern both match.
    ///
    /// Read-only with respect to the table; no state survives the call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RouteNotFound`] when the table is exhausted without
    /// a match.
    pub fn resolve(&self, event: &RequestEvent) -> Result<RouteMatch, Error> {
        debug!(method = %event.method, path = %event.path, "Route match attempt");
        let match_start = Instant::now();

        for (route, pattern) in &self.routes {
            if route.method != event.method {
                continue;
            }
            if let Some(path_params) = pattern.match_path(&event.path) {
                info!(
                    method = %event.method,
                    path = %event.path,
                    route_pattern = %route.pattern,
                    controller = %route.controller,
                    action = %route.action,
                    path_params = ?path_params,
                    duration_us = match_start.elapsed().as_micros() as u64,
                    "Route matched"
                );
                return Ok(RouteMatch {
                    route: Arc::clone(route),
                    path_params,
                });
            }
        }

        warn!(
            method = %event.method,
            path = %event.path,
            duration_us = match_start.elapsed().as_micros() as u64,
            "No route matched"
        );

        Err(Error::RouteNotFound {
            method: event.method.to_string(),
            path: event.path.clone(),
        })
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the router has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All registered patterns, in precedence order. Useful for startup
    /// diagnostics.
    #[must_use]
    pub fn patterns(&self) -> Vec<String> {
        self.routes
            .iter()
            .map(|(route, _)| route.pattern.clone())
            .collect()
    }
}
