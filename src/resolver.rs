//! Resolver capability and the default name-keyed registry.
//!
//! The core never constructs controllers or middleware itself; it asks an
//! injected [`Resolver`] to turn an opaque registry key into a live instance.
//! This keeps dependency wiring (an IoC container, a lazy factory, plain
//! maps) outside the dispatch pipeline: the dispatcher wraps any resolver
//! failure as a handler-resolution error rather than letting a raw container
//! error escape unlabeled.

use anyhow::bail;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::controller::Controller;
use crate::middleware::Middleware;

/// Capability that turns registry keys into live instances.
///
/// Implementations may be backed by anything: the shipped [`Registry`],
/// a DI container adapter, or a test double. Both methods may fail; failures
/// are surfaced as server-side configuration faults.
pub trait Resolver: Send + Sync {
    /// Produce the controller registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns the underlying construction/lookup error; the dispatcher wraps
    /// it as a handler-resolution failure.
    fn controller(&self, name: &str) -> anyhow::Result<Arc<dyn Controller>>;

    /// Produce the middleware registered under `name`.
    ///
    /// # Errors
    ///
    /// Same contract as [`Resolver::controller`].
    fn middleware(&self, name: &str) -> anyhow::Result<Arc<dyn Middleware>>;
}

/// Default resolver: pre-built instances in name-keyed maps.
///
/// Instances are registered once at startup and shared (`Arc`) across all
/// requests, so resolution is a lock-free map lookup at steady state.
#[derive(Default)]
pub struct Registry {
    controllers: HashMap<String, Arc<dyn Controller>>,
    middleware: HashMap<String, Arc<dyn Middleware>>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller under `name`.
    ///
    /// Replacing an existing registration is allowed but logged, since it is
    /// almost always a wiring mistake.
    pub fn register_controller(&mut self, name: impl Into<String>, controller: Arc<dyn Controller>) {
        let name = name.into();
        if self.controllers.insert(name.clone(), controller).is_some() {
            warn!(controller = %name, "Replaced existing controller registration");
        } else {
            info!(
                controller = %name,
                total_controllers = self.controllers.len(),
                "Controller registered"
            );
        }
    }

    /// Register a middleware under `name`.
    pub fn register_middleware(&mut self, name: impl Into<String>, middleware: Arc<dyn Middleware>) {
        let name = name.into();
        if self.middleware.insert(name.clone(), middleware).is_some() {
            warn!(middleware = %name, "Replaced existing middleware registration");
        } else {
            info!(
                middleware = %name,
                total_middleware = self.middleware.len(),
                "Middleware registered"
            );
        }
    }
}

impl Resolver for Registry {
    fn controller(&self, name: &str) -> anyhow::Result<Arc<dyn Controller>> {
        match self.controllers.get(name) {
            Some(controller) => Ok(Arc::clone(controller)),
            None => bail!("no controller registered under '{name}'"),
        }
    }

    fn middleware(&self, name: &str) -> anyhow::Result<Arc<dyn Middleware>> {
        match self.middleware.get(name) {
            Some(mw) => Ok(Arc::clone(mw)),
            None => bail!("no middleware registered under '{name}'"),
        }
    }
}
