//! Shared fixtures for the integration tests: a counting controller, a set
//! of scriptable middleware, and resolver doubles.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use switchboard::{
    Argument, Arguments, Controller, ControllerResult, Flow, Middleware, Registry, Request,
    Resolver, Response,
};

/// Installs a console tracing subscriber for the duration of the test run.
pub struct TestTracing;

impl TestTracing {
    pub fn init() -> Self {
        switchboard::logging::init_with_filter("debug");
        TestTracing
    }
}

/// Controller double covering every binding shape the tests exercise, with
/// an invocation counter so tests can assert it was never called.
pub struct UsersController {
    calls: AtomicUsize,
}

impl UsersController {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Controller for UsersController {
    fn actions(&self) -> &[&str] {
        &["get_user", "create", "list", "echo_request", "echo_args", "meta"]
    }

    fn invoke(&self, action: &str, args: Arguments<'_>) -> ControllerResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match action {
            "get_user" => {
                let id = args
                    .text(0)
                    .ok_or_else(|| anyhow::anyhow!("missing id argument"))?;
                Ok(Response::ok(json!({ "id": id })))
            }
            "create" => {
                let name = args.value(0).cloned().unwrap_or(Value::Null);
                Ok(Response::json(201, json!({ "name": name })))
            }
            "list" => Ok(Response::ok(json!({ "items": [] }))),
            "echo_request" => {
                let request = args
                    .request(0)
                    .ok_or_else(|| anyhow::anyhow!("expected the request object"))?;
                Ok(Response::ok(json!({
                    "path": request.path(),
                    "is_request": true,
                })))
            }
            "echo_args" => {
                let values: Vec<Value> = args
                    .iter()
                    .map(|arg| match arg {
                        Argument::Value(v) => v.clone(),
                        Argument::Request(_) => json!("<request>"),
                    })
                    .collect();
                Ok(Response::ok(Value::Array(values)))
            }
            "meta" => {
                let request = args
                    .request(0)
                    .ok_or_else(|| anyhow::anyhow!("expected the request object"))?;
                Ok(Response::ok(request.route_metadata().clone()))
            }
            other => Err(anyhow::anyhow!("unknown action '{other}'")),
        }
    }
}

/// Appends its name to a shared log on every invocation; always continues.
pub struct RecordingMiddleware {
    name: String,
    log: Arc<Mutex<Vec<String>>>,
}

impl RecordingMiddleware {
    pub fn new(name: impl Into<String>, log: Arc<Mutex<Vec<String>>>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            log,
        })
    }
}

impl Middleware for RecordingMiddleware {
    fn handle(&self, _request: &mut Request) -> anyhow::Result<Flow> {
        self.log
            .lock()
            .expect("middleware log poisoned")
            .push(self.name.clone());
        Ok(Flow::Continue)
    }
}

/// Stops the chain without error.
pub struct HaltMiddleware;

impl Middleware for HaltMiddleware {
    fn handle(&self, _request: &mut Request) -> anyhow::Result<Flow> {
        Ok(Flow::Halt)
    }
}

/// Fails the chain with a generic error.
pub struct FailingMiddleware;

impl Middleware for FailingMiddleware {
    fn handle(&self, _request: &mut Request) -> anyhow::Result<Flow> {
        anyhow::bail!("boom")
    }
}

/// Writes a fixed value into the request context.
pub struct ContextMiddleware {
    pub key: String,
    pub value: Value,
}

impl ContextMiddleware {
    pub fn new(key: impl Into<String>, value: Value) -> Arc<Self> {
        Arc::new(Self {
            key: key.into(),
            value,
        })
    }
}

impl Middleware for ContextMiddleware {
    fn handle(&self, request: &mut Request) -> anyhow::Result<Flow> {
        request.context_set(self.key.clone(), self.value.clone(), false)?;
        Ok(Flow::Continue)
    }
}

/// Resolver double whose lookups always fail.
pub struct FailingResolver;

impl Resolver for FailingResolver {
    fn controller(&self, name: &str) -> anyhow::Result<Arc<dyn Controller>> {
        anyhow::bail!("container has no binding for '{name}'")
    }

    fn middleware(&self, name: &str) -> anyhow::Result<Arc<dyn Middleware>> {
        anyhow::bail!("container has no binding for '{name}'")
    }
}

/// A registry pre-loaded with the users controller under `"users"`.
pub fn registry_with_users(users: &Arc<UsersController>) -> Registry {
    let mut registry = Registry::new();
    registry.register_controller("users", Arc::clone(users) as Arc<dyn Controller>);
    registry
}
