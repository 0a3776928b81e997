//! Controller trait implemented by application handler types.

use crate::dispatcher::Arguments;
use crate::response::Response;

/// Result of a controller action.
///
/// Errors are arbitrary application failures; the core passes them through
/// unmodified so the outer error handler can log and report the original
/// cause.
pub type ControllerResult = Result<Response, anyhow::Error>;

/// An application-supplied handler type whose named actions implement route
/// logic.
///
/// One controller instance may serve any number of routes; the route names
/// the action, and the dispatcher delivers the arguments declared by the
/// route's bindings, in order.
///
/// ```rust
/// use switchboard::{Arguments, Controller, ControllerResult, Response};
///
/// struct Health;
///
/// impl Controller for Health {
///     fn actions(&self) -> &[&str] {
///         &["check"]
///     }
///
///     fn invoke(&self, action: &str, _args: Arguments<'_>) -> ControllerResult {
///         match action {
///             "check" => Ok(Response::ok(serde_json::json!({ "status": "ok" }))),
///             other => Err(anyhow::anyhow!("unknown action '{other}'")),
///         }
///     }
/// }
/// ```
pub trait Controller: Send + Sync {
    /// The action names this controller exposes.
    ///
    /// Used by registration-time validation so a route naming a missing
    /// action fails at startup, and re-checked by the dispatcher before
    /// invocation.
    fn actions(&self) -> &[&str];

    /// Invoke the named action with the bound argument list.
    ///
    /// # Errors
    ///
    /// Application-defined; errors propagate to the caller unmodified.
    fn invoke(&self, action: &str, args: Arguments<'_>) -> ControllerResult;
}
