//! Error taxonomy shared across routing, dispatching, and request handling.
//!
//! Every failure the pipeline can produce is a variant here, so callers can
//! match on the class of failure instead of parsing message strings. The
//! [`crate::app::ErrorHandler`] trait maps these onto HTTP responses.

use thiserror::Error;

/// All failures produced by the request pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// No registered route matched the incoming method and path.
    #[error("no route matches {method} {path}")]
    RouteNotFound {
        /// HTTP method of the unmatched request
        method: String,
        /// Path of the unmatched request
        path: String,
    },

    /// A route pattern failed to compile.
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as registered
        pattern: String,
        /// Why compilation rejected it
        reason: String,
    },

    /// A parameter binding declaration is inconsistent with its route.
    #[error("invalid binding '{key}' on {controller}.{action}: {reason}")]
    InvalidBinding {
        /// Binding key that was rejected
        key: String,
        /// Controller the route targets
        controller: String,
        /// Action the route targets
        action: String,
        /// Why validation rejected it
        reason: String,
    },

    /// The route names an action its controller does not expose.
    #[error("'{action}' is not an action on controller '{controller}'")]
    UnknownAction {
        /// Controller that was resolved
        controller: String,
        /// Action that is missing
        action: String,
    },

    /// The resolver could not produce a controller or middleware instance.
    #[error("failed to resolve handler '{reference}'")]
    HandlerResolution {
        /// The controller or middleware reference that failed
        reference: String,
        /// Underlying resolver error
        #[source]
        source: anyhow::Error,
    },

    /// A required argument could not be located in the request.
    #[error("unable to inject '{parameter}' into {controller}.{action}")]
    ArgumentBinding {
        /// Parameter key that could not be bound
        parameter: String,
        /// Controller the invocation targets
        controller: String,
        /// Action the invocation targets
        action: String,
    },

    /// The request used an HTTP method outside the supported set.
    #[error("unsupported HTTP method '{0}'")]
    UnsupportedMethod(String),

    /// The request body could not be deserialized.
    #[error("failed to deserialize request body")]
    BodyDeserialize(#[source] anyhow::Error),

    /// A middleware attempted to overwrite an existing context key.
    #[error("context key '{0}' is already set")]
    DuplicateContextKey(String),

    /// A required key was absent from every request section.
    #[error("required key '{0}' not found in request")]
    MissingKey(String),

    /// A required header was absent from the request.
    #[error("required header '{0}' not found in request")]
    MissingHeader(String),

    /// A middleware stage failed while processing the request.
    #[error("middleware failed: {0}")]
    Middleware(#[source] anyhow::Error),

    /// A controller action returned an error of its own.
    #[error(transparent)]
    Controller(anyhow::Error),
}
