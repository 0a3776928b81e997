use super::{Flow, Middleware};
use crate::request::Request;
use crate::response::Response;

/// Shared-token authorization middleware.
///
/// Compares a header against a pre-shared token and rejects the request with
/// a `401` early response on mismatch, the canonical use of the chain's
/// short-circuit path.
pub struct AuthMiddleware {
    header: String,
    token: String,
}

impl AuthMiddleware {
    /// Guard on the `authorization` header.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_header("authorization", token)
    }

    /// Guard on a custom header (e.g. `x-api-key`).
    #[must_use]
    pub fn with_header(header: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            token: token.into(),
        }
    }
}

impl Middleware for AuthMiddleware {
    fn handle(&self, request: &mut Request) -> anyhow::Result<Flow> {
        match request.header(&self.header) {
            Some(value) if value == self.token => Ok(Flow::Continue),
            _ => Ok(Flow::Respond(Response::error(401, "Unauthorized"))),
        }
    }
}
