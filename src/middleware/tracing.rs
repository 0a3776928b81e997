use tracing::info;

use super::{Flow, Middleware};
use crate::request::Request;

/// Logs every request entering the pipeline with its correlation id.
///
/// Always continues; pair it with the dispatcher's completion logs to get a
/// start/finish pair per request id.
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn handle(&self, request: &mut Request) -> anyhow::Result<Flow> {
        info!(
            request_id = %request.id(),
            method = %request.method(),
            path = %request.path(),
            "Request received"
        );
        Ok(Flow::Continue)
    }
}
