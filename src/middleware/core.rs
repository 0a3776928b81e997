use std::sync::Arc;
use tracing::{debug, error};

use crate::error::Error;
use crate::request::Request;
use crate::resolver::Resolver;
use crate::response::Response;

/// Control-flow decision returned by a middleware stage.
#[derive(Debug)]
pub enum Flow {
    /// Continue with the next middleware (or the controller).
    Continue,
    /// Stop the chain without error; the controller does not run.
    Halt,
    /// Stop the chain and use this response verbatim.
    Respond(Response),
}

/// Outcome of running a whole chain.
#[derive(Debug)]
pub enum ChainOutcome {
    /// Every stage continued; proceed to the controller.
    Completed,
    /// A stage halted the chain; no controller invocation.
    Halted,
    /// A stage produced an early response.
    Responded(Response),
}

/// A unit of pre-controller logic.
///
/// Stages run sequentially on the request's pipeline; there is no concurrent
/// execution between middleware of one chain, so a stage may rely on every
/// earlier stage having fully completed.
pub trait Middleware: Send + Sync {
    /// Process the request and decide how the chain proceeds.
    ///
    /// # Errors
    ///
    /// An error aborts the chain and the request; it surfaces through the
    /// application's error handler.
    fn handle(&self, request: &mut Request) -> anyhow::Result<Flow>;
}

/// An assembled, ordered list of middleware stages for one request.
///
/// References are resolved up front, before the first stage runs, so a
/// misconfigured middleware name fails as a resolution error rather than
/// aborting a half-executed chain.
pub struct MiddlewareChain {
    stages: Vec<(String, Arc<dyn Middleware>)>,
}

impl MiddlewareChain {
    /// Resolve the given middleware references, in order, into a runnable
    /// chain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HandlerResolution`] for the first reference the
    /// resolver cannot produce.
    pub fn assemble<'a>(
        resolver: &dyn Resolver,
        references: impl IntoIterator<Item = &'a String>,
    ) -> Result<Self, Error> {
        let mut stages = Vec::new();
        for reference in references {
            let mw = resolver
                .middleware(reference)
                .map_err(|source| Error::HandlerResolution {
                    reference: reference.clone(),
                    source,
                })?;
            stages.push((reference.clone(), mw));
        }
        Ok(Self { stages })
    }

    /// Number of stages in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the chain has no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run the chain against the request, strictly in order.
    ///
    /// Each stage fully completes before the next starts; a `Halt` or
    /// `Respond` decision stops the loop without running later stages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Middleware`] wrapping the first stage failure.
    pub fn run(&self, request: &mut Request) -> Result<ChainOutcome, Error> {
        for (idx, (name, stage)) in self.stages.iter().enumerate() {
            debug!(
                request_id = %request.id(),
                middleware_idx = idx,
                middleware = %name,
                "Middleware stage start"
            );
            match stage.handle(request) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Halt) => {
                    debug!(
                        request_id = %request.id(),
                        middleware_idx = idx,
                        middleware = %name,
                        "Middleware halted the chain"
                    );
                    return Ok(ChainOutcome::Halted);
                }
                Ok(Flow::Respond(response)) => {
                    debug!(
                        request_id = %request.id(),
                        middleware_idx = idx,
                        middleware = %name,
                        status = response.status,
                        "Middleware returned early response"
                    );
                    return Ok(ChainOutcome::Responded(response));
                }
                Err(e) => {
                    error!(
                        request_id = %request.id(),
                        middleware_idx = idx,
                        middleware = %name,
                        error = %e,
                        "Middleware failed - aborting request"
                    );
                    return Err(Error::Middleware(e));
                }
            }
        }
        Ok(ChainOutcome::Completed)
    }
}
