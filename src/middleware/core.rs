use std::time::Duration;

use crate::pipeline::{HandlerRequest, HandlerResponse};

/// A single step in the request pipeline.
///
/// `before` runs ahead of the terminal handler; returning `Some` response
/// short-circuits the chain. `after` runs against every outgoing response.
pub trait Middleware: Send + Sync {
    fn before(&self, _req: &HandlerRequest) -> Option<HandlerResponse> {
        None
    }
    fn after(&self, _req: &HandlerRequest, _res: &mut HandlerResponse, _latency: Duration) {}
}
