//! Pipeline core - request/response types and chain execution.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use http::Method;
use serde_json::Value;
use smallvec::SmallVec;
use tracing::{debug, error, info, warn};

use crate::ids::RequestId;
use crate::middleware::Middleware;

/// Maximum inline headers before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage for the request hot path.
///
/// Header names use `Arc<str>` because names repeat across requests
/// (Origin, Content-Type, ...) and cloning an `Arc` is an atomic increment
/// rather than a string copy. Values stay `String` as per-request data.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Request data passed through the middleware chain to a terminal handler.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// Unique request ID for tracing and correlation
    pub request_id: RequestId,
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Request path
    pub path: String,
    /// Name of the handler that should process this request
    pub handler_name: String,
    /// HTTP headers (stack-allocated for ≤16 headers)
    pub headers: HeaderVec,
    /// Request body parsed as JSON (if present)
    pub body: Option<Value>,
}

impl HandlerRequest {
    /// Build a request, taking the request id from an `x-request-id` header
    /// when one is present and parseable.
    pub fn new(
        method: Method,
        path: impl Into<String>,
        handler_name: impl Into<String>,
        headers: HeaderVec,
        body: Option<Value>,
    ) -> Self {
        let request_id = RequestId::from_header_or_new(
            headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case("x-request-id"))
                .map(|(_, v)| v.as_str()),
        );
        Self {
            request_id,
            method,
            path: path.into(),
            handler_name: handler_name.into(),
            headers,
            body,
        }
    }

    /// Get a header by name (case-insensitive per RFC 7230).
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response data produced by a handler or a short-circuiting middleware.
#[derive(Debug, Clone)]
pub struct HandlerResponse {
    /// HTTP status code (200, 404, 500, etc.)
    pub status: u16,
    /// HTTP response headers (stack-allocated for ≤16 headers)
    pub headers: HeaderVec,
    /// Response body as JSON
    pub body: Value,
}

impl HandlerResponse {
    /// Create a new response with the given status, headers, and body.
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a JSON response with a `content-type` header.
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create an error response with a JSON error body.
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }

    /// Get a header by name (case-insensitive per RFC 7230).
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or update a header, replacing any existing value for the name.
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }
}

/// Terminal handler invoked at the end of the chain.
pub type Handler = Arc<dyn Fn(&HandlerRequest) -> HandlerResponse + Send + Sync>;

/// Ordered middleware chain plus a registry of named terminal handlers.
///
/// Middleware runs in registration order on the way in (`before`) and in the
/// same order on the way out (`after`). Handlers are looked up by the
/// request's `handler_name`; route matching is the host's concern.
pub struct Pipeline {
    /// Map of handler names to their handler functions
    pub handlers: HashMap<String, Handler>,
    /// Ordered list of middleware applied to every request/response
    pub middlewares: Vec<Arc<dyn Middleware>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Create a new empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Pipeline {
            handlers: HashMap::new(),
            middlewares: Vec::new(),
        }
    }

    /// Register a terminal handler under the given name.
    ///
    /// If a handler with the same name already exists it is replaced.
    pub fn register_handler<F>(&mut self, name: &str, handler_fn: F)
    where
        F: Fn(&HandlerRequest) -> HandlerResponse + Send + Sync + 'static,
    {
        if self
            .handlers
            .insert(name.to_string(), Arc::new(handler_fn))
            .is_some()
        {
            warn!(handler_name = %name, "replaced existing handler");
        }
    }

    /// Append middleware to the processing chain.
    ///
    /// Middleware executes in the order it is added.
    pub fn add_middleware(&mut self, mw: Arc<dyn Middleware>) {
        self.middlewares.push(mw);
    }

    /// Run one request through the chain and return the final response.
    ///
    /// Every middleware's `before` hook runs in order; the first hook to
    /// return a response wins and the terminal handler is skipped, but the
    /// remaining `before` hooks still observe the request. Every `after`
    /// hook then runs against the final response, short-circuited or not.
    #[must_use]
    pub fn handle(&self, request: HandlerRequest) -> HandlerResponse {
        debug!(
            request_id = %request.request_id,
            middleware_count = self.middlewares.len(),
            "middleware before execution"
        );

        let mut early_resp: Option<HandlerResponse> = None;
        for (idx, mw) in self.middlewares.iter().enumerate() {
            if early_resp.is_none() {
                early_resp = mw.before(&request);
                if early_resp.is_some() {
                    debug!(
                        request_id = %request.request_id,
                        middleware_idx = idx,
                        "middleware returned early response"
                    );
                }
            } else {
                mw.before(&request);
            }
        }

        let (mut resp, latency) = if let Some(r) = early_resp {
            (r, Duration::from_millis(0))
        } else {
            let start = Instant::now();
            let r = match self.handlers.get(&request.handler_name) {
                Some(handler) => {
                    info!(
                        request_id = %request.request_id,
                        handler_name = %request.handler_name,
                        method = %request.method,
                        path = %request.path,
                        "request dispatched to handler"
                    );
                    handler(&request)
                }
                None => {
                    error!(
                        request_id = %request.request_id,
                        handler_name = %request.handler_name,
                        "handler not found"
                    );
                    HandlerResponse::error(404, "handler not found")
                }
            };
            (r, start.elapsed())
        };

        debug!(
            request_id = %request.request_id,
            response_status = resp.status,
            latency_ms = latency.as_millis() as u64,
            "middleware after execution"
        );

        for mw in &self.middlewares {
            mw.after(&request, &mut resp, latency);
        }

        resp
    }
}
