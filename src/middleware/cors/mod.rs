mod builder;
mod config;

pub use builder::CorsMiddlewareBuilder;
pub use config::CorsConfig;

use std::sync::Arc;
use std::time::Duration;

use http::Method;
use serde_json::Value;
use tracing::debug;

use crate::middleware::Middleware;
use crate::pipeline::{HandlerRequest, HandlerResponse, HeaderVec};

/// CORS (Cross-Origin Resource Sharing) middleware
///
/// Answers preflight OPTIONS requests with `204 No Content` and decorates
/// responses to cross-origin requests with `Access-Control-*` headers.
///
/// # Policy
///
/// Per request, the decision runs in two stages:
///
/// 1. **Origin gate**: a request without an `Origin` header (or with an
///    empty one) is not a CORS request. It passes through untouched,
///    `OPTIONS` included, and no CORS header is ever set on its response.
/// 2. **Preflight**: an `OPTIONS` request carrying an Origin short-circuits
///    the chain with a 204 response listing the configured methods, headers,
///    and preflight cache duration. Every other method proceeds to the
///    terminal handler.
///
/// Independently of the method, when the request's Origin matches the allow
/// list (an exact, case-sensitive entry or a `"*"` wildcard entry), the
/// response carries `Access-Control-Allow-Origin` echoing the *request's*
/// Origin value (never the `*` literal), `Access-Control-Expose-Headers`,
/// and `Access-Control-Allow-Credentials` as the literal `"true"`/`"false"`.
/// The first matching entry wins, so duplicate entries are harmless.
///
/// An OPTIONS request whose Origin matches nothing still receives the full
/// preflight header set and the 204 status; the mismatch only suppresses the
/// origin/credentials/expose-headers trio. This permissive behavior is
/// intentional and load-bearing for existing deployments.
///
/// # Usage
///
/// ```
/// use http::Method;
/// use corslet::middleware::CorsMiddlewareBuilder;
///
/// let cors = CorsMiddlewareBuilder::new()
///     .allowed_origins(&["https://example.com"])
///     .allowed_methods(&[Method::GET, Method::POST])
///     .allow_credentials(true)
///     .build();
/// ```
///
/// The default configuration allows every origin with credentials enabled;
/// see [`CorsMiddleware::default`].
pub struct CorsMiddleware {
    pub(crate) allowed_origins: Vec<String>,
    pub(crate) allowed_headers: Vec<String>,
    pub(crate) allowed_methods: Vec<Method>,
    pub(crate) allow_credentials: bool,
    pub(crate) expose_headers: Vec<String>,
    pub(crate) max_age: i64,
}

impl CorsMiddleware {
    /// Create a new CORS middleware with specific configuration.
    ///
    /// Values are serialized into response headers exactly as supplied;
    /// no validation is performed. Empty lists serialize to empty header
    /// values and a negative `max_age` is passed through verbatim. For an
    /// ergonomic API prefer [`CorsMiddlewareBuilder`].
    ///
    /// # Arguments
    ///
    /// * `allowed_origins` - Origins permitted to read responses
    ///   (e.g., `["https://example.com"]`); `"*"` entries match any origin
    /// * `allowed_headers` - Header names advertised on preflight responses
    /// * `allowed_methods` - HTTP methods advertised on preflight responses
    /// * `allow_credentials` - Serialized literally as `"true"`/`"false"`
    /// * `expose_headers` - Header names exposed to client-side scripts
    /// * `max_age` - Preflight cache duration in seconds
    pub fn new(
        allowed_origins: Vec<String>,
        allowed_headers: Vec<String>,
        allowed_methods: Vec<Method>,
        allow_credentials: bool,
        expose_headers: Vec<String>,
        max_age: i64,
    ) -> Self {
        Self {
            allowed_origins,
            allowed_headers,
            allowed_methods,
            allow_credentials,
            expose_headers,
            max_age,
        }
    }

    /// Check an origin against the allow list.
    ///
    /// First match wins; an entry of `"*"` matches any origin, otherwise the
    /// comparison is exact and case-sensitive.
    fn origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins
            .iter()
            .any(|allowed| allowed == "*" || allowed == origin)
    }

    fn joined_methods(&self) -> String {
        self.allowed_methods
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Default CORS policy - permissive
///
/// Default configuration:
/// - `allowed_origins`: `["*"]` (all origins)
/// - `allowed_methods`: `GET, POST, PUT, DELETE`
/// - `allowed_headers`: `["*"]`
/// - `expose_headers`: `["*"]`
/// - `max_age`: `3600` (cache preflights for 1 hour)
/// - `allow_credentials`: `true`
///
/// Suitable for development and trusted internal services; restrict
/// `allowed_origins` for anything public.
impl Default for CorsMiddleware {
    fn default() -> Self {
        CorsMiddlewareBuilder::new().build()
    }
}

impl Middleware for CorsMiddleware {
    /// Short-circuit CORS preflight requests.
    ///
    /// Requests without an `Origin` header pass through untouched. An
    /// `OPTIONS` request with an Origin is answered immediately with 204 and
    /// the configured method/header/max-age set; the origin trio is applied
    /// by [`after`](Middleware::after), which the pipeline also runs on
    /// short-circuited responses. All other methods proceed to the handler.
    fn before(&self, req: &HandlerRequest) -> Option<HandlerResponse> {
        if !matches!(req.get_header("origin"), Some(o) if !o.is_empty()) {
            return None;
        }

        if req.method != Method::OPTIONS {
            return None;
        }

        debug!(path = %req.path, "CORS preflight short-circuit");
        let mut headers = HeaderVec::new();
        headers.push((
            Arc::from("access-control-allow-methods"),
            self.joined_methods(),
        ));
        headers.push((
            Arc::from("access-control-allow-headers"),
            self.allowed_headers.join(","),
        ));
        headers.push((
            Arc::from("access-control-max-age"),
            self.max_age.to_string(),
        ));
        Some(HandlerResponse::new(204, headers, Value::Null))
    }

    /// Decorate the outgoing response with the origin header trio.
    ///
    /// Runs for every response, including preflight short-circuits. When the
    /// request carries an allowed Origin the response gets
    /// `Access-Control-Allow-Origin` (echoing the request's Origin value),
    /// `Access-Control-Expose-Headers`, and
    /// `Access-Control-Allow-Credentials`. Otherwise the response is left
    /// untouched.
    fn after(&self, req: &HandlerRequest, res: &mut HandlerResponse, _latency: Duration) {
        let origin = match req.get_header("origin") {
            Some(o) if !o.is_empty() => o,
            _ => return,
        };

        if !self.origin_allowed(origin) {
            debug!(origin, "origin not in allow list, skipping CORS headers");
            return;
        }

        res.set_header("access-control-allow-origin", origin.to_string());
        res.set_header(
            "access-control-expose-headers",
            self.expose_headers.join(","),
        );
        res.set_header(
            "access-control-allow-credentials",
            self.allow_credentials.to_string(),
        );
    }
}
