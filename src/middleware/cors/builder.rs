use http::Method;

use super::CorsMiddleware;

/// Builder for creating `CorsMiddleware` with a fluent API
///
/// Starts from the permissive defaults and lets each setter replace one
/// field wholesale. Setters can be chained in any order; the last call for a
/// field wins. No validation is performed on the supplied values - they are
/// serialized into response headers exactly as given.
///
/// # Example
///
/// ```
/// use http::Method;
/// use corslet::middleware::CorsMiddlewareBuilder;
///
/// let cors = CorsMiddlewareBuilder::new()
///     .allowed_origins(&["https://example.com", "https://api.example.com"])
///     .allowed_methods(&[Method::GET, Method::POST, Method::PUT])
///     .allowed_headers(&["Content-Type", "Authorization"])
///     .expose_headers(&["X-Total-Count"])
///     .allow_credentials(true)
///     .max_age(3600)
///     .build();
/// ```
pub struct CorsMiddlewareBuilder {
    allowed_origins: Vec<String>,
    allowed_headers: Vec<String>,
    allowed_methods: Vec<Method>,
    allow_credentials: bool,
    expose_headers: Vec<String>,
    max_age: i64,
}

impl CorsMiddlewareBuilder {
    /// Create a new builder with the permissive defaults
    ///
    /// Default configuration:
    /// - All origins allowed (`["*"]`)
    /// - Methods: `GET, POST, PUT, DELETE`
    /// - All headers allowed (`["*"]`)
    /// - All headers exposed (`["*"]`)
    /// - Credentials: `true`
    /// - Max age: `3600` seconds
    pub fn new() -> Self {
        Self {
            allowed_origins: vec!["*".into()],
            allowed_headers: vec!["*".into()],
            allowed_methods: vec![Method::GET, Method::POST, Method::PUT, Method::DELETE],
            allow_credentials: true,
            expose_headers: vec!["*".into()],
            max_age: 3600,
        }
    }

    /// Set allowed origins, replacing the default wildcard.
    ///
    /// Entries are matched against the request's `Origin` header exactly and
    /// case-sensitively; a `"*"` entry matches any origin. The matched
    /// response header always echoes the request's Origin value, never the
    /// `*` literal.
    pub fn allowed_origins(mut self, origins: &[&str]) -> Self {
        self.allowed_origins = origins.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the HTTP methods advertised on preflight responses.
    pub fn allowed_methods(mut self, methods: &[Method]) -> Self {
        self.allowed_methods = methods.to_vec();
        self
    }

    /// Set the header names advertised on preflight responses.
    pub fn allowed_headers(mut self, headers: &[&str]) -> Self {
        self.allowed_headers = headers.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Enable or disable credentials.
    ///
    /// The value is serialized literally, so `false` produces
    /// `Access-Control-Allow-Credentials: false` rather than omitting the
    /// header.
    pub fn allow_credentials(mut self, allow: bool) -> Self {
        self.allow_credentials = allow;
        self
    }

    /// Set the headers exposed to client-side scripts.
    pub fn expose_headers(mut self, headers: &[&str]) -> Self {
        self.expose_headers = headers.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the preflight cache duration in seconds.
    pub fn max_age(mut self, seconds: i64) -> Self {
        self.max_age = seconds;
        self
    }

    /// Build the CORS middleware.
    pub fn build(self) -> CorsMiddleware {
        CorsMiddleware::new(
            self.allowed_origins,
            self.allowed_headers,
            self.allowed_methods,
            self.allow_credentials,
            self.expose_headers,
            self.max_age,
        )
    }
}

impl Default for CorsMiddlewareBuilder {
    fn default() -> Self {
        Self::new()
    }
}
