use http::Method;
use serde::Deserialize;

use super::CorsMiddleware;

/// File-loadable CORS configuration
///
/// A `serde` mirror of [`CorsMiddleware`]'s fields with camelCase keys, so a
/// policy can live next to the rest of a service's deploy-time YAML instead
/// of being hardcoded. Every field defaults to the permissive policy, so a
/// partial document only has to name what it overrides:
///
/// ```yaml
/// allowedOrigins:
///   - https://example.com
/// allowedMethods: [GET, POST]
/// maxAge: 600
/// allowCredentials: true
/// ```
///
/// Methods are kept as plain strings here and parsed when the config is
/// turned into middleware; that parse is the only fallible step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub expose_headers: Vec<String>,
    pub max_age: i64,
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".into()],
            allowed_methods: vec!["GET".into(), "POST".into(), "PUT".into(), "DELETE".into()],
            allowed_headers: vec!["*".into()],
            expose_headers: vec!["*".into()],
            max_age: 3600,
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    /// Load a configuration from a YAML file.
    pub fn from_yaml_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CorsConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Convert into middleware, parsing the configured method names.
    pub fn into_middleware(self) -> anyhow::Result<CorsMiddleware> {
        let methods = self
            .allowed_methods
            .iter()
            .map(|m| Method::from_bytes(m.as_bytes()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CorsMiddleware::new(
            self.allowed_origins,
            self.allowed_headers,
            methods,
            self.allow_credentials,
            self.expose_headers,
            self.max_age,
        ))
    }
}
