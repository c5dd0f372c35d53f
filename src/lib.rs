//! # Corslet
//!
//! **Corslet** is a small, configurable CORS (Cross-Origin Resource Sharing)
//! policy middleware for pipeline-based Rust HTTP services.
//!
//! ## Overview
//!
//! A host server hands each request through an ordered chain of middleware
//! before it reaches a terminal handler. Corslet plugs into that chain as a
//! single step: it reads the request's `Origin` header, decides whether the
//! origin is permitted, decorates the response with the matching
//! `Access-Control-*` headers, and answers preflight `OPTIONS` requests with
//! `204 No Content` without ever invoking the handler.
//!
//! ## Architecture
//!
//! - **[`pipeline`]** - request/response types ([`pipeline::HandlerRequest`],
//!   [`pipeline::HandlerResponse`]) and the [`pipeline::Pipeline`] that runs
//!   the middleware chain and the named terminal handlers
//! - **[`middleware`]** - the [`middleware::Middleware`] trait and the CORS
//!   policy ([`middleware::CorsMiddleware`] with its builder and file-loadable
//!   [`middleware::CorsConfig`])
//! - **[`ids`]** - ULID-backed request identifiers used for log correlation
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use http::Method;
//! use corslet::middleware::CorsMiddlewareBuilder;
//! use corslet::pipeline::{HandlerRequest, HandlerResponse, HeaderVec, Pipeline};
//!
//! let cors = CorsMiddlewareBuilder::new()
//!     .allowed_origins(&["https://example.com"])
//!     .max_age(600)
//!     .build();
//!
//! let mut pipeline = Pipeline::new();
//! pipeline.add_middleware(Arc::new(cors));
//! pipeline.register_handler("root", |_req| {
//!     HandlerResponse::json(200, serde_json::json!({ "ok": true }))
//! });
//!
//! let mut headers = HeaderVec::new();
//! headers.push((Arc::from("origin"), "https://example.com".to_string()));
//! let request = HandlerRequest::new(Method::GET, "/", "root", headers, None);
//! let response = pipeline.handle(request);
//!
//! assert_eq!(response.status, 200);
//! assert_eq!(
//!     response.get_header("access-control-allow-origin"),
//!     Some("https://example.com")
//! );
//! ```
//!
//! ## Policy Notes
//!
//! The policy is deliberately permissive in two documented ways that are
//! preserved for compatibility with existing deployments:
//!
//! - A preflight `OPTIONS` request whose origin matches nothing still
//!   receives the full `Allow-Methods` / `Allow-Headers` / `Max-Age` set and
//!   a 204 status; an origin mismatch only suppresses the
//!   origin/credentials/expose-headers trio.
//! - The default configuration allows every origin with credentials enabled.
//!   Restrict `allowed_origins` before exposing a service publicly.
//!
//! Configuration values are serialized into headers exactly as supplied;
//! the builder performs no validation.

pub mod ids;
pub mod middleware;
pub mod pipeline;

pub use middleware::{CorsConfig, CorsMiddleware, CorsMiddlewareBuilder, Middleware};
pub use pipeline::{HandlerRequest, HandlerResponse, HeaderVec, Pipeline};
