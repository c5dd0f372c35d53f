//! # Pipeline Module
//!
//! The pipeline module provides the per-request middleware chain that a host
//! server drives for every incoming request.
//!
//! ## Overview
//!
//! A [`Pipeline`] owns an ordered list of middleware and a registry of named
//! terminal handlers. For each request it:
//!
//! 1. Runs every middleware's `before` hook in registration order; the first
//!    hook to return a response short-circuits the chain and the terminal
//!    handler is never invoked
//! 2. Otherwise invokes the handler named by the request (unregistered names
//!    produce a 404 error response)
//! 3. Runs every middleware's `after` hook in registration order against the
//!    final response, short-circuited or not
//!
//! ## Request Flow
//!
//! ```text
//! host server -> Pipeline::handle
//!     -> middleware.before ...   (may short-circuit)
//!     -> named handler           (404 if unregistered)
//!     -> middleware.after ...    (response decoration)
//! -> HandlerResponse back to the host
//! ```
//!
//! A built pipeline holds no mutable state, so one instance can serve any
//! number of concurrent `handle` calls without synchronization.

mod core;

pub use core::{Handler, HandlerRequest, HandlerResponse, HeaderVec, Pipeline, MAX_INLINE_HEADERS};
