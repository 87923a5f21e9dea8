//! Minimal production HTTP API.
//!
//! Serves a health check, a versioned health check and a greeting endpoint
//! behind a fixed middleware chain (panic recovery, request IDs, access
//! logging, security headers, CORS), with graceful shutdown.

// Core subsystems
pub mod config;
pub mod handlers;
pub mod http;
pub mod net;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ApiConfig;
pub use http::ApiServer;
pub use lifecycle::{ServerManager, Shutdown};
