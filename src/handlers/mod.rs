//! Request handlers.
//!
//! Both handlers are stateless per request; the only injected value is the
//! version string for the versioned health check.

pub mod health;
pub mod hello;

pub use health::{health, versioned_health, HealthResponse, HealthState};
pub use hello::{greet, hello, HelloParams};
