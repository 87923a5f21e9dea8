//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Accepted connection (net)
//!     → server.rs (router, middleware chain)
//!     → middleware/ (recovery, request ID, trace, access log, headers, CORS)
//!     → handlers (health, hello)
//!     → response.rs (JSON bodies, error mapping)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::{ApiError, MessageResponse};
pub use server::{build_router, with_middleware, ApiServer};
