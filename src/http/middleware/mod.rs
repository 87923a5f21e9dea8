//! Request/response interceptors.
//!
//! # Order (outermost first)
//! ```text
//! recovery              last-resort panic → 500
//!   blank id removal    `x-request-id: ""` counts as absent
//!     request id        set if absent, copy to response
//!       trace span      request_id / method / uri
//!         access_log    one event per request, after the response is built
//!           security_headers
//!             cors      OPTIONS → 204 before any handler
//!               recovery  handler panic → 500
//!                 router
//! ```
//!
//! CORS sits innermost so its preflight responses still pick up the request
//! ID, the security headers and an access log line on the way out. The inner
//! recovery turns a handler panic into an ordinary 500 that every outer stage
//! decorates and logs.

pub mod access_log;
pub mod cors;
pub mod recovery;
pub mod security_headers;

pub use access_log::log_request;
pub use cors::{enforce_cors, CorsPolicy};
pub use recovery::panic_response;
pub use security_headers::{apply_security_headers, SecurityHeaders};
