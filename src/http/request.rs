//! Request identification.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the client sent none
//! - Expose the ID to handlers, spans and the access log
//!
//! The ID is set as early as possible: `SetRequestIdLayer` writes it into the
//! request headers and extensions, `PropagateRequestIdLayer` copies it onto
//! the response. An inbound `x-request-id` is kept unchanged.

use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Header carrying the request identifier in both directions.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates a fresh UUID v4 for requests that arrive without an ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Remove a blank inbound `x-request-id` so a fresh one is generated.
pub async fn drop_empty_request_id(mut request: Request<Body>) -> Request<Body> {
    let blank = request
        .headers()
        .get(X_REQUEST_ID)
        .is_some_and(|value| value.as_bytes().iter().all(u8::is_ascii_whitespace));
    if blank {
        request.headers_mut().remove(X_REQUEST_ID);
    }
    request
}

/// Read the request ID from a header map, if present and printable.
pub fn request_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(X_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

/// Span factory for `TraceLayer` so every event inside a request carries
/// its ID.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request_id(request.headers()).unwrap_or("-");
    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
    )
}
