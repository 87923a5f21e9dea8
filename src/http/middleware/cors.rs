//! CORS enforcement.
//!
//! Origins are matched by exact string comparison against an allow-list
//! built once at startup. Preflight (`OPTIONS`) requests are answered here
//! with `204 No Content` and never reach a handler.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Origin, Content-Type, Accept, Authorization";

/// Immutable origin allow-list shared by every request.
#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    allowed_origins: Arc<HashSet<String>>,
}

impl CorsPolicy {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_origins: Arc::new(origins.into_iter().map(Into::into).collect()),
        }
    }

    /// Exact-match membership test.
    pub fn allows(&self, origin: &str) -> bool {
        self.allowed_origins.contains(origin)
    }

    pub fn len(&self) -> usize {
        self.allowed_origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed_origins.is_empty()
    }

    /// The inbound `Origin` value when it is on the allow-list.
    fn matching_origin(&self, headers: &HeaderMap) -> Option<HeaderValue> {
        let origin = headers.get(header::ORIGIN)?;
        let allowed = origin.to_str().map(|o| self.allows(o)).unwrap_or(false);
        allowed.then(|| origin.clone())
    }
}

pub async fn enforce_cors(
    State(policy): State<CorsPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let allowed_origin = policy.matching_origin(request.headers());

    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    if let Some(origin) = allowed_origin {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
    }
    headers.append(header::VARY, HeaderValue::from_static("Origin"));

    response
}
