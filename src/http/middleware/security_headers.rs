//! Security response headers.
//!
//! # Responsibilities
//! - Always: nosniff, frame denial, XSS hint, referrer policy, CSP and
//!   permissions policy
//! - Requests with `Authorization`: forbid caching of the response
//! - Production only: HSTS

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

pub const PERMISSIONS_POLICY: HeaderName = HeaderName::from_static("permissions-policy");

pub const CONTENT_SECURITY_POLICY: &str = "default-src 'none'; frame-ancestors 'none'";
pub const NO_STORE: &str = "no-store, no-cache, must-revalidate, private";
pub const HSTS: &str = "max-age=31536000; includeSubDomains; preload";

/// Which optional headers apply. Fixed at chain assembly.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityHeaders {
    /// Emit `Strict-Transport-Security`.
    pub hsts: bool,
}

impl SecurityHeaders {
    pub fn new(hsts: bool) -> Self {
        Self { hsts }
    }

    /// Write the headers into a response header map.
    pub fn apply(&self, headers: &mut HeaderMap, authorized: bool) {
        headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
        headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
        headers.insert(header::X_XSS_PROTECTION, HeaderValue::from_static("1; mode=block"));
        headers.insert(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        );
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        );
        headers.insert(
            PERMISSIONS_POLICY,
            HeaderValue::from_static("geolocation=(), microphone=(), camera=()"),
        );

        if authorized {
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_STORE));
            headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        }

        if self.hsts {
            headers.insert(header::STRICT_TRANSPORT_SECURITY, HeaderValue::from_static(HSTS));
        }
    }
}

pub async fn apply_security_headers(
    State(policy): State<SecurityHeaders>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request.headers().contains_key(header::AUTHORIZATION);
    let mut response = next.run(request).await;
    policy.apply(response.headers_mut(), authorized);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_headers_always_present() {
        let mut headers = HeaderMap::new();
        SecurityHeaders::new(false).apply(&mut headers, false);

        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
        assert_eq!(headers[header::X_XSS_PROTECTION], "1; mode=block");
        assert_eq!(headers[header::REFERRER_POLICY], "strict-origin-when-cross-origin");
        assert_eq!(headers[header::CONTENT_SECURITY_POLICY], CONTENT_SECURITY_POLICY);
        assert!(headers.contains_key(PERMISSIONS_POLICY));
        assert!(!headers.contains_key(header::CACHE_CONTROL));
        assert!(!headers.contains_key(header::PRAGMA));
        assert!(!headers.contains_key(header::STRICT_TRANSPORT_SECURITY));
    }

    #[test]
    fn authorized_requests_are_not_cached() {
        let mut headers = HeaderMap::new();
        SecurityHeaders::new(false).apply(&mut headers, true);

        assert_eq!(headers[header::CACHE_CONTROL], NO_STORE);
        assert_eq!(headers[header::PRAGMA], "no-cache");
    }

    #[test]
    fn hsts_only_when_enabled() {
        let mut headers = HeaderMap::new();
        SecurityHeaders::new(true).apply(&mut headers, false);
        assert_eq!(headers[header::STRICT_TRANSPORT_SECURITY], HSTS);
    }

    #[test]
    fn overrides_handler_cache_control_for_authorized() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=60"));
        SecurityHeaders::new(false).apply(&mut headers, true);
        assert_eq!(headers[header::CACHE_CONTROL], NO_STORE);
    }
}
