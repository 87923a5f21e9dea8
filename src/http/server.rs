//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Map unknown paths to 404 and unsupported methods to 405, both as JSON
//! - Wire up middleware (recovery, request ID, tracing, access log, security
//!   headers, CORS)
//! - Run the server under the lifecycle manager until a shutdown signal

use std::future::Future;

use axum::{middleware, routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;
use crate::handlers::{health, hello, versioned_health, HealthState};
use crate::http::middleware::{
    apply_security_headers, enforce_cors, log_request, panic_response, CorsPolicy, SecurityHeaders,
};
use crate::http::request::{drop_empty_request_id, make_request_span, MakeRequestUuid, X_REQUEST_ID};
use crate::http::response::{method_not_allowed, not_found};
use crate::lifecycle::{LifecycleError, ServerManager, StopOutcome};

/// HTTP API server.
pub struct ApiServer {
    router: Router,
    config: ApiConfig,
}

impl ApiServer {
    /// Create a new server with the given configuration.
    pub fn new(config: ApiConfig) -> Self {
        let router = build_router(&config);
        Self { router, config }
    }

    /// Fully layered router, ready to serve.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Start serving, wait for `signal`, then drain within the configured
    /// shutdown timeout.
    ///
    /// A bind failure is returned immediately.
    pub async fn run<F>(self, signal: F) -> Result<StopOutcome, LifecycleError>
    where
        F: Future<Output = ()> + Send,
    {
        let mut manager = ServerManager::new(self.router, self.config.listener.clone());
        let addr = manager.start().await?;

        tracing::info!(
            address = %addr,
            environment = %self.config.environment,
            version = %self.config.version,
            cors_origins = self.config.cors.allowed_origins.len(),
            "HTTP server started"
        );

        signal.await;

        manager.stop(self.config.shutdown.timeout()).await
    }
}

/// Build the router with every route and the full middleware chain.
pub fn build_router(config: &ApiConfig) -> Router {
    let routes = Router::new()
        .route("/health", get(health).fallback(method_not_allowed))
        .route(
            "/api/v1/health",
            get(versioned_health).fallback(method_not_allowed),
        )
        .route("/api/v1/hello", get(hello).fallback(method_not_allowed))
        .fallback(not_found)
        .with_state(HealthState::new(config.version.as_str()));

    with_middleware(routes, config)
}

/// Wrap `router` in the middleware chain.
///
/// Layers are listed innermost first; see [`crate::http::middleware`] for
/// the resulting order. Panics are caught twice: next to the routes, so the
/// outer stages still see a 500 and decorate it, and outermost, for panics
/// inside the middleware itself.
pub fn with_middleware(router: Router, config: &ApiConfig) -> Router {
    let cors = CorsPolicy::new(config.cors.allowed_origins.iter().cloned());
    let security = SecurityHeaders::new(config.environment.is_production());

    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(cors, enforce_cors))
        .layer(middleware::from_fn_with_state(
            security,
            apply_security_headers,
        ))
        .layer(middleware::from_fn(log_request))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
        .layer(middleware::map_request(drop_empty_request_id))
        .layer(CatchPanicLayer::custom(panic_response))
}
