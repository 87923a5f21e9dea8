//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use hello_api::config::{ApiConfig, Environment, ListenerConfig};
use hello_api::lifecycle::{ServerManager, StopOutcome};

pub const TEST_ORIGIN: &str = "https://app.example.com";

/// Config bound to an ephemeral loopback port with a single allowed origin.
pub fn test_config(environment: Environment) -> ApiConfig {
    let mut config = ApiConfig::default();
    config.environment = environment;
    config.version = "1.2.3".to_string();
    config.cors.allowed_origins = vec![TEST_ORIGIN.to_string()];
    config.listener = ListenerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        max_connections: 64,
    };
    config
}

/// Build a request with optional extra headers.
pub fn request(method: Method, uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).unwrap()
}

/// Drive one request through the router without a socket.
pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// A running server on an ephemeral port.
pub struct TestServer {
    pub manager: ServerManager,
    pub addr: SocketAddr,
}

impl TestServer {
    pub async fn start(router: Router, config: &ApiConfig) -> Self {
        let mut manager = ServerManager::new(router, config.listener.clone());
        let addr = manager.start().await.unwrap();
        Self { manager, addr }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stop(mut self, deadline: Duration) -> StopOutcome {
        self.manager.stop(deadline).await.unwrap()
    }
}
