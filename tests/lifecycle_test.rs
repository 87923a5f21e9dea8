//! Lifecycle behaviour over real sockets: start, drain, forced close.

use std::time::Duration;

use axum::routing::get;
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use hello_api::config::Environment;
use hello_api::http::{build_router, with_middleware};
use hello_api::lifecycle::{LifecycleError, ServerManager, ServerState, StopOutcome};
use hello_api::net::ListenerError;
use hello_api::ApiServer;

mod common;
use common::{test_config, TestServer};

fn slow_router(delay: Duration) -> Router {
    let routes = Router::new().route(
        "/slow",
        get(move || async move {
            tokio::time::sleep(delay).await;
            "done"
        }),
    );
    with_middleware(routes, &test_config(Environment::Development))
}

#[tokio::test]
async fn serves_over_tcp_with_request_id() {
    let config = test_config(Environment::Development);
    let server = TestServer::start(build_router(&config), &config).await;

    let response = reqwest::get(server.url("/api/v1/hello?name=Alice"))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Hello, Alice!" }));

    assert_eq!(server.stop(Duration::from_secs(1)).await, StopOutcome::Drained);
}

#[tokio::test]
async fn in_flight_request_completes_during_drain() {
    let config = test_config(Environment::Development);
    let server = TestServer::start(slow_router(Duration::from_millis(300)), &config).await;
    let url = server.url("/slow");

    let in_flight = tokio::spawn(async move { reqwest::get(url).await?.text().await });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let outcome = server.stop(Duration::from_secs(5)).await;
    assert_eq!(outcome, StopOutcome::Drained);
    assert_eq!(in_flight.await.unwrap().unwrap(), "done");
}

#[tokio::test]
async fn deadline_forces_remaining_connections_closed() {
    let config = test_config(Environment::Development);
    let server = TestServer::start(slow_router(Duration::from_secs(30)), &config).await;
    let url = server.url("/slow");

    let in_flight = tokio::spawn(async move { reqwest::get(url).await });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let outcome = server.stop(Duration::from_millis(100)).await;
    assert_eq!(outcome, StopOutcome::Forced { remaining: 1 });
    assert!(in_flight.await.unwrap().is_err());
}

#[tokio::test]
async fn no_new_connections_after_stop() {
    let config = test_config(Environment::Development);
    let server = TestServer::start(build_router(&config), &config).await;
    let url = server.url("/health");

    server.stop(Duration::from_secs(1)).await;

    assert!(reqwest::get(url).await.is_err());
}

#[tokio::test]
async fn bind_conflict_is_fatal_error() {
    let config = test_config(Environment::Development);
    let running = TestServer::start(build_router(&config), &config).await;

    let mut taken = config.clone();
    taken.listener.port = running.addr.port();
    let err = ApiServer::new(taken)
        .run(std::future::pending::<()>())
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Bind(ListenerError::Bind { .. })));

    running.stop(Duration::from_secs(1)).await;
}

#[tokio::test]
async fn run_stops_when_signal_fires() {
    let config = test_config(Environment::Development);
    let outcome = ApiServer::new(config)
        .run(tokio::time::sleep(Duration::from_millis(50)))
        .await
        .unwrap();

    assert_eq!(outcome, StopOutcome::Drained);
}

#[tokio::test]
async fn invalid_transitions_do_not_change_state() {
    let config = test_config(Environment::Development);
    let mut manager = ServerManager::new(build_router(&config), config.listener.clone());

    assert!(manager.stop(Duration::from_secs(1)).await.is_err());
    assert_eq!(manager.state(), ServerState::Stopped);

    manager.start().await.unwrap();
    assert!(manager.start().await.is_err());
    assert_eq!(manager.state(), ServerState::Running);

    manager.stop(Duration::from_secs(1)).await.unwrap();
    assert_eq!(manager.state(), ServerState::Stopped);
}
