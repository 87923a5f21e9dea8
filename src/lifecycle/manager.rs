//! Server lifecycle state machine.
//!
//! # States
//! ```text
//! Stopped → Starting → Running → Stopping → Stopped
//! ```
//!
//! - `start` binds the listener and spawns the accept loop, then returns
//!   without waiting for traffic.
//! - `stop` closes the listener, signals every connection to finish its
//!   in-flight requests, and waits up to a deadline. Connections still open
//!   at the deadline are aborted.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::sync::broadcast;
use tokio::task::{JoinHandle, JoinSet};

use crate::config::ListenerConfig;
use crate::lifecycle::shutdown::Shutdown;
use crate::net::{serve_connection, ConnectionTracker, Listener, ListenerError};

/// Pause after a transient accept error (e.g. file descriptor exhaustion).
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stopped => "stopped",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopping => "stopping",
        };
        f.write_str(name)
    }
}

/// How a stop completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// Every connection finished before the deadline.
    Drained,
    /// The deadline elapsed and this many connections were closed forcibly.
    Forced { remaining: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Bind(#[from] ListenerError),

    #[error("cannot {action} a server that is {state}")]
    InvalidTransition {
        action: &'static str,
        state: ServerState,
    },

    #[error("accept loop failed: {0}")]
    AcceptLoop(#[from] tokio::task::JoinError),
}

/// Handle to a bound, accepting server. Only exists while running.
struct RunningServer {
    local_addr: SocketAddr,
    shutdown: Shutdown,
    accept_task: JoinHandle<Draining>,
}

/// What the accept loop hands back once it stops accepting.
struct Draining {
    graceful: GracefulShutdown,
    connections: JoinSet<()>,
    tracker: ConnectionTracker,
}

/// Owns the listening socket and drives the start/stop transitions.
pub struct ServerManager {
    router: Router,
    listener_config: ListenerConfig,
    state: ServerState,
    running: Option<RunningServer>,
}

impl ServerManager {
    pub fn new(router: Router, listener_config: ListenerConfig) -> Self {
        Self {
            router,
            listener_config,
            state: ServerState::Stopped,
            running: None,
        }
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    /// Bound address while running.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|running| running.local_addr)
    }

    /// Bind and start accepting on a background task.
    ///
    /// A bind failure leaves the manager `Stopped` and is returned to the
    /// caller, which is expected to treat it as fatal.
    pub async fn start(&mut self) -> Result<SocketAddr, LifecycleError> {
        if self.state != ServerState::Stopped {
            return Err(LifecycleError::InvalidTransition {
                action: "start",
                state: self.state,
            });
        }
        self.state = ServerState::Starting;

        let listener = match Listener::bind(&self.listener_config).await {
            Ok(listener) => listener,
            Err(err) => {
                self.state = ServerState::Stopped;
                return Err(err.into());
            }
        };
        let local_addr = listener.local_addr();

        let shutdown = Shutdown::new();
        let accept_task = tokio::spawn(accept_loop(
            listener,
            self.router.clone(),
            shutdown.subscribe(),
        ));

        self.running = Some(RunningServer {
            local_addr,
            shutdown,
            accept_task,
        });
        self.state = ServerState::Running;

        tracing::info!(address = %local_addr, "Server running");
        Ok(local_addr)
    }

    /// Stop accepting and drain in-flight connections, bounded by `deadline`.
    pub async fn stop(&mut self, deadline: Duration) -> Result<StopOutcome, LifecycleError> {
        let running = match (self.state, self.running.take()) {
            (ServerState::Running, Some(running)) => running,
            (state, running) => {
                self.running = running;
                return Err(LifecycleError::InvalidTransition {
                    action: "stop",
                    state,
                });
            }
        };
        self.state = ServerState::Stopping;
        tracing::info!(address = %running.local_addr, deadline = ?deadline, "Shutting down server");

        running.shutdown.trigger();
        let result = drain(running.accept_task, deadline).await;

        self.state = ServerState::Stopped;
        result
    }
}

async fn accept_loop(
    listener: Listener,
    router: Router,
    mut shutdown: broadcast::Receiver<()>,
) -> Draining {
    let graceful = GracefulShutdown::new();
    let tracker = ConnectionTracker::new();
    let mut connections = JoinSet::new();

    loop {
        tokio::select! {
            _ = shutdown.recv() => break,

            // Reap finished connection tasks so the set stays small.
            Some(_) = connections.join_next(), if !connections.is_empty() => {}

            accepted = listener.accept() => match accepted {
                Ok((stream, remote_addr, permit)) => {
                    let guard = tracker.track();
                    tracing::trace!(connection_id = %guard.id(), peer_addr = %remote_addr, "Serving connection");

                    let connection = serve_connection(stream, remote_addr, router.clone(), &graceful);
                    connections.spawn(async move {
                        let _permit = permit;
                        let _guard = guard;
                        connection.await;
                    });
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Accept failed");
                    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                }
            },
        }
    }

    drop(listener);
    tracing::info!(in_flight = tracker.active_count(), "Stopped accepting connections");

    Draining {
        graceful,
        connections,
        tracker,
    }
}

async fn drain(
    accept_task: JoinHandle<Draining>,
    deadline: Duration,
) -> Result<StopOutcome, LifecycleError> {
    let Draining {
        graceful,
        mut connections,
        tracker,
    } = accept_task.await?;

    let outcome = match tokio::time::timeout(deadline, graceful.shutdown()).await {
        Ok(()) => StopOutcome::Drained,
        Err(_) => {
            let remaining = tracker.active_count();
            tracing::warn!(remaining, "Drain deadline elapsed, closing remaining connections");
            connections.abort_all();
            StopOutcome::Forced { remaining }
        }
    };

    while connections.join_next().await.is_some() {}

    tracing::info!(outcome = ?outcome, "Server stopped");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use axum::routing::get;

    use super::*;

    fn local() -> ListenerConfig {
        ListenerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_connections: 16,
        }
    }

    fn manager() -> ServerManager {
        ServerManager::new(Router::new().route("/", get(|| async { "ok" })), local())
    }

    #[tokio::test]
    async fn start_then_stop() {
        let mut manager = manager();
        assert_eq!(manager.state(), ServerState::Stopped);
        assert_eq!(manager.local_addr(), None);

        let addr = manager.start().await.unwrap();
        assert_eq!(manager.state(), ServerState::Running);
        assert_ne!(addr.port(), 0);
        assert_eq!(manager.local_addr(), Some(addr));

        let outcome = manager.stop(Duration::from_secs(1)).await.unwrap();
        assert_eq!(outcome, StopOutcome::Drained);
        assert_eq!(manager.state(), ServerState::Stopped);
        assert_eq!(manager.local_addr(), None);
    }

    #[tokio::test]
    async fn stop_when_stopped_is_rejected() {
        let mut manager = manager();
        let err = manager.stop(Duration::from_secs(1)).await.unwrap_err();

        assert!(matches!(
            err,
            LifecycleError::InvalidTransition {
                action: "stop",
                state: ServerState::Stopped
            }
        ));
        assert_eq!(manager.state(), ServerState::Stopped);
    }

    #[tokio::test]
    async fn double_start_is_rejected() {
        let mut manager = manager();
        manager.start().await.unwrap();

        let err = manager.start().await.unwrap_err();
        assert!(matches!(err, LifecycleError::InvalidTransition { action: "start", .. }));
        assert_eq!(manager.state(), ServerState::Running);

        manager.stop(Duration::from_secs(1)).await.unwrap();
    }

    #[tokio::test]
    async fn bind_failure_leaves_manager_stopped() {
        let mut first = manager();
        let addr = first.start().await.unwrap();

        let mut config = local();
        config.port = addr.port();
        let mut second = ServerManager::new(Router::new(), config);

        let err = second.start().await.unwrap_err();
        assert!(matches!(err, LifecycleError::Bind(ListenerError::Bind { .. })));
        assert_eq!(second.state(), ServerState::Stopped);

        first.stop(Duration::from_secs(1)).await.unwrap();
    }

    #[tokio::test]
    async fn can_restart_after_stop() {
        let mut manager = manager();
        manager.start().await.unwrap();
        manager.stop(Duration::from_secs(1)).await.unwrap();

        manager.start().await.unwrap();
        assert_eq!(manager.state(), ServerState::Running);
        manager.stop(Duration::from_secs(1)).await.unwrap();
    }
}
