//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs → http::server):
//!     Load config → Init tracing → Build router → manager.start()
//!
//! Shutdown (manager.rs):
//!     Signal received → Stop accepting → Drain connections → Stopped
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: a bind error is fatal
//! - Ordered shutdown: stop accept, drain, close
//! - Shutdown has a deadline: remaining connections are aborted after it

pub mod manager;
pub mod shutdown;
pub mod signals;

pub use manager::{LifecycleError, ServerManager, ServerState, StopOutcome};
pub use shutdown::Shutdown;
pub use signals::shutdown_signal;
