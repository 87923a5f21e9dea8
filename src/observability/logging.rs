//! Structured logging.
//!
//! JSON events in production, human-readable output everywhere else. The
//! level filter comes from `RUST_LOG` when set.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::Environment;

/// Default filter when `RUST_LOG` is unset.
pub fn default_filter(environment: Environment) -> &'static str {
    match environment {
        Environment::Production => "info",
        Environment::Development => "hello_api=debug,tower_http=debug,info",
    }
}

/// Install the global tracing subscriber.
///
/// Must be called at most once per process.
pub fn init_tracing(environment: Environment) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(environment).into());

    let fmt_layer = match environment {
        Environment::Production => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        Environment::Development => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
