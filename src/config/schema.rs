//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the API.
//! All types derive Serde traits for deserialization from config files.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Origins allowed when `CORS_ALLOWED_ORIGINS` is unset outside production.
pub const DEVELOPMENT_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:8080"];

/// Placeholder origin used when `CORS_ALLOWED_ORIGINS` is unset in production.
pub const PRODUCTION_ORIGINS: &[&str] = &["https://yourapp.com"];

/// Root configuration for the API service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Listener configuration (bind host, port, connection limit).
    pub listener: ListenerConfig,

    /// Deployment environment.
    pub environment: Environment,

    /// Cross-origin settings.
    pub cors: CorsConfig,

    /// Version string reported by `/api/v1/health`.
    pub version: String,

    /// Graceful shutdown settings.
    pub shutdown: ShutdownConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            environment: Environment::default(),
            cors: CorsConfig::default(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            shutdown: ShutdownConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Deployment environment, selected by `ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Hardened mode: JSON logs, HSTS.
    Production,
    /// Permissive mode for local work.
    #[default]
    Development,
}

impl Environment {
    /// Only the exact value `production` selects hardened mode.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("production") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    /// Origins used when none are configured explicitly.
    pub fn default_origins(self) -> Vec<String> {
        let origins = match self {
            Self::Production => PRODUCTION_ORIGINS,
            Self::Development => DEVELOPMENT_ORIGINS,
        };
        origins.iter().map(|o| o.to_string()).collect()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => f.write_str("production"),
            Self::Development => f.write_str("development"),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Port to bind. Zero asks the OS for an ephemeral port.
    pub port: u16,

    /// Maximum concurrent connections (backpressure).
    pub max_connections: usize,
}

impl ListenerConfig {
    /// The `host:port` string handed to the socket layer.
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_connections: 10_000,
        }
    }
}

/// Cross-origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CorsConfig {
    /// Exact-match origins. Empty means "use the environment default".
    pub allowed_origins: Vec<String>,

    /// Set when the origins came from the environment default rather than
    /// from the operator.
    #[serde(skip)]
    pub uses_default: bool,
}

impl CorsConfig {
    /// Parse a comma-separated origin list, trimming entries and skipping
    /// empty ones.
    pub fn parse_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Graceful shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Drain deadline in seconds.
    pub timeout_secs: u64,
}

impl ShutdownConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Prometheus endpoint bind address. Metrics export is off when unset.
    pub metrics_address: Option<String>,
}

impl ObservabilityConfig {
    pub fn metrics_socket_addr(&self) -> Option<Result<SocketAddr, std::net::AddrParseError>> {
        self.metrics_address.as_deref().map(str::parse)
    }
}
