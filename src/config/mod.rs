//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → optional TOML file ($CONFIG_FILE)
//!     → environment variables (PORT, ENV, CORS_ALLOWED_ORIGINS, ...)
//!     → validation.rs (semantic checks)
//!     → ApiConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow an empty environment
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, load_with, ConfigError};
pub use schema::{
    ApiConfig, CorsConfig, Environment, ListenerConfig, ObservabilityConfig, ShutdownConfig,
};
pub use validation::ValidationError;
