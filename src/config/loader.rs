//! Configuration loading from disk and the process environment.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::fs;

use crate::config::schema::{ApiConfig, CorsConfig, Environment};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file, ignoring the
/// environment.
pub fn load_config(path: &Path) -> Result<ApiConfig, ConfigError> {
    finalize(read_config_file(path)?)
}

/// Load configuration from the process environment.
///
/// See [`load_with`] for precedence rules.
pub fn load_from_env() -> Result<ApiConfig, ConfigError> {
    load_with(|name| std::env::var(name).ok())
}

/// Load configuration using `lookup` to resolve environment variables.
///
/// Precedence, lowest first: built-in defaults, the TOML file named by
/// `CONFIG_FILE`, then individual variables. Empty variables count as unset.
/// When no origins are configured anywhere, the environment default is used
/// and flagged via [`CorsConfig::uses_default`].
pub fn load_with<F>(lookup: F) -> Result<ApiConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    let mut config = match lookup("CONFIG_FILE") {
        Some(path) => read_config_file(Path::new(&path))?,
        None => ApiConfig::default(),
    };

    if let Some(host) = lookup("HOST") {
        config.listener.host = host;
    }
    if let Some(port) = lookup("PORT") {
        config.listener.port = parse_env("PORT", &port)?;
    }
    if let Some(max) = lookup("MAX_CONNECTIONS") {
        config.listener.max_connections = parse_env("MAX_CONNECTIONS", &max)?;
    }
    if let Some(env) = lookup("ENV") {
        config.environment = Environment::from_env_value(Some(env.as_str()));
    }
    if let Some(origins) = lookup("CORS_ALLOWED_ORIGINS") {
        config.cors.allowed_origins = CorsConfig::parse_origins(&origins);
    }
    if let Some(version) = lookup("APP_VERSION") {
        config.version = version;
    }
    if let Some(timeout) = lookup("SHUTDOWN_TIMEOUT_SECS") {
        config.shutdown.timeout_secs = parse_env("SHUTDOWN_TIMEOUT_SECS", &timeout)?;
    }
    if let Some(addr) = lookup("METRICS_ADDR") {
        config.observability.metrics_address = Some(addr);
    }

    finalize(config)
}

/// Fill in the environment's default origins if none were configured,
/// then validate.
fn finalize(mut config: ApiConfig) -> Result<ApiConfig, ConfigError> {
    if config.cors.allowed_origins.is_empty() {
        config.cors.allowed_origins = config.environment.default_origins();
        config.cors.uses_default = true;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<ApiConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

fn parse_env<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        name,
        value: value.to_string(),
    })
}
