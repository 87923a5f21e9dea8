//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and the origin
//! allow-list. All errors are collected, not just the first.

use crate::config::schema::ApiConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.max_connections must be greater than zero")]
    ZeroMaxConnections,

    #[error("shutdown.timeout_secs must be greater than zero")]
    ZeroShutdownTimeout,

    #[error("cors origin {0:?} is empty")]
    EmptyOrigin(String),

    #[error("cors origin {0:?} contains a wildcard; only exact origins are allowed")]
    WildcardOrigin(String),

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &ApiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.max_connections == 0 {
        errors.push(ValidationError::ZeroMaxConnections);
    }

    if config.shutdown.timeout_secs == 0 {
        errors.push(ValidationError::ZeroShutdownTimeout);
    }

    for origin in &config.cors.allowed_origins {
        if origin.trim().is_empty() {
            errors.push(ValidationError::EmptyOrigin(origin.clone()));
        } else if origin.contains('*') {
            errors.push(ValidationError::WildcardOrigin(origin.clone()));
        }
    }

    if let Some(Err(_)) = config.observability.metrics_socket_addr() {
        let addr = config.observability.metrics_address.clone().unwrap_or_default();
        errors.push(ValidationError::InvalidMetricsAddress(addr));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ApiConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = ApiConfig::default();
        config.listener.max_connections = 0;
        config.shutdown.timeout_secs = 0;
        config.cors.allowed_origins = vec!["".into(), "https://*.example".into()];
        config.observability.metrics_address = Some("not-an-addr".into());

        let errors = validate_config(&config).unwrap_err();

        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroMaxConnections,
                ValidationError::ZeroShutdownTimeout,
                ValidationError::EmptyOrigin("".into()),
                ValidationError::WildcardOrigin("https://*.example".into()),
                ValidationError::InvalidMetricsAddress("not-an-addr".into()),
            ]
        );
    }

    #[test]
    fn accepts_metrics_address() {
        let mut config = ApiConfig::default();
        config.observability.metrics_address = Some("127.0.0.1:9090".into());
        assert!(validate_config(&config).is_ok());
    }
}
