//! Liveness endpoints.
//!
//! `/health` answers with a bare status for load balancers and container
//! platforms; `/api/v1/health` adds the version fixed at construction.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Status reported while the process is serving.
pub const STATUS_OK: &str = "ok";

/// Health check response.
///
/// `version` is omitted from the basic endpoint and always present (possibly
/// empty) on the versioned one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: STATUS_OK.to_string(),
            version: None,
        }
    }

    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            ..Self::ok()
        }
    }
}

/// State for the versioned endpoint.
#[derive(Debug, Clone)]
pub struct HealthState {
    version: Arc<str>,
}

impl HealthState {
    pub fn new(version: impl Into<Arc<str>>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// `GET /api/v1/health`
pub async fn versioned_health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse::with_version(state.version()))
}
