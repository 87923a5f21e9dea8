//! Greeting endpoint.

use axum::{
    extract::{rejection::QueryRejection, Query},
    Json,
};
use serde::Deserialize;

use crate::http::response::{ApiError, MessageResponse};

/// Name used when the client supplies none.
pub const DEFAULT_NAME: &str = "World";

/// Longest accepted name, counted in characters after trimming.
pub const MAX_NAME_CHARS: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub struct HelloParams {
    pub name: Option<String>,
}

/// Build the greeting for an optional raw name.
///
/// Whitespace is trimmed; an empty result falls back to [`DEFAULT_NAME`].
/// Names longer than [`MAX_NAME_CHARS`] are rejected.
pub fn greet(name: Option<&str>) -> Result<MessageResponse, ApiError> {
    let name = match name.map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_NAME,
    };

    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ApiError::BadRequest("name too long".to_string()));
    }

    Ok(MessageResponse::new(format!("Hello, {name}!")))
}

/// `GET /api/v1/hello?name=...`
pub async fn hello(
    params: Result<Query<HelloParams>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Query(params) = params.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let greeting = greet(params.name.as_deref())?;
    tracing::debug!(message = %greeting.message, "Greeting built");
    Ok(Json(greeting))
}
