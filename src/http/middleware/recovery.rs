//! Panic recovery.
//!
//! Installed as the outermost layer via `CatchPanicLayer::custom`, so a
//! panic anywhere below turns into a 500 JSON response and the connection
//! keeps serving.

use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::http::response::ApiError;

/// Build the response for a caught panic and log the payload.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic_message(panic.as_ref());
    tracing::error!(panic = %detail, "Handler panicked");
    ApiError::Internal.into_response()
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        *message
    } else {
        "unknown panic payload"
    }
}
