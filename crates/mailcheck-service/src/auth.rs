//! Shared-secret check on protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use mailcheck_core::wire::API_KEY_HEADER;

use crate::error::ApiError;
use crate::state::ServiceState;

/// Middleware: the `x-api-key` header must equal the secret byte for byte.
///
/// Runs before the body is read, so a bad key is rejected whatever the
/// payload looks like.
pub async fn require_api_key(
    State(state): State<ServiceState>,
    req: Request,
    next: Next,
) -> Response {
    match req.headers().get(API_KEY_HEADER) {
        Some(value) if value.as_bytes() == state.api_key.as_bytes() => next.run(req).await,
        Some(_) => {
            tracing::warn!("rejected request with invalid API key");
            ApiError::Unauthorized("Invalid API key".to_string()).into_response()
        }
        None => {
            tracing::warn!("rejected request without API key");
            ApiError::Unauthorized(format!("Missing {API_KEY_HEADER} header")).into_response()
        }
    }
}
