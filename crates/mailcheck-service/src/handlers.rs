use std::collections::HashSet;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use futures::future::join_all;

use mailcheck_core::label::StatusLabel;
use mailcheck_core::wire::{CheckRequest, CheckResults, StatusResponse};

use crate::error::ApiError;
use crate::state::ServiceState;

/// GET /status - liveness probe, no auth.
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

/// POST /check_emails - classify a batch.
///
/// Every submitted email is a key in the response, in submission order.
/// A classifier error turns into `Unknown` for that email only.
pub async fn check_emails(
    State(state): State<ServiceState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<CheckResults>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let mut seen = HashSet::new();
    let unique: Vec<&str> = req
        .emails
        .iter()
        .map(String::as_str)
        .filter(|email| seen.insert(*email))
        .collect();

    let classifier = &state.classifier;
    let labels = join_all(unique.iter().map(|email| async move {
        match classifier.classify(email).await {
            Ok(label) => label,
            Err(e) => {
                tracing::warn!(
                    email = %email,
                    classifier = classifier.name(),
                    error = %e,
                    "classification failed"
                );
                StatusLabel::Unknown
            }
        }
    }))
    .await;

    let results: CheckResults = unique
        .into_iter()
        .map(str::to_string)
        .zip(labels)
        .collect();

    tracing::info!(
        count = results.len(),
        classifier = classifier.name(),
        "classified batch"
    );
    Ok(Json(results))
}
