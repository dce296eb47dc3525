//! Webhook routes for Slack's request-URL delivery.

mod commands;
mod interactions;

use axum::Router;
use axum::http::HeaderMap;

use crate::error::AppError;
use crate::state::AppState;

/// Create all webhook routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(commands::router())
        .merge(interactions::router())
}

/// Verify the signature headers on an inbound Slack request.
///
/// # Errors
///
/// Returns `BadRequest` if the headers are missing and `Unauthorized` if
/// the signature does not verify.
fn verify_slack_request(
    state: &AppState,
    headers: &HeaderMap,
    body: &str,
) -> Result<(), AppError> {
    let timestamp = headers
        .get("X-Slack-Request-Timestamp")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing timestamp header".into()))?;

    let signature = headers
        .get("X-Slack-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing signature header".into()))?;

    state
        .slack()
        .verify_signature(timestamp, body, signature)
        .map_err(|e| AppError::Unauthorized(e.to_string()))
}

/// Extract a single field from a form-encoded body.
fn form_field(body: &str, name: &str) -> Option<String> {
    body.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != name {
            return None;
        }
        // Slack form-encodes with '+' for spaces
        let value = value.replace('+', " ");
        urlencoding::decode(&value).ok().map(|v| v.into_owned())
    })
}
