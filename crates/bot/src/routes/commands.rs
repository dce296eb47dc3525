//! Slash command webhook handler.
//!
//! `/request-upgrade` opens the intake modal. Slack expects an empty 200
//! within three seconds; the `views.open` call happens before the ack.

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use tracing::{info, instrument};

use crate::error::AppError;
use crate::state::AppState;

use super::{form_field, verify_slack_request};

/// Create the slash-command route.
pub fn router() -> Router<AppState> {
    Router::new().route("/slack/commands", post(handle_command))
}

/// Handle the `/request-upgrade` slash command.
#[instrument(skip(state, headers, body))]
async fn handle_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    verify_slack_request(&state, &headers, &body)?;

    let trigger_id = form_field(&body, "trigger_id")
        .ok_or_else(|| AppError::BadRequest("Missing trigger_id".into()))?;
    let user_id = form_field(&body, "user_id")
        .ok_or_else(|| AppError::BadRequest("Missing user_id".into()))?;

    info!(user = %user_id, "Opening upgrade request modal");

    state
        .workflow()
        .open_request_modal(&trigger_id, &user_id)
        .await?;

    Ok(StatusCode::OK)
}
