//! Interactivity webhook handler.
//!
//! Slack delivers both modal submissions (`view_submission`) and button
//! clicks (`block_actions`) to this endpoint as `payload=<urlencoded
//! JSON>`.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::slack::messages::{
    APPROVE_ACTION, DENY_ACTION, REASON_BLOCK, REASON_INPUT_ACTION, UPGRADE_REQUEST_CALLBACK,
    USER_BLOCK, USER_SELECT_ACTION,
};
use crate::slack::{InteractionPayload, SubmittedView, ViewSubmissionErrors};
use crate::state::AppState;
use crate::workflow::{ModalMetadata, RequestContext, SubmissionOutcome};

use super::verify_slack_request;

/// Create the interactivity route.
pub fn router() -> Router<AppState> {
    Router::new().route("/slack/interactions", post(handle_interaction))
}

/// Handle a Slack interaction webhook.
#[tracing::instrument(skip(state, headers, body))]
async fn handle_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Response, AppError> {
    verify_slack_request(&state, &headers, &body)?;

    // Parse the payload (URL-encoded)
    let payload_str = body
        .strip_prefix("payload=")
        .ok_or_else(|| AppError::BadRequest("Invalid payload format".into()))?;

    let payload_decoded = urlencoding::decode(payload_str)
        .map_err(|e| AppError::BadRequest(format!("Failed to decode payload: {e}")))?;

    let payload: InteractionPayload = serde_json::from_str(&payload_decoded)
        .map_err(|e| AppError::BadRequest(format!("Failed to parse payload: {e}")))?;

    match payload.interaction_type.as_str() {
        "view_submission" => handle_view_submission(&state, &payload).await,
        "block_actions" => handle_block_action(&state, &payload).await,
        other => {
            warn!(interaction_type = %other, "Unknown interaction type");
            Err(AppError::BadRequest("Unknown interaction type".into()))
        }
    }
}

/// Handle an intake-modal submission.
///
/// The synchronous response body decides the modal's fate: empty 200
/// closes it, an `errors` response re-opens it with a field-level error.
async fn handle_view_submission(
    state: &AppState,
    payload: &InteractionPayload,
) -> Result<Response, AppError> {
    let view = payload
        .view
        .as_ref()
        .ok_or_else(|| AppError::BadRequest("No view in submission payload".into()))?;

    if view.callback_id != UPGRADE_REQUEST_CALLBACK {
        warn!(callback_id = %view.callback_id, "Unknown view callback");
        return Err(AppError::BadRequest("Unknown view callback".into()));
    }

    let metadata = ModalMetadata::decode(&view.private_metadata)?;
    let (target_user, reason) = submitted_fields(view)?;

    let outcome = state
        .workflow()
        .handle_submission(&metadata, &target_user, &reason)
        .await?;

    match outcome {
        SubmissionOutcome::Forwarded => Ok(StatusCode::OK.into_response()),
        SubmissionOutcome::AlreadyFullMember => Ok(Json(ViewSubmissionErrors::field(
            USER_BLOCK,
            "That user is already a full member of the workspace!",
        ))
        .into_response()),
    }
}

/// Pull the two required form fields out of the submitted view state.
fn submitted_fields(view: &SubmittedView) -> Result<(String, String), AppError> {
    let target_user = view
        .state
        .get(USER_BLOCK, USER_SELECT_ACTION)
        .and_then(|v| v.selected_user.clone())
        .ok_or_else(|| AppError::BadRequest("Missing target user selection".into()))?;

    let reason = view
        .state
        .get(REASON_BLOCK, REASON_INPUT_ACTION)
        .and_then(|v| v.value.clone())
        .ok_or_else(|| AppError::BadRequest("Missing reason text".into()))?;

    Ok((target_user, reason))
}

/// Handle an Approve or Deny click.
async fn handle_block_action(
    state: &AppState,
    payload: &InteractionPayload,
) -> Result<Response, AppError> {
    let action = payload
        .actions
        .first()
        .ok_or_else(|| AppError::BadRequest("No actions in payload".into()))?;

    let value = action
        .value
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("No value on action".into()))?;

    let ctx = RequestContext::decode(value)?;

    let channel = payload
        .channel
        .as_ref()
        .map(|c| c.id.as_str())
        .ok_or_else(|| AppError::BadRequest("No channel in payload".into()))?;

    let ts = payload
        .message
        .as_ref()
        .map(|m| m.ts.as_str())
        .ok_or_else(|| AppError::BadRequest("No message in payload".into()))?;

    let actor = payload.user.id.as_str();

    let result = match action.action_id.as_str() {
        APPROVE_ACTION => {
            info!(target = %ctx.target_user, approver = %actor, "Processing approval");
            state.workflow().handle_approve(&ctx, actor, channel, ts).await
        }
        DENY_ACTION => {
            info!(target = %ctx.target_user, denier = %actor, "Processing denial");
            state.workflow().handle_deny(&ctx, actor, channel, ts).await
        }
        other => {
            warn!(action_id = %other, "Unknown action type");
            return Err(AppError::BadRequest("Unknown action type".into()));
        }
    };

    // Always ack button clicks with 200 - failures were already surfaced
    // in the channel (or logged), and a non-200 only makes Slack show a
    // warning triangle on the message.
    if let Err(e) = result {
        error!(target = %ctx.target_user, error = %e, "Decision handling failed");
    }

    Ok(StatusCode::OK.into_response())
}
