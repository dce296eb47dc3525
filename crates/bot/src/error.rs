//! Unified error handling for the bot.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::slack::SlackError;
use crate::upgrade::UpgradeError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Slack Web API operation failed.
    #[error("Slack error: {0}")]
    Slack(#[from] SlackError),

    /// Upgrade execution failed.
    #[error("Upgrade error: {0}")]
    Upgrade(#[from] UpgradeError),

    /// Bad request from the platform.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Webhook signature did not verify.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            // A payload we could not decode is the caller's problem, not Slack's
            Self::Slack(SlackError::InvalidPayload(_)) => StatusCode::BAD_REQUEST,
            Self::Slack(_) | Self::Upgrade(_) => StatusCode::BAD_GATEWAY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        };

        // Report server-side failures to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Webhook handler error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Slack(SlackError::InvalidPayload(_)) => self.to_string(),
            Self::Slack(_) | Self::Upgrade(_) => "External service error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("missing payload".to_string());
        assert_eq!(err.to_string(), "Bad request: missing payload");

        let err = AppError::Unauthorized("signature mismatch".to_string());
        assert_eq!(err.to_string(), "Unauthorized: signature mismatch");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Slack(SlackError::Api("test".to_string()))),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_invalid_payload_is_a_client_error() {
        let err = AppError::Slack(SlackError::InvalidPayload("not json".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_details_not_exposed() {
        let response = AppError::Internal("privileged token leaked here".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
