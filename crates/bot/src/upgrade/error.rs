//! Upgrade error taxonomy.

use thiserror::Error;

use crate::slack::SlackError;

/// Errors that can occur while applying an upgrade.
#[derive(Debug, Error)]
pub enum UpgradeError {
    /// The target became a full member between request and approval.
    /// Non-retryable; surfaced inline on the request message.
    #[error("user is already a full member")]
    AlreadyUpgraded,

    /// The membership-change endpoint reported a failure.
    #[error("upgrade rejected by the platform: {0}")]
    Rejected(String),

    /// The eligibility re-check against the Web API failed.
    #[error(transparent)]
    Slack(#[from] SlackError),

    /// The privileged HTTP call itself failed.
    #[error("admin endpoint request failed: {0}")]
    Request(String),

    /// The privileged endpoint returned an unparseable response.
    #[error("admin endpoint response error: {0}")]
    Response(String),
}
