//! Request workflow controller.
//!
//! Orchestrates the three interaction steps:
//! 1. Slash command opens the intake modal
//! 2. Submission is validated and forwarded to the approval channel
//! 3. A reviewer's click applies the decision and replaces the message

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::error::AppError;
use crate::slack::{SlackApi, messages};
use crate::upgrade::{TierUpgrader, UpgradeError};

use super::context::{DecisionState, ModalMetadata, RequestContext};

/// Outcome of a form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Request accepted and posted to the approval channel.
    Forwarded,
    /// Target is already a full member; nothing was posted. The modal
    /// stays open with a field-level error.
    AlreadyFullMember,
}

/// The request workflow controller.
///
/// Holds its platform capability and its upgrade capability by
/// injection; all request state travels inside Slack payloads.
pub struct UpgradeWorkflow {
    slack: Arc<dyn SlackApi>,
    upgrader: Arc<dyn TierUpgrader>,
    approval_channel: String,
}

impl UpgradeWorkflow {
    /// Create a new workflow controller.
    #[must_use]
    pub fn new(
        slack: Arc<dyn SlackApi>,
        upgrader: Arc<dyn TierUpgrader>,
        approval_channel: String,
    ) -> Self {
        Self {
            slack,
            upgrader,
            approval_channel,
        }
    }

    /// Open the intake modal for a slash-command invocation.
    ///
    /// The invoking user rides in the modal's `private_metadata` so the
    /// submission handler can recover the requester without a session.
    ///
    /// # Errors
    ///
    /// Returns error if `views.open` fails.
    #[instrument(skip(self, trigger_id), fields(requester = %requester))]
    pub async fn open_request_modal(
        &self,
        trigger_id: &str,
        requester: &str,
    ) -> Result<(), AppError> {
        let metadata = ModalMetadata {
            requester: requester.to_string(),
        }
        .encode()?;

        self.slack
            .open_view(trigger_id, messages::build_upgrade_modal(metadata))
            .await?;

        Ok(())
    }

    /// Validate a submitted request and forward it to the approval channel.
    ///
    /// Exactly one approval-channel message is posted per accepted
    /// submission; a rejected submission posts nothing.
    ///
    /// # Errors
    ///
    /// Returns error if the eligibility lookup or the channel post fails.
    #[instrument(skip(self, reason), fields(target = %target_user, requester = %metadata.requester))]
    pub async fn handle_submission(
        &self,
        metadata: &ModalMetadata,
        target_user: &str,
        reason: &str,
    ) -> Result<SubmissionOutcome, AppError> {
        let target = self.slack.user_info(target_user).await?;

        if target.is_full_member() {
            info!(target = %target_user, "Submission rejected: target already a full member");
            return Ok(SubmissionOutcome::AlreadyFullMember);
        }

        let ctx = RequestContext {
            target_user: target_user.to_string(),
            requester: metadata.requester.clone(),
            reason: reason.to_string(),
        };
        let payload = ctx.encode()?;

        self.slack
            .post_message(
                &self.approval_channel,
                messages::build_request_message(
                    &ctx.target_user,
                    &ctx.requester,
                    &ctx.reason,
                    &payload,
                ),
                Some(&format!("Upgrade request for <@{}>", ctx.target_user)),
            )
            .await?;

        info!(target = %ctx.target_user, "Upgrade request forwarded to approval channel");

        Ok(SubmissionOutcome::Forwarded)
    }

    /// Apply an approval click.
    ///
    /// On success the request message is replaced first, then the
    /// requester and the target are notified, in that order. Notification
    /// failures are logged and never roll back the approval.
    ///
    /// # Errors
    ///
    /// Returns error if a message edit or the error report fails.
    #[instrument(skip(self, ctx), fields(target = %ctx.target_user, approver = %approver))]
    pub async fn handle_approve(
        &self,
        ctx: &RequestContext,
        approver: &str,
        channel: &str,
        ts: &str,
    ) -> Result<DecisionState, AppError> {
        match self.upgrader.upgrade(&ctx.target_user).await {
            Ok(()) => {}
            Err(UpgradeError::AlreadyUpgraded) => {
                // Stale button: the target became a full member after the
                // request was posted. Replace the message, send nothing.
                self.slack
                    .update_message(
                        channel,
                        ts,
                        messages::build_failed_message(
                            &ctx.target_user,
                            &ctx.requester,
                            &ctx.reason,
                            approver,
                        ),
                        Some(&format!("Upgrade request for <@{}> - failed", ctx.target_user)),
                    )
                    .await?;

                warn!(target = %ctx.target_user, "Approval raced a prior upgrade");
                return Ok(DecisionState::Failed);
            }
            Err(e) => {
                // Report in a fresh message and leave the original (and its
                // buttons) untouched so a reviewer can try again.
                error!(target = %ctx.target_user, error = %e, "Upgrade failed");
                self.slack
                    .post_text(
                        channel,
                        &format!("Failed to upgrade <@{}>: {e}", ctx.target_user),
                    )
                    .await?;
                return Ok(DecisionState::Pending);
            }
        }

        self.slack
            .update_message(
                channel,
                ts,
                messages::build_approved_message(
                    &ctx.target_user,
                    &ctx.requester,
                    &ctx.reason,
                    approver,
                ),
                Some(&format!("Upgrade request for <@{}> - approved", ctx.target_user)),
            )
            .await?;

        // Approval is final once the edit lands; notify best-effort.
        if let Err(e) = self
            .slack
            .post_text(
                &ctx.requester,
                &messages::requester_notification(&ctx.target_user, approver),
            )
            .await
        {
            error!(requester = %ctx.requester, error = %e, "Failed to notify requester");
        }

        if let Err(e) = self
            .slack
            .post_text(&ctx.target_user, &messages::target_notification(approver))
            .await
        {
            error!(target = %ctx.target_user, error = %e, "Failed to notify upgraded user");
        }

        info!(target = %ctx.target_user, approver = %approver, "Upgrade request approved");

        Ok(DecisionState::Approved)
    }

    /// Apply a denial click.
    ///
    /// Replaces the request message; the executor is never invoked.
    ///
    /// # Errors
    ///
    /// Returns error if the message edit fails.
    #[instrument(skip(self, ctx), fields(target = %ctx.target_user, denier = %denier))]
    pub async fn handle_deny(
        &self,
        ctx: &RequestContext,
        denier: &str,
        channel: &str,
        ts: &str,
    ) -> Result<DecisionState, AppError> {
        self.slack
            .update_message(
                channel,
                ts,
                messages::build_denied_message(
                    &ctx.target_user,
                    &ctx.requester,
                    &ctx.reason,
                    denier,
                ),
                Some(&format!("Upgrade request for <@{}> - denied", ctx.target_user)),
            )
            .await?;

        info!(target = %ctx.target_user, denier = %denier, "Upgrade request denied");

        Ok(DecisionState::Denied)
    }
}
