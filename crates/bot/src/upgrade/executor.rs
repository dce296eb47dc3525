//! Upgrade executor.
//!
//! Owns the privileged tier change: re-checks eligibility, then calls the
//! membership-change endpoint. Both capabilities arrive by constructor so
//! nothing here reaches for ambient state.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::slack::SlackApi;

use super::admin::AdminApiClient;
use super::error::UpgradeError;

/// Capability to change a target account's membership tier.
#[async_trait]
pub trait TierUpgrader: Send + Sync {
    /// Upgrade the target to a full member.
    async fn upgrade(&self, target_user_id: &str) -> Result<(), UpgradeError>;
}

/// Performs the privileged account-tier change.
pub struct UpgradeExecutor {
    slack: Arc<dyn SlackApi>,
    admin: AdminApiClient,
}

impl UpgradeExecutor {
    /// Create a new executor from its two capabilities.
    #[must_use]
    pub fn new(slack: Arc<dyn SlackApi>, admin: AdminApiClient) -> Self {
        Self { slack, admin }
    }
}

#[async_trait]
impl TierUpgrader for UpgradeExecutor {
    /// Upgrade the target to a full member.
    ///
    /// Eligibility is fetched again here even though the submission
    /// handler already checked it: a button can sit unclicked for an
    /// arbitrary time, during which the target's tier may have changed.
    ///
    /// # Errors
    ///
    /// Returns [`UpgradeError::AlreadyUpgraded`] if the target is no
    /// longer a guest, [`UpgradeError::Rejected`] if the platform refuses
    /// the mutation, or a transport error.
    #[instrument(skip(self), fields(user = %target_user_id))]
    async fn upgrade(&self, target_user_id: &str) -> Result<(), UpgradeError> {
        let user = self.slack.user_info(target_user_id).await?;

        if user.is_full_member() {
            return Err(UpgradeError::AlreadyUpgraded);
        }

        self.admin.set_regular(target_user_id).await?;

        info!(user = %target_user_id, "Account upgraded to full member");

        Ok(())
    }
}
