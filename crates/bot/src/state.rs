//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::BotConfig;
use crate::slack::SlackClient;
use crate::upgrade::{AdminApiClient, UpgradeExecutor};
use crate::workflow::UpgradeWorkflow;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BotConfig,
    slack: SlackClient,
    workflow: UpgradeWorkflow,
}

impl AppState {
    /// Wire up the client, executor, and workflow from configuration.
    #[must_use]
    pub fn new(config: BotConfig) -> Self {
        let slack = SlackClient::new(
            config.slack.bot_token.clone(),
            config.slack.signing_secret.clone(),
        );

        let slack_api = Arc::new(slack.clone());
        let executor = UpgradeExecutor::new(
            slack_api.clone(),
            AdminApiClient::new(config.admin.clone()),
        );
        let workflow = UpgradeWorkflow::new(
            slack_api,
            Arc::new(executor),
            config.slack.approval_channel.clone(),
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                slack,
                workflow,
            }),
        }
    }

    /// Bot configuration.
    #[must_use]
    pub fn config(&self) -> &BotConfig {
        &self.inner.config
    }

    /// The Slack client (used directly for signature verification).
    #[must_use]
    pub fn slack(&self) -> &SlackClient {
        &self.inner.slack
    }

    /// The request workflow controller.
    #[must_use]
    pub fn workflow(&self) -> &UpgradeWorkflow {
        &self.inner.workflow
    }
}
