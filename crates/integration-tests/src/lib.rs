//! Test doubles for exercising the upgrade workflow.
//!
//! The workflow takes its Slack and upgrade capabilities as trait
//! objects; these mocks record every call so tests can assert exact
//! call counts and ordering without touching the network.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use upgrade_bot::slack::{Block, PostMessageResponse, SlackApi, SlackError, UserInfo, View};
use upgrade_bot::upgrade::{TierUpgrader, UpgradeError};

/// One recorded Slack API call.
#[derive(Debug, Clone)]
pub enum SlackCall {
    PostMessage {
        channel: String,
        blocks: serde_json::Value,
        fallback: Option<String>,
    },
    PostText {
        channel: String,
        text: String,
    },
    UpdateMessage {
        channel: String,
        ts: String,
        blocks: serde_json::Value,
    },
    OpenView {
        trigger_id: String,
        callback_id: String,
        private_metadata: String,
    },
    UserInfo {
        user: String,
    },
}

impl SlackCall {
    /// Short tag for order assertions.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PostMessage { .. } => "post_message",
            Self::PostText { .. } => "post_text",
            Self::UpdateMessage { .. } => "update_message",
            Self::OpenView { .. } => "open_view",
            Self::UserInfo { .. } => "user_info",
        }
    }
}

/// Recording Slack capability.
///
/// Users unknown to the mock come back as full members, matching
/// Slack's default for accounts with no guest flags.
#[derive(Default)]
pub struct MockSlack {
    calls: Mutex<Vec<SlackCall>>,
    guests: Mutex<HashMap<String, UserInfo>>,
    failing_dm_channels: Mutex<HashSet<String>>,
}

impl MockSlack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user as a restricted (multi-channel) guest.
    pub fn add_guest(&self, user_id: &str) {
        self.guests.lock().expect("mock lock").insert(
            user_id.to_string(),
            UserInfo {
                id: user_id.to_string(),
                is_restricted: true,
                is_ultra_restricted: false,
            },
        );
    }

    /// Make `post_text` to the given channel/user fail.
    pub fn fail_dm_to(&self, channel: &str) {
        self.failing_dm_channels
            .lock()
            .expect("mock lock")
            .insert(channel.to_string());
    }

    /// Snapshot of all recorded calls.
    #[must_use]
    pub fn calls(&self) -> Vec<SlackCall> {
        self.calls.lock().expect("mock lock").clone()
    }

    /// Recorded call kinds, in order.
    #[must_use]
    pub fn call_kinds(&self) -> Vec<&'static str> {
        self.calls().iter().map(SlackCall::kind).collect()
    }

    /// Count of recorded calls of one kind.
    #[must_use]
    pub fn count(&self, kind: &str) -> usize {
        self.call_kinds().iter().filter(|&&k| k == kind).count()
    }

    fn record(&self, call: SlackCall) {
        self.calls.lock().expect("mock lock").push(call);
    }
}

#[async_trait]
impl SlackApi for MockSlack {
    async fn post_message(
        &self,
        channel: &str,
        blocks: Vec<Block>,
        fallback_text: Option<&str>,
    ) -> Result<PostMessageResponse, SlackError> {
        self.record(SlackCall::PostMessage {
            channel: channel.to_string(),
            blocks: serde_json::to_value(&blocks).expect("blocks serialize"),
            fallback: fallback_text.map(String::from),
        });

        Ok(PostMessageResponse {
            ok: true,
            channel: Some(channel.to_string()),
            ts: Some("1724800000.000100".to_string()),
            error: None,
        })
    }

    async fn post_text(
        &self,
        channel: &str,
        text: &str,
    ) -> Result<PostMessageResponse, SlackError> {
        if self
            .failing_dm_channels
            .lock()
            .expect("mock lock")
            .contains(channel)
        {
            return Err(SlackError::Api("channel_not_found".to_string()));
        }

        self.record(SlackCall::PostText {
            channel: channel.to_string(),
            text: text.to_string(),
        });

        Ok(PostMessageResponse {
            ok: true,
            channel: Some(channel.to_string()),
            ts: Some("1724800000.000200".to_string()),
            error: None,
        })
    }

    async fn update_message(
        &self,
        channel: &str,
        ts: &str,
        blocks: Vec<Block>,
        _fallback_text: Option<&str>,
    ) -> Result<(), SlackError> {
        self.record(SlackCall::UpdateMessage {
            channel: channel.to_string(),
            ts: ts.to_string(),
            blocks: serde_json::to_value(&blocks).expect("blocks serialize"),
        });
        Ok(())
    }

    async fn open_view(&self, trigger_id: &str, view: View) -> Result<(), SlackError> {
        self.record(SlackCall::OpenView {
            trigger_id: trigger_id.to_string(),
            callback_id: view.callback_id.clone(),
            private_metadata: view.private_metadata.clone(),
        });
        Ok(())
    }

    async fn user_info(&self, user_id: &str) -> Result<UserInfo, SlackError> {
        self.record(SlackCall::UserInfo {
            user: user_id.to_string(),
        });

        Ok(self
            .guests
            .lock()
            .expect("mock lock")
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| UserInfo {
                id: user_id.to_string(),
                ..UserInfo::default()
            }))
    }
}

/// Scripted behavior for [`MockUpgrader`].
#[derive(Debug, Clone)]
pub enum UpgradeBehavior {
    Succeed,
    AlreadyUpgraded,
    Reject(String),
}

/// Recording upgrade capability.
pub struct MockUpgrader {
    behavior: UpgradeBehavior,
    calls: Mutex<Vec<String>>,
}

impl MockUpgrader {
    #[must_use]
    pub const fn new(behavior: UpgradeBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Target user IDs of all recorded upgrade calls.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("mock lock").clone()
    }
}

#[async_trait]
impl TierUpgrader for MockUpgrader {
    async fn upgrade(&self, target_user_id: &str) -> Result<(), UpgradeError> {
        self.calls
            .lock()
            .expect("mock lock")
            .push(target_user_id.to_string());

        match &self.behavior {
            UpgradeBehavior::Succeed => Ok(()),
            UpgradeBehavior::AlreadyUpgraded => Err(UpgradeError::AlreadyUpgraded),
            UpgradeBehavior::Reject(reason) => Err(UpgradeError::Rejected(reason.clone())),
        }
    }
}
