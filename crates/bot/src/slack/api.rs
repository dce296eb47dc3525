//! Capability trait over the Slack Web API.
//!
//! The workflow and the upgrade executor depend on this trait rather than
//! on [`SlackClient`] directly, so they can be handed their platform
//! capability explicitly and exercised against a test double.

use async_trait::async_trait;

use super::client::SlackClient;
use super::error::SlackError;
use super::types::{Block, PostMessageResponse, UserInfo, View};

/// The subset of the Slack Web API the bot calls.
#[async_trait]
pub trait SlackApi: Send + Sync {
    /// Post a message to a channel or a user's DM.
    async fn post_message(
        &self,
        channel: &str,
        blocks: Vec<Block>,
        fallback_text: Option<&str>,
    ) -> Result<PostMessageResponse, SlackError>;

    /// Post a simple text message.
    async fn post_text(&self, channel: &str, text: &str) -> Result<PostMessageResponse, SlackError>;

    /// Update an existing message in place.
    async fn update_message(
        &self,
        channel: &str,
        ts: &str,
        blocks: Vec<Block>,
        fallback_text: Option<&str>,
    ) -> Result<(), SlackError>;

    /// Open a modal view.
    async fn open_view(&self, trigger_id: &str, view: View) -> Result<(), SlackError>;

    /// Fetch a user record, including restriction flags.
    async fn user_info(&self, user_id: &str) -> Result<UserInfo, SlackError>;
}

#[async_trait]
impl SlackApi for SlackClient {
    async fn post_message(
        &self,
        channel: &str,
        blocks: Vec<Block>,
        fallback_text: Option<&str>,
    ) -> Result<PostMessageResponse, SlackError> {
        SlackClient::post_message(self, channel, blocks, fallback_text).await
    }

    async fn post_text(&self, channel: &str, text: &str) -> Result<PostMessageResponse, SlackError> {
        SlackClient::post_text(self, channel, text).await
    }

    async fn update_message(
        &self,
        channel: &str,
        ts: &str,
        blocks: Vec<Block>,
        fallback_text: Option<&str>,
    ) -> Result<(), SlackError> {
        SlackClient::update_message(self, channel, ts, blocks, fallback_text).await?;
        Ok(())
    }

    async fn open_view(&self, trigger_id: &str, view: View) -> Result<(), SlackError> {
        SlackClient::open_view(self, trigger_id, view).await
    }

    async fn user_info(&self, user_id: &str) -> Result<UserInfo, SlackError> {
        SlackClient::user_info(self, user_id).await
    }
}
