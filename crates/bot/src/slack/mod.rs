//! Slack platform adapter.
//!
//! This module provides:
//! - [`SlackClient`] for the Web API calls the bot makes
//! - [`SlackApi`], the capability trait the workflow is handed
//! - Block Kit types for messages and the intake modal
//! - Message builders for the request/approve/deny flow
//! - Webhook signature verification
//!
//! # Flow
//!
//! 1. A slash command opens the intake modal
//! 2. Submission posts the request to the approval channel
//! 3. A reviewer clicks Approve or Deny
//! 4. The original message is replaced with the outcome

mod api;
mod client;
mod error;
pub mod messages;
mod types;

pub use api::SlackApi;
pub use client::SlackClient;
pub use error::SlackError;
pub use types::{
    ActionElement, Block, ButtonStyle, ContextElement, InputElement, InteractionAction,
    InteractionChannel, InteractionMessage, InteractionPayload, InteractionUser, PlainText,
    PostMessageResponse, SlackMessage, SubmittedView, Text, UpdateMessageResponse, UserInfo,
    UserInfoResponse, View, ViewState, ViewStateValue, ViewSubmissionErrors,
};
