//! Opaque payloads round-tripped through Slack UI elements.
//!
//! No state is stored server-side: the requester rides in the modal's
//! `private_metadata`, and the full request rides in the value of both
//! decision buttons. Every inbound callback decodes and validates these
//! rather than trusting raw strings.

use serde::{Deserialize, Serialize};

use crate::slack::SlackError;

/// Metadata attached to the intake modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalMetadata {
    /// User who invoked the slash command.
    pub requester: String,
}

/// The full upgrade request, carried in both decision-button values.
///
/// The reason travels with the payload so every terminal message can
/// render it without any server-side lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// User to be upgraded.
    pub target_user: String,
    /// User who asked for the upgrade.
    pub requester: String,
    /// Free-text justification from the intake form.
    pub reason: String,
}

impl ModalMetadata {
    /// Serialize for `private_metadata`.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::InvalidPayload`] if serialization fails.
    pub fn encode(&self) -> Result<String, SlackError> {
        serde_json::to_string(self).map_err(|e| SlackError::InvalidPayload(e.to_string()))
    }

    /// Decode from `private_metadata` returned on submission.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::InvalidPayload`] if the metadata is not the
    /// shape this bot attached.
    pub fn decode(raw: &str) -> Result<Self, SlackError> {
        serde_json::from_str(raw).map_err(|e| SlackError::InvalidPayload(e.to_string()))
    }
}

impl RequestContext {
    /// Serialize for a button value.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::InvalidPayload`] if serialization fails.
    pub fn encode(&self) -> Result<String, SlackError> {
        serde_json::to_string(self).map_err(|e| SlackError::InvalidPayload(e.to_string()))
    }

    /// Decode from a clicked button's value.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::InvalidPayload`] if the value is not a
    /// request context.
    pub fn decode(raw: &str) -> Result<Self, SlackError> {
        serde_json::from_str(raw).map_err(|e| SlackError::InvalidPayload(e.to_string()))
    }
}

/// Lifecycle of an upgrade request.
///
/// `Pending` exists only between submission and the first decisive
/// click; the three outcome states are terminal. Nothing persists the
/// state itself - it is implied by which message is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionState {
    /// Posted to the approval channel, buttons live.
    Pending,
    /// Approved and the upgrade applied.
    Approved,
    /// Denied by a reviewer.
    Denied,
    /// Approval attempted but the target was no longer eligible.
    Failed,
}

impl DecisionState {
    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}
