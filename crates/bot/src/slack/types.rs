//! Slack Block Kit and payload types.
//!
//! A subset of the Block Kit specification plus the modal view and
//! callback payload shapes this bot needs.
//!
//! See: <https://api.slack.com/block-kit>

use serde::{Deserialize, Serialize};

/// A Slack message with blocks.
#[derive(Debug, Clone, Serialize)]
pub struct SlackMessage {
    /// Channel ID to post to.
    pub channel: String,
    /// Message blocks.
    pub blocks: Vec<Block>,
    /// Optional plain text fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Block Kit block types.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Header block with large text.
    Header { text: PlainText },
    /// Section block with text.
    Section { text: Text },
    /// Context block with small muted text.
    Context { elements: Vec<ContextElement> },
    /// Actions block with interactive elements.
    Actions {
        block_id: String,
        elements: Vec<ActionElement>,
    },
    /// Input block (modal form field).
    Input {
        block_id: String,
        label: PlainText,
        element: InputElement,
    },
    /// Divider block (horizontal line).
    Divider,
}

/// Text object types.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Text {
    /// Plain text (no formatting).
    PlainText { text: String, emoji: bool },
    /// Markdown text (supports formatting).
    Mrkdwn { text: String },
}

impl Text {
    /// Create a plain text object.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText {
            text: text.into(),
            emoji: true,
        }
    }

    /// Create a markdown text object.
    #[must_use]
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }
}

/// Plain text object (for headers, labels, and titles).
#[derive(Debug, Clone, Serialize)]
pub struct PlainText {
    #[serde(rename = "type")]
    pub text_type: &'static str,
    pub text: String,
    pub emoji: bool,
}

impl PlainText {
    /// Create a new plain text object.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text_type: "plain_text",
            text: text.into(),
            emoji: true,
        }
    }
}

/// Context block elements.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContextElement {
    /// Markdown text in context.
    Mrkdwn { text: String },
    /// Plain text in context.
    PlainText { text: String, emoji: bool },
}

/// Action block elements.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionElement {
    /// Interactive button.
    Button {
        text: PlainText,
        action_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<ButtonStyle>,
    },
}

/// Input block elements (modal form fields).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputElement {
    /// Single-user picker.
    UsersSelect {
        action_id: String,
        placeholder: PlainText,
    },
    /// Free-text input.
    PlainTextInput {
        action_id: String,
        multiline: bool,
        placeholder: PlainText,
    },
}

/// Button style (affects color).
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    /// Green primary button.
    Primary,
    /// Red danger button.
    Danger,
}

/// A modal view for `views.open`.
#[derive(Debug, Clone, Serialize)]
pub struct View {
    #[serde(rename = "type")]
    pub view_type: &'static str,
    pub callback_id: String,
    pub title: PlainText,
    pub submit: PlainText,
    pub close: PlainText,
    /// Opaque state round-tripped through the modal, returned verbatim
    /// on submission.
    pub private_metadata: String,
    pub blocks: Vec<Block>,
}

// =============================================================================
// Response Types
// =============================================================================

/// Response from posting a message.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageResponse {
    /// Whether the request was successful.
    pub ok: bool,
    /// Channel ID where message was posted.
    #[serde(default)]
    pub channel: Option<String>,
    /// Message timestamp (unique ID).
    #[serde(default)]
    pub ts: Option<String>,
    /// Error message if not ok.
    #[serde(default)]
    pub error: Option<String>,
}

/// Response from updating a message.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMessageResponse {
    /// Whether the request was successful.
    pub ok: bool,
    /// Channel ID.
    #[serde(default)]
    pub channel: Option<String>,
    /// Updated message timestamp.
    #[serde(default)]
    pub ts: Option<String>,
    /// Error message if not ok.
    #[serde(default)]
    pub error: Option<String>,
}

/// Response from `views.open`.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenViewResponse {
    /// Whether the request was successful.
    pub ok: bool,
    /// Error message if not ok.
    #[serde(default)]
    pub error: Option<String>,
}

/// Response from `users.info`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfoResponse {
    /// Whether the request was successful.
    pub ok: bool,
    /// The user record.
    #[serde(default)]
    pub user: Option<UserInfo>,
    /// Error message if not ok.
    #[serde(default)]
    pub error: Option<String>,
}

/// A user record with account-tier restriction flags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserInfo {
    /// Slack user ID.
    pub id: String,
    /// Multi-channel guest flag.
    #[serde(default)]
    pub is_restricted: bool,
    /// Single-channel guest flag.
    #[serde(default)]
    pub is_ultra_restricted: bool,
}

impl UserInfo {
    /// Whether the account is a full (non-guest) member.
    #[must_use]
    pub const fn is_full_member(&self) -> bool {
        !self.is_restricted && !self.is_ultra_restricted
    }
}

// =============================================================================
// Inbound Payload Types
// =============================================================================

/// Slack interaction payload delivered to the interactivity endpoint.
///
/// Covers both `block_actions` (button clicks) and `view_submission`
/// (modal submits); fields absent for a given type default to `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionPayload {
    /// Type of interaction (`block_actions` or `view_submission`).
    #[serde(rename = "type")]
    pub interaction_type: String,
    /// User who triggered the interaction.
    pub user: InteractionUser,
    /// Channel where interaction occurred (block actions only).
    #[serde(default)]
    pub channel: Option<InteractionChannel>,
    /// Source message (block actions only).
    #[serde(default)]
    pub message: Option<InteractionMessage>,
    /// Actions that were triggered (block actions only).
    #[serde(default)]
    pub actions: Vec<InteractionAction>,
    /// Submitted view (view submissions only).
    #[serde(default)]
    pub view: Option<SubmittedView>,
    /// Trigger ID for opening modals.
    #[serde(default)]
    pub trigger_id: Option<String>,
}

/// User who triggered an interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionUser {
    /// Slack user ID.
    pub id: String,
    /// Username.
    #[serde(default)]
    pub username: Option<String>,
}

/// Channel where interaction occurred.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionChannel {
    /// Channel ID.
    pub id: String,
    /// Channel name.
    #[serde(default)]
    pub name: Option<String>,
}

/// The message a block action originated from.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionMessage {
    /// Message timestamp (needed for `chat.update`).
    pub ts: String,
}

/// Action that was triggered.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionAction {
    /// Action ID (set when creating the button).
    pub action_id: String,
    /// Block ID containing this action.
    #[serde(default)]
    pub block_id: Option<String>,
    /// Value attached to the action.
    #[serde(default)]
    pub value: Option<String>,
}

/// A submitted modal view.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedView {
    /// Callback ID the view was opened with.
    pub callback_id: String,
    /// Opaque metadata round-tripped from `views.open`.
    #[serde(default)]
    pub private_metadata: String,
    /// Submitted field state.
    pub state: ViewState,
}

/// Submitted state of a modal's input blocks.
///
/// Keyed by block ID, then action ID.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewState {
    pub values: std::collections::HashMap<String, std::collections::HashMap<String, ViewStateValue>>,
}

impl ViewState {
    /// Look up a submitted value by block and action ID.
    #[must_use]
    pub fn get(&self, block_id: &str, action_id: &str) -> Option<&ViewStateValue> {
        self.values.get(block_id).and_then(|b| b.get(action_id))
    }
}

/// A single submitted input value.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewStateValue {
    /// Element type (`users_select`, `plain_text_input`, ...).
    #[serde(rename = "type")]
    pub value_type: String,
    /// Selected user (users_select).
    #[serde(default)]
    pub selected_user: Option<String>,
    /// Entered text (plain_text_input).
    #[serde(default)]
    pub value: Option<String>,
}

/// Synchronous response to a view submission that re-opens the form
/// with field-level errors.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSubmissionErrors {
    pub response_action: &'static str,
    pub errors: std::collections::HashMap<String, String>,
}

impl ViewSubmissionErrors {
    /// Build an `errors` response for a single field.
    #[must_use]
    pub fn field(block_id: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = std::collections::HashMap::new();
        errors.insert(block_id.into(), message.into());
        Self {
            response_action: "errors",
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_info_full_member() {
        let full = UserInfo {
            id: "U1".to_string(),
            is_restricted: false,
            is_ultra_restricted: false,
        };
        assert!(full.is_full_member());

        let mcg = UserInfo {
            is_restricted: true,
            ..full.clone()
        };
        assert!(!mcg.is_full_member());

        let scg = UserInfo {
            is_ultra_restricted: true,
            ..full
        };
        assert!(!scg.is_full_member());
    }

    #[test]
    fn test_block_actions_payload_parses() {
        let payload = json!({
            "type": "block_actions",
            "user": { "id": "U_APPROVER", "username": "reviewer" },
            "channel": { "id": "C_APPROVALS", "name": "upgrade-approvals" },
            "message": { "ts": "1724800000.000100" },
            "actions": [{
                "action_id": "approve_upgrade",
                "block_id": "approval_actions",
                "value": "{\"target_user\":\"U_GUEST\",\"requester\":\"U_REQ\",\"reason\":\"works here now\"}"
            }]
        });

        let parsed: InteractionPayload =
            serde_json::from_value(payload).expect("payload should parse");
        assert_eq!(parsed.interaction_type, "block_actions");
        assert_eq!(parsed.user.id, "U_APPROVER");
        assert_eq!(parsed.actions.len(), 1);
        assert!(parsed.view.is_none());
    }

    #[test]
    fn test_view_submission_payload_parses() {
        let payload = json!({
            "type": "view_submission",
            "user": { "id": "U_REQ" },
            "view": {
                "callback_id": "upgrade_request",
                "private_metadata": "{\"requester\":\"U_REQ\"}",
                "state": {
                    "values": {
                        "user_block": {
                            "user_select": { "type": "users_select", "selected_user": "U_GUEST" }
                        },
                        "reason_block": {
                            "reason_input": { "type": "plain_text_input", "value": "joined the team" }
                        }
                    }
                }
            }
        });

        let parsed: InteractionPayload =
            serde_json::from_value(payload).expect("payload should parse");
        let view = parsed.view.expect("view present");
        assert_eq!(view.callback_id, "upgrade_request");
        assert_eq!(
            view.state
                .get("user_block", "user_select")
                .and_then(|v| v.selected_user.as_deref()),
            Some("U_GUEST")
        );
        assert_eq!(
            view.state
                .get("reason_block", "reason_input")
                .and_then(|v| v.value.as_deref()),
            Some("joined the team")
        );
    }

    #[test]
    fn test_view_submission_errors_shape() {
        let errors = ViewSubmissionErrors::field("user_block", "already a full member");
        let json = serde_json::to_value(&errors).expect("serializes");
        assert_eq!(json["response_action"], "errors");
        assert_eq!(json["errors"]["user_block"], "already a full member");
    }
}
