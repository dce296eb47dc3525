//! Slack message builders for the upgrade request flow.
//!
//! Provides factory functions for building:
//! - The intake modal (user picker + reason)
//! - The approval-channel request message with Approve/Deny buttons
//! - The approved/denied/failed replacement messages
//! - The DM notification texts

use super::types::{
    ActionElement, Block, ButtonStyle, ContextElement, InputElement, PlainText, Text, View,
};

/// Callback ID the intake modal is opened with.
pub const UPGRADE_REQUEST_CALLBACK: &str = "upgrade_request";

/// Action ID of the Approve button.
pub const APPROVE_ACTION: &str = "approve_upgrade";
/// Action ID of the Deny button.
pub const DENY_ACTION: &str = "deny_upgrade";

/// Block ID of the target-user picker in the intake modal.
pub const USER_BLOCK: &str = "user_block";
/// Action ID of the target-user picker.
pub const USER_SELECT_ACTION: &str = "user_select";
/// Block ID of the reason field in the intake modal.
pub const REASON_BLOCK: &str = "reason_block";
/// Action ID of the reason field.
pub const REASON_INPUT_ACTION: &str = "reason_input";

/// Build the intake modal.
///
/// `metadata` is the serialized requester context, round-tripped through
/// the modal's `private_metadata` and recovered on submission.
#[must_use]
pub fn build_upgrade_modal(metadata: String) -> View {
    View {
        view_type: "modal",
        callback_id: UPGRADE_REQUEST_CALLBACK.to_string(),
        title: PlainText::new("Request Upgrade"),
        submit: PlainText::new("Submit"),
        close: PlainText::new("Cancel"),
        private_metadata: metadata,
        blocks: vec![
            Block::Input {
                block_id: USER_BLOCK.to_string(),
                label: PlainText::new("User to upgrade"),
                element: InputElement::UsersSelect {
                    action_id: USER_SELECT_ACTION.to_string(),
                    placeholder: PlainText::new("Select a user"),
                },
            },
            Block::Input {
                block_id: REASON_BLOCK.to_string(),
                label: PlainText::new("Reason for upgrade"),
                element: InputElement::PlainTextInput {
                    action_id: REASON_INPUT_ACTION.to_string(),
                    multiline: true,
                    placeholder: PlainText::new(
                        "Why does this user need to be upgraded? If they asked somewhere, link their message.",
                    ),
                },
            },
        ],
    }
}

/// Build the approval-channel request message.
///
/// `payload_value` is the serialized request context; both buttons carry
/// it verbatim so the decision handlers can recover the full request.
#[must_use]
pub fn build_request_message(
    target: &str,
    requester: &str,
    reason: &str,
    payload_value: &str,
) -> Vec<Block> {
    vec![
        Block::Header {
            text: PlainText::new("Upgrade request"),
        },
        Block::Section {
            text: Text::mrkdwn(format!(
                "*Requested by:* <@{requester}>\n*User to upgrade:* <@{target}>\n*Reason:* {reason}"
            )),
        },
        Block::Divider,
        Block::Actions {
            block_id: "approval_actions".to_string(),
            elements: vec![
                ActionElement::Button {
                    text: PlainText::new("Approve"),
                    action_id: APPROVE_ACTION.to_string(),
                    value: Some(payload_value.to_string()),
                    style: Some(ButtonStyle::Primary),
                },
                ActionElement::Button {
                    text: PlainText::new("Deny"),
                    action_id: DENY_ACTION.to_string(),
                    value: Some(payload_value.to_string()),
                    style: Some(ButtonStyle::Danger),
                },
            ],
        },
    ]
}

/// Build the approved replacement message (buttons removed).
#[must_use]
pub fn build_approved_message(
    target: &str,
    requester: &str,
    reason: &str,
    approver: &str,
) -> Vec<Block> {
    vec![
        Block::Header {
            text: PlainText::new("✅ Upgrade approved"),
        },
        Block::Section {
            text: Text::mrkdwn(format!(
                "*Requested by:* <@{requester}>\n*User upgraded:* <@{target}>\n*Reason:* {reason}"
            )),
        },
        Block::Context {
            elements: vec![ContextElement::Mrkdwn {
                text: format!("Approved by <@{approver}>"),
            }],
        },
    ]
}

/// Build the denied replacement message (buttons removed).
#[must_use]
pub fn build_denied_message(
    target: &str,
    requester: &str,
    reason: &str,
    denier: &str,
) -> Vec<Block> {
    vec![
        Block::Header {
            text: PlainText::new("❌ Upgrade denied"),
        },
        Block::Section {
            text: Text::mrkdwn(format!(
                "*Requested by:* <@{requester}>\n*User:* <@{target}>\n*Reason:* {reason}"
            )),
        },
        Block::Context {
            elements: vec![ContextElement::Mrkdwn {
                text: format!("Denied by <@{denier}>"),
            }],
        },
    ]
}

/// Build the failed replacement message for an approval that found the
/// target already upgraded.
#[must_use]
pub fn build_failed_message(
    target: &str,
    requester: &str,
    reason: &str,
    approver: &str,
) -> Vec<Block> {
    vec![
        Block::Header {
            text: PlainText::new("❌ Upgrade failed"),
        },
        Block::Section {
            text: Text::mrkdwn(format!(
                "*Requested by:* <@{requester}>\n*User:* <@{target}>\n*Reason:* {reason}"
            )),
        },
        Block::Section {
            text: Text::mrkdwn("_User is already a full member of the workspace._".to_string()),
        },
        Block::Context {
            elements: vec![ContextElement::Mrkdwn {
                text: format!("Approved by <@{approver}>"),
            }],
        },
    ]
}

/// DM text sent to the requester after a successful upgrade.
#[must_use]
pub fn requester_notification(target: &str, approver: &str) -> String {
    format!("Your upgrade request for <@{target}> has been approved by <@{approver}>!")
}

/// DM text sent to the upgraded user.
#[must_use]
pub fn target_notification(approver: &str) -> String {
    format!("You've been upgraded to a full member of the workspace by <@{approver}>!")
}
