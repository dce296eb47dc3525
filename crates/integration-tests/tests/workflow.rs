//! Behavioral tests for the request/approve/deny workflow.
//!
//! Each test drives [`UpgradeWorkflow`] through mock capabilities and
//! asserts exact call counts and ordering.

use std::sync::Arc;

use upgrade_bot::workflow::{
    DecisionState, ModalMetadata, RequestContext, SubmissionOutcome, UpgradeWorkflow,
};
use upgrade_bot_integration_tests::{MockSlack, MockUpgrader, SlackCall, UpgradeBehavior};

const APPROVAL_CHANNEL: &str = "C_APPROVALS";
const REQUESTER: &str = "U_REQ";
const TARGET: &str = "U_GUEST";
const REVIEWER: &str = "U_REVIEWER";
const MESSAGE_TS: &str = "1724800000.000100";

fn make_workflow(
    slack: &Arc<MockSlack>,
    behavior: UpgradeBehavior,
) -> (UpgradeWorkflow, Arc<MockUpgrader>) {
    let upgrader = Arc::new(MockUpgrader::new(behavior));
    let workflow = UpgradeWorkflow::new(
        slack.clone(),
        upgrader.clone(),
        APPROVAL_CHANNEL.to_string(),
    );
    (workflow, upgrader)
}

fn metadata() -> ModalMetadata {
    ModalMetadata {
        requester: REQUESTER.to_string(),
    }
}

fn context() -> RequestContext {
    RequestContext {
        target_user: TARGET.to_string(),
        requester: REQUESTER.to_string(),
        reason: "joined the team last week".to_string(),
    }
}

// =============================================================================
// Modal Open
// =============================================================================

#[tokio::test]
async fn open_modal_embeds_requester_metadata() {
    let slack = Arc::new(MockSlack::new());
    let (workflow, _) = make_workflow(&slack, UpgradeBehavior::Succeed);

    workflow
        .open_request_modal("123.456.trigger", REQUESTER)
        .await
        .expect("modal opens");

    let calls = slack.calls();
    assert_eq!(calls.len(), 1);
    match calls.first() {
        Some(SlackCall::OpenView {
            callback_id,
            private_metadata,
            ..
        }) => {
            assert_eq!(callback_id, "upgrade_request");
            let decoded = ModalMetadata::decode(private_metadata).expect("metadata decodes");
            assert_eq!(decoded.requester, REQUESTER);
        }
        other => panic!("expected OpenView, got {other:?}"),
    }
}

// =============================================================================
// Submission
// =============================================================================

#[tokio::test]
async fn full_member_submission_posts_nothing() {
    let slack = Arc::new(MockSlack::new());
    // TARGET not registered as a guest: users.info reports a full member
    let (workflow, upgrader) = make_workflow(&slack, UpgradeBehavior::Succeed);

    let outcome = workflow
        .handle_submission(&metadata(), TARGET, "please upgrade")
        .await
        .expect("submission handled");

    assert_eq!(outcome, SubmissionOutcome::AlreadyFullMember);
    assert_eq!(slack.count("post_message"), 0);
    assert_eq!(slack.count("user_info"), 1);
    assert!(upgrader.calls().is_empty());
}

#[tokio::test]
async fn guest_submission_posts_exactly_one_request_message() {
    let slack = Arc::new(MockSlack::new());
    slack.add_guest(TARGET);
    let (workflow, _) = make_workflow(&slack, UpgradeBehavior::Succeed);

    let outcome = workflow
        .handle_submission(&metadata(), TARGET, "joined the team last week")
        .await
        .expect("submission handled");

    assert_eq!(outcome, SubmissionOutcome::Forwarded);
    assert_eq!(slack.count("post_message"), 1);

    let calls = slack.calls();
    let posted = calls
        .iter()
        .find_map(|c| match c {
            SlackCall::PostMessage { channel, blocks, .. } => Some((channel, blocks)),
            _ => None,
        })
        .expect("one post_message call");

    assert_eq!(posted.0, APPROVAL_CHANNEL);

    // Both buttons must carry a payload that decodes back to the request
    let blocks = posted.1.as_array().expect("blocks array");
    let actions = blocks
        .iter()
        .find(|b| b["type"] == "actions")
        .expect("actions block");
    let elements = actions["elements"].as_array().expect("elements");
    assert_eq!(elements.len(), 2);

    for button in elements {
        let value = button["value"].as_str().expect("button value");
        let ctx = RequestContext::decode(value).expect("payload decodes");
        assert_eq!(ctx.target_user, TARGET);
        assert_eq!(ctx.requester, REQUESTER);
        assert_eq!(ctx.reason, "joined the team last week");
    }
}

// =============================================================================
// Approve
// =============================================================================

#[tokio::test]
async fn approve_edits_then_notifies_requester_then_target() {
    let slack = Arc::new(MockSlack::new());
    slack.add_guest(TARGET);
    let (workflow, upgrader) = make_workflow(&slack, UpgradeBehavior::Succeed);

    let state = workflow
        .handle_approve(&context(), REVIEWER, APPROVAL_CHANNEL, MESSAGE_TS)
        .await
        .expect("approval handled");

    assert_eq!(state, DecisionState::Approved);
    assert_eq!(upgrader.calls(), vec![TARGET.to_string()]);

    // Exactly one edit and exactly two DMs, edit first
    assert_eq!(
        slack.call_kinds(),
        vec!["update_message", "post_text", "post_text"]
    );

    let calls = slack.calls();
    match calls.first() {
        Some(SlackCall::UpdateMessage { channel, ts, blocks }) => {
            assert_eq!(channel, APPROVAL_CHANNEL);
            assert_eq!(ts, MESSAGE_TS);
            let rendered = blocks.to_string();
            assert!(rendered.contains("approved"));
            assert!(rendered.contains("joined the team last week"));
        }
        other => panic!("expected UpdateMessage first, got {other:?}"),
    }

    let dm_channels: Vec<&str> = calls
        .iter()
        .filter_map(|c| match c {
            SlackCall::PostText { channel, .. } => Some(channel.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(dm_channels, vec![REQUESTER, TARGET]);
}

#[tokio::test]
async fn stale_approve_edits_to_failed_and_sends_nothing() {
    let slack = Arc::new(MockSlack::new());
    let (workflow, upgrader) = make_workflow(&slack, UpgradeBehavior::AlreadyUpgraded);

    let state = workflow
        .handle_approve(&context(), REVIEWER, APPROVAL_CHANNEL, MESSAGE_TS)
        .await
        .expect("approval handled");

    assert_eq!(state, DecisionState::Failed);
    assert_eq!(upgrader.calls().len(), 1);
    assert_eq!(slack.count("update_message"), 1);
    assert_eq!(slack.count("post_text"), 0);

    // The failed message must still carry the original reason
    let calls = slack.calls();
    match calls.first() {
        Some(SlackCall::UpdateMessage { blocks, .. }) => {
            let rendered = blocks.to_string();
            assert!(rendered.contains("failed"));
            assert!(rendered.contains("joined the team last week"));
            assert!(rendered.contains("already a full member"));
        }
        other => panic!("expected UpdateMessage, got {other:?}"),
    }
}

#[tokio::test]
async fn other_failure_reports_in_new_message_and_leaves_original() {
    let slack = Arc::new(MockSlack::new());
    let (workflow, upgrader) = make_workflow(
        &slack,
        UpgradeBehavior::Reject("not_allowed_token_type".to_string()),
    );

    let state = workflow
        .handle_approve(&context(), REVIEWER, APPROVAL_CHANNEL, MESSAGE_TS)
        .await
        .expect("approval handled");

    // Original message untouched, buttons still live
    assert_eq!(state, DecisionState::Pending);
    assert_eq!(upgrader.calls().len(), 1);
    assert_eq!(slack.count("update_message"), 0);
    assert_eq!(slack.count("post_text"), 1);

    let calls = slack.calls();
    match calls.first() {
        Some(SlackCall::PostText { channel, text }) => {
            assert_eq!(channel, APPROVAL_CHANNEL);
            assert!(text.contains("not_allowed_token_type"));
        }
        other => panic!("expected PostText, got {other:?}"),
    }
}

#[tokio::test]
async fn notification_failure_does_not_roll_back_approval() {
    let slack = Arc::new(MockSlack::new());
    slack.fail_dm_to(REQUESTER);
    let (workflow, _) = make_workflow(&slack, UpgradeBehavior::Succeed);

    let state = workflow
        .handle_approve(&context(), REVIEWER, APPROVAL_CHANNEL, MESSAGE_TS)
        .await
        .expect("approval handled despite DM failure");

    assert_eq!(state, DecisionState::Approved);
    assert_eq!(slack.count("update_message"), 1);

    // The requester DM failed; the target DM is still attempted
    let dm_channels: Vec<String> = slack
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            SlackCall::PostText { channel, .. } => Some(channel),
            _ => None,
        })
        .collect();
    assert_eq!(dm_channels, vec![TARGET.to_string()]);
}

// =============================================================================
// Deny
// =============================================================================

#[tokio::test]
async fn deny_edits_once_and_never_invokes_executor() {
    let slack = Arc::new(MockSlack::new());
    let (workflow, upgrader) = make_workflow(&slack, UpgradeBehavior::Succeed);

    let state = workflow
        .handle_deny(&context(), REVIEWER, APPROVAL_CHANNEL, MESSAGE_TS)
        .await
        .expect("denial handled");

    assert_eq!(state, DecisionState::Denied);
    assert!(upgrader.calls().is_empty());
    assert_eq!(slack.call_kinds(), vec!["update_message"]);

    let calls = slack.calls();
    match calls.first() {
        Some(SlackCall::UpdateMessage { blocks, .. }) => {
            let rendered = blocks.to_string();
            assert!(rendered.contains("denied"));
            assert!(rendered.contains(REVIEWER));
        }
        other => panic!("expected UpdateMessage, got {other:?}"),
    }
}

// =============================================================================
// Reviewer race
// =============================================================================

#[tokio::test]
async fn back_to_back_decisions_complete_without_panicking() {
    // Two reviewers racing: approve lands, then a deny click on the
    // now-terminal request. The second edit overwrites the first; the
    // documented requirement is only that neither handler fails.
    let slack = Arc::new(MockSlack::new());
    slack.add_guest(TARGET);
    let (workflow, _) = make_workflow(&slack, UpgradeBehavior::Succeed);

    let first = workflow
        .handle_approve(&context(), REVIEWER, APPROVAL_CHANNEL, MESSAGE_TS)
        .await;
    let second = workflow
        .handle_deny(&context(), "U_SECOND_REVIEWER", APPROVAL_CHANNEL, MESSAGE_TS)
        .await;

    assert_eq!(first.expect("approve completes"), DecisionState::Approved);
    assert_eq!(second.expect("deny completes"), DecisionState::Denied);

    // And the reverse order
    let slack = Arc::new(MockSlack::new());
    let (workflow, upgrader) = make_workflow(&slack, UpgradeBehavior::AlreadyUpgraded);

    let first = workflow
        .handle_deny(&context(), REVIEWER, APPROVAL_CHANNEL, MESSAGE_TS)
        .await;
    let second = workflow
        .handle_approve(&context(), "U_SECOND_REVIEWER", APPROVAL_CHANNEL, MESSAGE_TS)
        .await;

    assert_eq!(first.expect("deny completes"), DecisionState::Denied);
    assert_eq!(second.expect("approve completes"), DecisionState::Failed);
    assert_eq!(upgrader.calls().len(), 1);
}
