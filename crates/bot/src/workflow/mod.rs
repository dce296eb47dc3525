//! The request/approve/deny workflow.

mod context;
mod service;

pub use context::{DecisionState, ModalMetadata, RequestContext};
pub use service::{SubmissionOutcome, UpgradeWorkflow};
