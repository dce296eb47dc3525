//! The privileged upgrade side of the bot.

mod admin;
mod error;
mod executor;

pub use admin::AdminApiClient;
pub use error::UpgradeError;
pub use executor::{TierUpgrader, UpgradeExecutor};
