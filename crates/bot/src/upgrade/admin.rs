//! Privileged membership-change client.
//!
//! `users.admin.setRegular` is not part of the public Web API; it is the
//! endpoint the admin console itself calls, authenticated with a browser
//! session (`xoxc` token plus `d` cookie) supplied out of band.

use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::{debug, error, instrument};

use crate::config::AdminApiConfig;

use super::error::UpgradeError;

/// Fixed reason field the admin console sends with the mutation.
const SET_REGULAR_REASON: &str = "adminMembersStore_makeRegular";

/// Response from `users.admin.setRegular`.
#[derive(Debug, Clone, Deserialize)]
struct SetRegularResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the privileged membership-change endpoint.
#[derive(Clone)]
pub struct AdminApiClient {
    client: Client,
    config: AdminApiConfig,
}

impl std::fmt::Debug for AdminApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AdminApiClient {
    /// Create a new admin API client.
    #[must_use]
    pub fn new(config: AdminApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Clear the target's guest flags, making them a full member.
    ///
    /// # Errors
    ///
    /// Returns [`UpgradeError::Rejected`] if the platform refuses the
    /// mutation, or a request/response error if the call itself fails.
    #[instrument(skip(self), fields(user = %user_id))]
    pub async fn set_regular(&self, user_id: &str) -> Result<(), UpgradeError> {
        let url = format!("{}/api/users.admin.setRegular", self.config.workspace_url);

        let form = [
            ("token", self.config.xoxc_token.expose_secret()),
            ("user", user_id),
            ("_x_reason", SET_REGULAR_REASON),
            ("_x_mode", "online"),
        ];

        let response = self
            .client
            .post(url)
            .header(
                reqwest::header::COOKIE,
                format!("d={}", self.config.d_cookie.expose_secret()),
            )
            .form(&form)
            .send()
            .await
            .map_err(|e| UpgradeError::Request(e.to_string()))?;

        let result: SetRegularResponse = response
            .json()
            .await
            .map_err(|e| UpgradeError::Response(e.to_string()))?;

        if !result.ok {
            let reason = result.error.unwrap_or_else(|| "unknown error".to_string());
            error!(reason = %reason, "setRegular rejected");
            return Err(UpgradeError::Rejected(reason));
        }

        debug!("setRegular succeeded");

        Ok(())
    }
}
