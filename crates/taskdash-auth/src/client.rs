//! Login endpoint client.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AuthError;

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: Option<String>,
}

pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Exchange credentials for an access token.
    #[instrument(skip(self, credentials), fields(username = %credentials.username), level = "info")]
    pub async fn login(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let url = format!("{}/users/login", self.base_url);

        let response = self.client.post(&url).json(credentials).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Login rejected with status {}", status);
            return Err(AuthError::Rejected(status.as_u16()));
        }

        let body: LoginResponse = response.json().await?;
        match body.access_token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(AuthError::MissingToken),
        }
    }
}
