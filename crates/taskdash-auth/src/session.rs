use crate::client::{AuthClient, Credentials};
use crate::error::{AuthError, StorageError};
use crate::storage::{LocalStorage, TOKEN_KEY};

/// Source of the bearer token attached to API requests.
pub trait TokenProvider: Send + Sync {
    /// Current token, read fresh on every call.
    fn token(&self) -> Option<String>;
}

/// Process-wide login session backed by [`LocalStorage`].
pub struct Session {
    storage: LocalStorage,
    client: AuthClient,
}

impl Session {
    pub fn new(storage: LocalStorage, client: AuthClient) -> Self {
        Self { storage, client }
    }

    /// True iff a non-empty token is persisted. Never cached.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Post credentials and persist the returned access token.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let token = self.client.login(&credentials).await?;
        self.storage.set_item(TOKEN_KEY, &token)?;
        tracing::info!("Logged in as {}", username);
        Ok(())
    }

    /// Drop the local token. There is no server-side invalidation.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.storage.remove_item(TOKEN_KEY)?;
        tracing::info!("Logged out");
        Ok(())
    }
}

impl TokenProvider for Session {
    fn token(&self) -> Option<String> {
        match self.storage.get_item(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("Token store unreadable, treating as signed out: {}", e);
                None
            }
        }
    }
}
