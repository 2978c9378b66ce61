//! Session marker persisted in the system keyring.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};

use crate::domain::errors::{AuthError, SecretError};
use crate::domain::ports::SessionStoragePort;

const KEYRING_SERVICE: &str = "hello-club";
const KEYRING_USER: &str = "session";

/// System keyring session adapter.
pub struct KeyringSessionStorage {
    service: String,
    user: String,
}

impl KeyringSessionStorage {
    /// Creates storage with default names.
    #[must_use]
    pub fn new() -> Self {
        Self::with_names(KEYRING_SERVICE, KEYRING_USER)
    }

    /// Creates storage with custom names.
    #[must_use]
    pub fn with_names(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: user.into(),
        }
    }

    fn entry(&self) -> Result<Entry, SecretError> {
        Entry::new(&self.service, &self.user).map_err(|e| SecretError::AccessFailed(e.to_string()))
    }
}

impl Default for KeyringSessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStoragePort for KeyringSessionStorage {
    async fn current_operator(&self) -> Result<Option<String>, AuthError> {
        match self.entry()?.get_password() {
            Ok(username) if !username.is_empty() => {
                debug!(service = %self.service, "Session marker found in keyring");
                Ok(Some(username))
            }
            Ok(_) | Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => {
                warn!(error = %e, "Failed to read session marker");
                Err(SecretError::ReadFailed(e.to_string()).into())
            }
        }
    }

    async fn mark_authenticated(&self, username: &str) -> Result<(), AuthError> {
        self.entry()?.set_password(username).map_err(|e| {
            warn!(error = %e, "Failed to write session marker");
            SecretError::WriteFailed(e.to_string())
        })?;
        debug!(service = %self.service, "Session marker stored in keyring");
        Ok(())
    }

    async fn clear(&self) -> Result<(), AuthError> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {
                debug!(service = %self.service, "Session marker cleared");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to remove session marker");
                Err(SecretError::RemoveFailed(e.to_string()).into())
            }
        }
    }
}
