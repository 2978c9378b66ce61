//! Session storage for builds without keyring support.

use async_trait::async_trait;
use tracing::debug;

use super::MemorySessionStorage;
use crate::domain::errors::AuthError;
use crate::domain::ports::SessionStoragePort;

/// Falls back to a process-lifetime marker when the keyring feature is off.
#[derive(Default)]
pub struct KeyringSessionStorage {
    inner: MemorySessionStorage,
}

impl KeyringSessionStorage {
    /// Creates new stub storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage with custom names (ignored by the stub).
    #[must_use]
    pub fn with_names(_service: impl Into<String>, _user: impl Into<String>) -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStoragePort for KeyringSessionStorage {
    async fn current_operator(&self) -> Result<Option<String>, AuthError> {
        self.inner.current_operator().await
    }

    async fn mark_authenticated(&self, username: &str) -> Result<(), AuthError> {
        debug!("Keyring feature disabled, session is not remembered");
        self.inner.mark_authenticated(username).await
    }

    async fn clear(&self) -> Result<(), AuthError> {
        self.inner.clear().await
    }
}
