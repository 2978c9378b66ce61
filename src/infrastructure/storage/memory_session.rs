//! Session marker that lives as long as the process.

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::domain::errors::AuthError;
use crate::domain::ports::SessionStoragePort;

/// In-memory session marker.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    operator: RwLock<Option<String>>,
}

impl MemorySessionStorage {
    /// Creates an empty marker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStoragePort for MemorySessionStorage {
    async fn current_operator(&self) -> Result<Option<String>, AuthError> {
        Ok(self.operator.read().clone())
    }

    async fn mark_authenticated(&self, username: &str) -> Result<(), AuthError> {
        debug!(username, "Session marked authenticated");
        *self.operator.write() = Some(username.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), AuthError> {
        debug!("Session cleared");
        *self.operator.write() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mark_and_clear() {
        let storage = MemorySessionStorage::new();
        assert!(!storage.is_authenticated().await.unwrap());

        storage.mark_authenticated("admin").await.unwrap();
        assert_eq!(
            storage.current_operator().await.unwrap().as_deref(),
            Some("admin")
        );

        storage.clear().await.unwrap();
        assert!(!storage.is_authenticated().await.unwrap());
    }
}
