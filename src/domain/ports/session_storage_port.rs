//! Session marker storage port definition.

use async_trait::async_trait;

use crate::domain::errors::AuthError;

/// Port for the signed-in marker that gates the dashboard.
#[async_trait]
pub trait SessionStoragePort: Send + Sync {
    /// Returns the operator recorded as signed in, if any.
    async fn current_operator(&self) -> Result<Option<String>, AuthError>;

    /// Records the operator as signed in.
    async fn mark_authenticated(&self, username: &str) -> Result<(), AuthError>;

    /// Clears the marker on sign-out.
    async fn clear(&self) -> Result<(), AuthError>;

    /// Checks whether a session is active.
    async fn is_authenticated(&self) -> Result<bool, AuthError> {
        Ok(self.current_operator().await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock session storage for testing.
    pub struct MockSessionStorage {
        operator: Arc<RwLock<Option<String>>>,
        fail_writes: bool,
    }

    impl MockSessionStorage {
        /// Creates empty mock storage.
        pub fn new() -> Self {
            Self {
                operator: Arc::new(RwLock::new(None)),
                fail_writes: false,
            }
        }

        /// Creates mock storage with an active session.
        pub fn signed_in(username: &str) -> Self {
            Self {
                operator: Arc::new(RwLock::new(Some(username.to_string()))),
                fail_writes: false,
            }
        }

        /// Creates mock storage whose writes fail.
        pub fn failing() -> Self {
            Self {
                operator: Arc::new(RwLock::new(None)),
                fail_writes: true,
            }
        }
    }

    impl Default for MockSessionStorage {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl SessionStoragePort for MockSessionStorage {
        async fn current_operator(&self) -> Result<Option<String>, AuthError> {
            Ok(self.operator.read().await.clone())
        }

        async fn mark_authenticated(&self, username: &str) -> Result<(), AuthError> {
            if self.fail_writes {
                return Err(AuthError::unexpected("mock write failure"));
            }
            *self.operator.write().await = Some(username.to_string());
            Ok(())
        }

        async fn clear(&self) -> Result<(), AuthError> {
            *self.operator.write().await = None;
            Ok(())
        }
    }
}
