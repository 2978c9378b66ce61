//! Operator credential check port definition.

use async_trait::async_trait;

use crate::domain::entities::{Credentials, Operator};
use crate::domain::errors::AuthError;

/// Port for checking operator credentials.
#[async_trait]
pub trait CredentialVerifierPort: Send + Sync {
    /// Checks the credentials and returns the signed-in operator.
    async fn verify(&self, credentials: &Credentials) -> Result<Operator, AuthError>;
}
