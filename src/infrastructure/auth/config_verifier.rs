//! Credential check against the configured operator account.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::domain::entities::{Credentials, Operator};
use crate::domain::errors::AuthError;
use crate::domain::ports::CredentialVerifierPort;
use crate::infrastructure::config::AuthConfig;

/// Returns the lowercase hex SHA-256 digest of a password.
#[must_use]
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Verifier for the single operator account in `[auth]`.
pub struct ConfigCredentialVerifier {
    username: String,
    password_sha256: Option<String>,
}

impl ConfigCredentialVerifier {
    /// Creates a verifier from the `[auth]` section.
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            username: config.username.trim().to_string(),
            password_sha256: config
                .password_sha256
                .as_deref()
                .map(|h| h.trim().to_ascii_lowercase())
                .filter(|h| !h.is_empty()),
        }
    }
}

#[async_trait]
impl CredentialVerifierPort for ConfigCredentialVerifier {
    async fn verify(&self, credentials: &Credentials) -> Result<Operator, AuthError> {
        let Some(expected) = &self.password_sha256 else {
            warn!("auth.password_sha256 is not set");
            return Err(AuthError::not_configured(
                "set auth.password_sha256 in the config file",
            ));
        };

        let username_ok = credentials.username().trim() == self.username;
        let password_ok = hash_password(credentials.password().expose()) == *expected;

        if username_ok & password_ok {
            debug!(username = %self.username, "Operator credentials accepted");
            Ok(Operator::new(&self.username))
        } else {
            debug!("Operator credentials rejected");
            Err(AuthError::InvalidCredentials)
        }
    }
}
