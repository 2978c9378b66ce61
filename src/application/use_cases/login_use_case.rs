//! Login use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{LoginRequest, LoginResponse};
use crate::domain::entities::Operator;
use crate::domain::errors::AuthError;
use crate::domain::ports::{CredentialVerifierPort, SessionStoragePort};

/// Handles operator sign-in, sign-out and session restore.
#[derive(Clone)]
pub struct LoginUseCase {
    verifier: Arc<dyn CredentialVerifierPort>,
    session: Arc<dyn SessionStoragePort>,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub const fn new(
        verifier: Arc<dyn CredentialVerifierPort>,
        session: Arc<dyn SessionStoragePort>,
    ) -> Self {
        Self { verifier, session }
    }

    /// Executes login with provided request.
    ///
    /// # Errors
    /// Returns error if a field is blank or the credentials do not match.
    pub async fn execute(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        let credentials = request.credentials;
        if credentials.is_incomplete() {
            debug!("Login attempted with a blank field");
            return Err(AuthError::MissingCredentials);
        }

        let operator = self.verifier.verify(&credentials).await.map_err(|e| {
            warn!(error = %e, "Credential check failed");
            e
        })?;

        info!(operator = %operator.username(), "Operator signed in");

        let session_recorded = match self.session.mark_authenticated(operator.username()).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Failed to record session marker");
                false
            }
        };

        Ok(LoginResponse::new(operator, session_recorded))
    }

    /// Returns the operator of a session that is still marked as signed in.
    ///
    /// # Errors
    /// Returns error if the session storage cannot be read.
    pub async fn restore_session(&self) -> Result<Option<Operator>, AuthError> {
        let operator = self.session.current_operator().await?.map(Operator::new);
        if let Some(op) = &operator {
            info!(operator = %op.username(), "Restored signed-in session");
        }
        Ok(operator)
    }

    /// Clears the session marker.
    ///
    /// # Errors
    /// Returns error if the marker cannot be removed.
    pub async fn logout(&self) -> Result<(), AuthError> {
        match self.session.clear().await {
            Ok(()) => {
                info!("Operator signed out");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to clear session marker");
                Err(e)
            }
        }
    }
}
