//! Authentication DTOs.

use crate::domain::entities::{Credentials, Operator, Password};

/// Login request data.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    /// Entered credentials.
    pub credentials: Credentials,
}

impl LoginRequest {
    /// Creates new login request.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(username, Password::new(password)),
        }
    }
}

/// Login response data.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    /// Signed-in operator.
    pub operator: Operator,
    /// Whether the session marker was recorded.
    pub session_recorded: bool,
}

impl LoginResponse {
    /// Creates new login response.
    #[must_use]
    pub const fn new(operator: Operator, session_recorded: bool) -> Self {
        Self {
            operator,
            session_recorded,
        }
    }
}
