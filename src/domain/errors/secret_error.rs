//! Secure session storage error types.

use thiserror::Error;

/// Secure storage error variants.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("failed to open secure storage entry: {0}")]
    AccessFailed(String),

    #[error("failed to read session marker: {0}")]
    ReadFailed(String),

    #[error("failed to write session marker: {0}")]
    WriteFailed(String),

    #[error("failed to remove session marker: {0}")]
    RemoveFailed(String),
}
