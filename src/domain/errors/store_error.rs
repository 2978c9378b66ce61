//! Remote document store error types.

use thiserror::Error;

/// Document store error variants.
///
/// Transient and permanent failures are not distinguished; nothing retries.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StoreError {
    #[error("network error talking to the document store: {message}")]
    Network { message: String },

    #[error("document store returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode {collection} document {id}: {message}")]
    Decode {
        collection: String,
        id: String,
        message: String,
    },

    #[error("document {id} not found in {collection}")]
    NotFound { collection: String, id: String },

    #[error("document store is misconfigured: {message}")]
    Configuration { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates HTTP status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(
        collection: impl Into<String>,
        id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Decode {
            collection: collection.into(),
            id: id.into(),
            message: message.into(),
        }
    }

    /// Creates not-found error.
    #[must_use]
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Creates configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns whether the error came from the network path.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Status { .. })
    }
}
