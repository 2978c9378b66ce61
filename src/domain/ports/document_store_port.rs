//! Remote document store port definition.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::errors::StoreError;

/// Collection holding member records.
pub const MEMBERS_COLLECTION: &str = "members";
/// Collection holding the audit log.
pub const TRANSACTIONS_COLLECTION: &str = "transactions";

/// Stored fields of a document.
pub type Fields = Map<String, Value>;

/// Document as read back from a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Store-assigned id.
    pub id: String,
    /// Document fields.
    pub fields: Fields,
}

impl StoredDocument {
    /// Creates a document.
    #[must_use]
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// Port for generic CRUD against named collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStorePort: Send + Sync {
    /// Reads every document of a collection.
    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError>;

    /// Creates a document and returns its new id.
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Overwrites the given fields of an existing document.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Deletes a document.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}
