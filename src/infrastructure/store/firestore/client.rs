//! Firestore REST v1 document store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::json;
use tracing::{debug, warn};

use super::codec::{decode_fields, encode_fields, field_path};
use super::dto::{DocumentResponse, ErrorResponse, ListDocumentsResponse};
use crate::domain::errors::StoreError;
use crate::domain::ports::{DocumentStorePort, Fields, StoredDocument};
use crate::infrastructure::config::FirestoreConfig;

const PAGE_SIZE: &str = "300";
const USER_AGENT: &str = concat!("hello-club/", env!("CARGO_PKG_VERSION"));

/// Document store backed by Cloud Firestore.
pub struct FirestoreStore {
    client: Client,
    documents_url: String,
    api_key: String,
}

impl FirestoreStore {
    /// Creates a store from configuration.
    ///
    /// # Errors
    /// Returns error if the project id or API key is missing, or the HTTP
    /// client cannot be built.
    pub fn new(config: &FirestoreConfig) -> Result<Self, StoreError> {
        let project = config
            .project_id
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| StoreError::configuration("store.firestore.project_id is not set"))?;
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| StoreError::configuration("store.firestore.api_key is not set"))?;

        Self::with_base_url(
            &config.base_url,
            project,
            &config.database,
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Creates a store against an explicit endpoint.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(
        base_url: &str,
        project: &str,
        database: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            documents_url: format!(
                "{}/projects/{project}/databases/{database}/documents",
                base_url.trim_end_matches('/')
            ),
            api_key: api_key.to_string(),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{collection}", self.documents_url)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{collection}/{id}", self.documents_url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach Firestore");
                if e.is_timeout() {
                    StoreError::network("request timed out")
                } else if e.is_connect() {
                    StoreError::network("failed to connect to Firestore")
                } else {
                    StoreError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(error) if !error.error.message.is_empty() => {
                format!("{} ({})", error.error.message, error.error.status)
            }
            _ => format!("HTTP {status}"),
        };
        Err(StoreError::status(status.as_u16(), message))
    }

    fn decode(collection: &str, doc: DocumentResponse) -> Result<StoredDocument, StoreError> {
        let fields = decode_fields(&doc.fields)
            .map_err(|e| StoreError::decode(collection, doc.id(), e))?;
        Ok(StoredDocument::new(doc.id(), fields))
    }

    /// Decodes a listed page, skipping documents with malformed values.
    fn decode_page(collection: &str, docs: Vec<DocumentResponse>) -> Vec<StoredDocument> {
        docs.into_iter()
            .filter_map(|doc| match Self::decode(collection, doc) {
                Ok(stored) => Some(stored),
                Err(e) => {
                    warn!(collection, error = %e, "Skipping undecodable document");
                    None
                }
            })
            .collect()
    }
}

fn not_found_as(collection: &str, id: &str) -> impl FnOnce(StoreError) -> StoreError {
    let (collection, id) = (collection.to_string(), id.to_string());
    move |e| match e {
        StoreError::Status { status, .. } if status == StatusCode::NOT_FOUND.as_u16() => {
            StoreError::not_found(collection, id)
        }
        other => other,
    }
}

#[async_trait]
impl DocumentStorePort for FirestoreStore {
    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(self.collection_url(collection))
                .query(&[("pageSize", PAGE_SIZE)]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let page: ListDocumentsResponse = self
                .send(request)
                .await?
                .json()
                .await
                .map_err(|e| StoreError::decode(collection, "", e.to_string()))?;

            documents.extend(Self::decode_page(collection, page.documents));

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(collection, count = documents.len(), "Listed Firestore documents");
        Ok(documents)
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let body = json!({ "fields": encode_fields(&fields) });
        let request = self.client.post(self.collection_url(collection)).json(&body);

        let doc: DocumentResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::decode(collection, "", e.to_string()))?;

        debug!(collection, id = doc.id(), "Created Firestore document");
        Ok(doc.id().to_string())
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let mut params: Vec<(&str, String)> = fields
            .keys()
            .map(|key| ("updateMask.fieldPaths", field_path(key)))
            .collect();
        params.push(("currentDocument.exists", "true".to_string()));

        let body = json!({ "fields": encode_fields(&fields) });
        let request = self
            .client
            .patch(self.document_url(collection, id))
            .query(&params)
            .json(&body);

        self.send(request)
            .await
            .map_err(not_found_as(collection, id))?;
        debug!(collection, id, "Updated Firestore document");
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let request = self
            .client
            .delete(self.document_url(collection, id))
            .query(&[("currentDocument.exists", "true")]);

        self.send(request)
            .await
            .map_err(not_found_as(collection, id))?;
        debug!(collection, id, "Deleted Firestore document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_project_and_key() {
        let config = FirestoreConfig::default();
        let err = FirestoreStore::new(&config).err().unwrap();
        assert!(matches!(err, StoreError::Configuration { .. }));

        let config = FirestoreConfig {
            project_id: Some("hello-club".to_string()),
            api_key: Some("k".to_string()),
            ..FirestoreConfig::default()
        };
        assert!(FirestoreStore::new(&config).is_ok());
    }

    #[test]
    fn test_resource_urls() {
        let store = FirestoreStore::with_base_url(
            "https://firestore.googleapis.com/v1/",
            "hello-club",
            "(default)",
            "k",
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            store.collection_url("members"),
            "https://firestore.googleapis.com/v1/projects/hello-club/databases/(default)/documents/members"
        );
        assert!(store.document_url("members", "abc").ends_with("/documents/members/abc"));
    }

    #[test]
    fn test_document_id_from_name() {
        let doc = DocumentResponse {
            name: "projects/p/databases/(default)/documents/members/xyz".to_string(),
            fields: serde_json::Map::new(),
        };
        assert_eq!(doc.id(), "xyz");
    }

    #[test]
    fn test_listed_page_skips_malformed_documents() {
        let page: ListDocumentsResponse = serde_json::from_value(json!({
            "documents": [
                {
                    "name": "projects/p/databases/(default)/documents/members/good",
                    "fields": { "name": { "stringValue": "Ana" } }
                },
                {
                    "name": "projects/p/databases/(default)/documents/members/bad",
                    "fields": { "bookValue": { "integerValue": "lots" } }
                }
            ]
        }))
        .unwrap();

        let docs = FirestoreStore::decode_page("members", page.documents);

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "good");
        assert_eq!(docs[0].fields["name"], json!("Ana"));
    }

    #[test]
    fn test_not_found_mapping() {
        let mapped = not_found_as("members", "m1")(StoreError::status(404, "NOT_FOUND"));
        assert!(matches!(mapped, StoreError::NotFound { .. }));

        let kept = not_found_as("members", "m1")(StoreError::status(500, "boom"));
        assert!(matches!(kept, StoreError::Status { status: 500, .. }));
    }
}
