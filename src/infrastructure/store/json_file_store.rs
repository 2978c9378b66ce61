//! Local document store: one flat JSON file per collection.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::errors::StoreError;
use crate::domain::ports::{DocumentStorePort, Fields, StoredDocument};

type Collection = BTreeMap<String, Fields>;

/// Stores each collection as `<dir>/<collection>.json`, an object keyed by id.
///
/// Every write replaces the whole file through a temp file in the same
/// directory, so readers never see a partial file.
pub struct JsonFileStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        if !dir.exists() {
            info!(path = ?dir, "Creating data directory");
            std::fs::create_dir_all(&dir)?;
        }
        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    /// Returns the data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    async fn read(&self, collection: &str) -> Result<Collection, StoreError> {
        let path = self.path_for(collection);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Collection::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Collection::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| StoreError::decode(collection, path.display().to_string(), e.to_string()))
    }

    async fn write(&self, collection: &str, docs: &Collection) -> Result<(), StoreError> {
        let content = serde_json::to_vec_pretty(docs)
            .map_err(|e| StoreError::decode(collection, "", e.to_string()))?;
        let dir = self.dir.clone();
        let target = self.path_for(collection);

        tokio::task::spawn_blocking(move || Self::replace_file(&dir, &target, &content))
            .await
            .map_err(|e| StoreError::Io(std::io::Error::other(e)))??;

        debug!(collection, documents = docs.len(), "Collection written");
        Ok(())
    }

    fn replace_file(dir: &Path, target: &Path, content: &[u8]) -> std::io::Result<()> {
        let mut temp_file = tempfile::NamedTempFile::new_in(dir)?;
        temp_file.write_all(content)?;
        temp_file.flush()?;
        temp_file.persist(target).map_err(|e| e.error)?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStorePort for JsonFileStore {
    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self
            .read(collection)
            .await?
            .into_iter()
            .map(|(id, fields)| StoredDocument::new(id, fields))
            .collect())
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let _guard = self.lock.lock().await;
        let mut docs = self.read(collection).await?;
        let id = Uuid::new_v4().simple().to_string();
        docs.insert(id.clone(), fields);
        self.write(collection, &docs).await?;
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut docs = self.read(collection).await?;
        docs.get_mut(id)
            .ok_or_else(|| StoreError::not_found(collection, id))?
            .extend(fields);
        self.write(collection, &docs).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut docs = self.read(collection).await?;
        if docs.remove(id).is_none() {
            return Err(StoreError::not_found(collection, id));
        }
        self.write(collection, &docs).await
    }
}
