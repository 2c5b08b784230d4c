//! File-backed [`ItemStore`] implementation.
//!
//! The whole collection lives in one JSON document (`{"items": [...]}`)
//! that is re-read on every operation and rewritten wholesale on every
//! append.
//!
//! All operations are serialized through a single async mutex, so two
//! concurrent appends cannot both read the old document and drop one
//! another's write.
//!
//! A missing document is an error. `catalog init` creates an empty one.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use item_catalog_core::store::ItemStore;
use item_catalog_core::{Item, ItemList, StoreError, StoreResult};

/// JSON document implementation of the [`ItemStore`] trait.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> StoreResult<ItemList> {
        let data = tokio::fs::read(&self.path).await.map_err(|e| {
            StoreError::StorageUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(serde_json::from_slice(&data)?)
    }

    async fn write_document(&self, doc: &ItemList) -> StoreResult<()> {
        let data = serde_json::to_vec_pretty(doc)?;
        tokio::fs::write(&self.path, data).await.map_err(|e| {
            StoreError::StorageUnavailable(format!("{}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl ItemStore for JsonFileStore {
    async fn list(&self) -> StoreResult<Vec<Item>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_document().await?.items)
    }

    async fn append(&self, item: Item) -> StoreResult<Vec<Item>> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;
        doc.items.push(item);
        self.write_document(&doc).await?;
        tracing::debug!(
            path = %self.path.display(),
            count = doc.items.len(),
            "items document rewritten"
        );
        Ok(doc.items)
    }
}

/// Writes an empty `{"items": []}` document at `path` unless one exists.
///
/// Returns `true` if a new document was created.
pub async fn create_empty_document(path: &Path) -> anyhow::Result<bool> {
    if tokio::fs::try_exists(path).await? {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, serde_json::to_vec_pretty(&ItemList::default())?).await?;
    Ok(true)
}
