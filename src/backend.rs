//! Item store selection.
//!
//! The backend is chosen once at startup from `[storage].backend` and
//! shared by every request handler and CLI command as an
//! `Arc<dyn ItemStore>`.

use std::sync::Arc;

use anyhow::Result;

use item_catalog_core::store::ItemStore;

use crate::config::{Config, StorageBackend};
use crate::db;
use crate::json_store::JsonFileStore;
use crate::sqlite_store::SqliteStore;

/// Opens the configured item store.
pub async fn open_store(config: &Config) -> Result<Arc<dyn ItemStore>> {
    let store: Arc<dyn ItemStore> = match config.storage.backend {
        StorageBackend::Json => {
            tracing::debug!(path = %config.storage.items_path.display(), "using json item store");
            Arc::new(JsonFileStore::new(&config.storage.items_path))
        }
        StorageBackend::Sqlite => {
            tracing::debug!(path = %config.db.path.display(), "using sqlite item store");
            Arc::new(SqliteStore::new(db::connect(config).await?))
        }
    };
    Ok(store)
}
