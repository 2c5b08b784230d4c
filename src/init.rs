//! Storage initialization (`catalog init`).
//!
//! Creates whatever the configured backend needs before the server can
//! answer requests: the image directory, plus either the empty JSON
//! document or the `items` table. Running it repeatedly is safe and never
//! discards existing items.

use anyhow::{Context, Result};

use crate::config::{Config, StorageBackend};
use crate::db;
use crate::json_store::create_empty_document;

/// Creates the `items` table if it does not exist.
pub async fn create_items_table(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id TEXT,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            image_name TEXT
        )
        "#,
    )
    .execute(&pool)
    .await?;

    pool.close().await;
    Ok(())
}

/// Initializes the image directory and the configured item storage.
pub async fn init_storage(config: &Config) -> Result<()> {
    let images_dir = &config.images.dir;
    tokio::fs::create_dir_all(images_dir)
        .await
        .with_context(|| format!("Failed to create image directory: {}", images_dir.display()))?;

    match config.storage.backend {
        StorageBackend::Json => {
            let path = &config.storage.items_path;
            if create_empty_document(path)
                .await
                .with_context(|| format!("Failed to create {}", path.display()))?
            {
                tracing::info!(path = %path.display(), "created empty items document");
            }
        }
        StorageBackend::Sqlite => {
            create_items_table(config).await?;
            tracing::info!(path = %config.db.path.display(), "items table ready");
        }
    }

    Ok(())
}
