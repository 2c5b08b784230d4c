//! CLI entry points for item operations.
//!
//! Each command opens the configured store, runs one [`ItemStore`]
//! operation, and prints the result as JSON on stdout, in the same shape
//! the HTTP API returns.
//!
//! ```bash
//! catalog add --name pen --category office --image ./pen.jpg
//! catalog list
//! catalog get 1
//! catalog search pe
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use item_catalog_core::store::ItemStore;
use item_catalog_core::{Item, ItemList};

use crate::backend::open_store;
use crate::config::Config;
use crate::images::ImageStore;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `catalog list`
pub async fn run_list(config: &Config) -> Result<()> {
    let store = open_store(config).await?;
    print_json(&ItemList::from(store.list().await?))
}

/// `catalog get <id>`
pub async fn run_get(config: &Config, id: &str) -> Result<()> {
    let store = open_store(config).await?;
    print_json(&store.find_by_id(id).await?)
}

/// `catalog search <keyword>`
pub async fn run_search(config: &Config, keyword: &str) -> Result<()> {
    let store = open_store(config).await?;
    print_json(&ItemList::from(store.find_by_name_substring(keyword).await?))
}

/// `catalog add`: stores the image at `image` (if given) and appends the
/// item, printing the updated collection.
pub async fn run_add(
    config: &Config,
    name: String,
    category: String,
    image: Option<&Path>,
    id: Option<String>,
) -> Result<()> {
    let store = open_store(config).await?;

    let mut item = Item::new(name, category);
    if let Some(id) = id {
        item = item.with_id(id);
    }
    if let Some(path) = image {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image: {}", path.display()))?;
        let images = ImageStore::new(&config.images.dir);
        item = item.with_image(images.store(&bytes).await?);
    }

    tracing::info!(name = %item.name, "receive item");
    print_json(&ItemList::from(store.append(item).await?))
}
