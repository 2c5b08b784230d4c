//! Storage abstraction for Item Catalog.
//!
//! The [`ItemStore`] trait is the capability set shared by every backend:
//! the flat JSON document, the SQLite table, and the in-memory store used
//! in tests. One implementation is selected at startup and injected into
//! the request handlers.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::models::Item;

/// Abstract item storage backend.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`list`](ItemStore::list) | All items in insertion order |
/// | [`append`](ItemStore::append) | Add one item, return the post-state |
/// | [`find_by_id`](ItemStore::find_by_id) | First item with an exact id match |
/// | [`find_by_name_substring`](ItemStore::find_by_name_substring) | Case-sensitive substring search on `name` |
///
/// The lookup methods default to a linear scan over [`list`](ItemStore::list).
/// Backends with a query engine may override them, but must keep the
/// same ordering and matching rules.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Every stored item, in insertion order.
    ///
    /// A missing backing store is an error, not an empty collection.
    async fn list(&self) -> StoreResult<Vec<Item>>;

    /// Append `item` to the end of the collection and return the updated
    /// collection.
    async fn append(&self, item: Item) -> StoreResult<Vec<Item>>;

    /// First item whose id equals `id`.
    async fn find_by_id(&self, id: &str) -> StoreResult<Item> {
        self.list()
            .await?
            .into_iter()
            .find(|item| item.id.as_deref() == Some(id))
            .ok_or_else(|| StoreError::NotFound(format!("item {}", id)))
    }

    /// Items whose name contains `keyword`, preserving order.
    async fn find_by_name_substring(&self, keyword: &str) -> StoreResult<Vec<Item>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|item| item.name.contains(keyword))
            .collect())
    }
}
