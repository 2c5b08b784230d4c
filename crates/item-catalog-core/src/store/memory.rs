//! In-memory [`ItemStore`] implementation for tests.
//!
//! Uses a `Vec` behind `std::sync::RwLock`. Lookups use the trait's
//! default linear scans.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::models::Item;

use super::ItemStore;

/// In-memory item store.
#[derive(Default)]
pub struct InMemoryItemStore {
    items: RwLock<Vec<Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::StorageUnavailable("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn list(&self) -> StoreResult<Vec<Item>> {
        Ok(self.items.read().map_err(poisoned)?.clone())
    }

    async fn append(&self, item: Item) -> StoreResult<Vec<Item>> {
        let mut items = self.items.write().map_err(poisoned)?;
        items.push(item);
        Ok(items.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InMemoryItemStore {
        InMemoryItemStore::with_items(vec![
            Item::new("pen", "office").with_id("1"),
            Item::new("Pencil", "office").with_id("2"),
            Item::new("open bag", "fashion").with_id("1"),
            Item::new("mug", "kitchen"),
        ])
    }

    #[tokio::test]
    async fn test_append_then_list() {
        let store = InMemoryItemStore::new();
        let after = store.append(Item::new("pen", "office")).await.unwrap();
        assert_eq!(after.len(), 1);

        store.append(Item::new("cup", "kitchen")).await.unwrap();
        let items = store.list().await.unwrap();
        assert_eq!(items.last(), Some(&Item::new("cup", "kitchen")));
        assert_eq!(items[0].name, "pen");
    }

    #[tokio::test]
    async fn test_find_by_id_returns_first_match() {
        let store = sample();
        let item = store.find_by_id("1").await.unwrap();
        assert_eq!(item.name, "pen");
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let store = sample();
        let err = store.find_by_id("99").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        // Items without an id never match, not even the empty string.
        let err = store.find_by_id("").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_substring_search_is_case_sensitive_and_ordered() {
        let store = sample();
        let names: Vec<String> = store
            .find_by_name_substring("pen")
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["pen", "open bag"]);

        assert!(store.find_by_name_substring("xyz").await.unwrap().is_empty());
        assert_eq!(store.find_by_name_substring("").await.unwrap().len(), 4);
    }
}
