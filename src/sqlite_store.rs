//! SQLite-backed [`ItemStore`] implementation.
//!
//! Maps each [`ItemStore`] operation onto the `items` table:
//!
//! ```sql
//! CREATE TABLE items (id TEXT, name TEXT NOT NULL, category TEXT NOT NULL, image_name TEXT)
//! ```
//!
//! Insertion order is `rowid` order. Substring search uses `instr()` rather
//! than `LIKE`, which would be case-insensitive for ASCII and would treat
//! `%` and `_` in the keyword as wildcards.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use item_catalog_core::store::ItemStore;
use item_catalog_core::{Item, StoreError, StoreResult};

/// SQLite implementation of the [`ItemStore`] trait.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_item(row: &SqliteRow) -> StoreResult<Item> {
    Ok(Item {
        id: row.try_get("id").map_err(StoreError::corrupt)?,
        name: row.try_get("name").map_err(StoreError::corrupt)?,
        category: row.try_get("category").map_err(StoreError::corrupt)?,
        image: row.try_get("image_name").map_err(StoreError::corrupt)?,
    })
}

fn rows_to_items(rows: &[SqliteRow]) -> StoreResult<Vec<Item>> {
    rows.iter().map(row_to_item).collect()
}

#[async_trait]
impl ItemStore for SqliteStore {
    async fn list(&self) -> StoreResult<Vec<Item>> {
        let rows = sqlx::query("SELECT id, name, category, image_name FROM items ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::unavailable)?;
        rows_to_items(&rows)
    }

    async fn append(&self, item: Item) -> StoreResult<Vec<Item>> {
        sqlx::query("INSERT INTO items (id, name, category, image_name) VALUES (?, ?, ?, ?)")
            .bind(&item.id)
            .bind(&item.name)
            .bind(&item.category)
            .bind(&item.image)
            .execute(&self.pool)
            .await
            .map_err(StoreError::unavailable)?;

        self.list().await
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Item> {
        let row = sqlx::query(
            "SELECT id, name, category, image_name FROM items WHERE id = ? ORDER BY rowid LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::unavailable)?;

        match row {
            Some(row) => row_to_item(&row),
            None => Err(StoreError::NotFound(format!("item {}", id))),
        }
    }

    async fn find_by_name_substring(&self, keyword: &str) -> StoreResult<Vec<Item>> {
        let rows = sqlx::query(
            "SELECT id, name, category, image_name FROM items WHERE instr(name, ?) > 0 ORDER BY rowid",
        )
        .bind(keyword)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::unavailable)?;
        rows_to_items(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::{db, init};
    use tempfile::TempDir;

    fn test_config(tmp: &TempDir) -> Config {
        let mut cfg = Config::default();
        cfg.db.path = tmp.path().join("data").join("items.sqlite3");
        cfg
    }

    async fn ready_store(tmp: &TempDir) -> SqliteStore {
        let cfg = test_config(tmp);
        init::create_items_table(&cfg).await.unwrap();
        SqliteStore::new(db::connect(&cfg).await.unwrap())
    }

    #[tokio::test]
    async fn test_missing_table_is_unavailable() {
        let tmp = TempDir::new().unwrap();
        let store = SqliteStore::new(db::connect(&test_config(&tmp)).await.unwrap());
        assert!(matches!(
            store.list().await.unwrap_err(),
            StoreError::StorageUnavailable(_)
        ));
    }

    #[tokio::test]
    async fn test_append_then_list_in_order() {
        let tmp = TempDir::new().unwrap();
        let store = ready_store(&tmp).await;

        store.append(Item::new("pen", "office")).await.unwrap();
        let after = store
            .append(Item::new("jacket", "fashion").with_id("7").with_image("ab.jpg"))
            .await
            .unwrap();

        assert_eq!(after.len(), 2);
        assert_eq!(after[0], Item::new("pen", "office"));
        assert_eq!(after[1].id.as_deref(), Some("7"));
        assert_eq!(after[1].image.as_deref(), Some("ab.jpg"));
    }

    #[tokio::test]
    async fn test_duplicate_ids_return_first() {
        let tmp = TempDir::new().unwrap();
        let store = ready_store(&tmp).await;
        store.append(Item::new("first", "x").with_id("1")).await.unwrap();
        store.append(Item::new("second", "x").with_id("1")).await.unwrap();

        assert_eq!(store.find_by_id("1").await.unwrap().name, "first");
        assert!(matches!(
            store.find_by_id("2").await.unwrap_err(),
            StoreError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_search_matches_file_semantics() {
        let tmp = TempDir::new().unwrap();
        let store = ready_store(&tmp).await;
        for name in ["pen", "PEN", "open", "100%_cotton", "mug"] {
            store.append(Item::new(name, "misc")).await.unwrap();
        }

        let names = |items: Vec<Item>| items.into_iter().map(|i| i.name).collect::<Vec<_>>();

        assert_eq!(
            names(store.find_by_name_substring("pe").await.unwrap()),
            vec!["pen", "open"]
        );
        assert_eq!(
            names(store.find_by_name_substring("%_").await.unwrap()),
            vec!["100%_cotton"]
        );
        assert!(store.find_by_name_substring("xyz").await.unwrap().is_empty());
    }
}
