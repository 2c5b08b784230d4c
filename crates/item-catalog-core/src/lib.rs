//! # Item Catalog Core
//!
//! Shared, I/O-free logic for Item Catalog: item models, the content
//! hasher used to name stored images, the storage error taxonomy, and the
//! [`store::ItemStore`] trait implemented by every backend.
//!
//! This crate contains no tokio, sqlx, or filesystem dependencies. The
//! file- and SQLite-backed stores live in the `item-catalog` crate.

pub mod error;
pub mod hash;
pub mod models;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use models::{Item, ItemList};
pub use store::ItemStore;
