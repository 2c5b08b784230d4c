//! # Item Catalog
//!
//! **A small catalog backend: submit items, list them, look them up, and
//! serve their images.**
//!
//! Items (`name`, `category`, optional `id`, optional image) are kept in one
//! of two interchangeable stores, selected at startup:
//!
//! | Backend | Storage | Module |
//! |---------|---------|--------|
//! | `json` | One `{"items": [...]}` document, rewritten on every append | [`json_store`] |
//! | `sqlite` | One row per item in the `items` table | [`sqlite_store`] |
//!
//! Images are content-addressed: an upload is stored as `<sha256>.jpg`, so
//! identical uploads share one file ([`images`]).
//!
//! ## Quick Start
//!
//! ```bash
//! catalog init                  # create the items table / document and image dir
//! catalog serve                 # HTTP server on 0.0.0.0:9000
//! curl -F name=pen -F category=office -F image=@pen.jpg localhost:9000/items
//! curl 'localhost:9000/search?keyword=pe'
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and `FRONT_URL` override |
//! | [`db`] | SQLite connection pool |
//! | [`init`] | Storage initialization (`catalog init`) |
//! | [`backend`] | Selects the item store at startup |
//! | [`json_store`] | File-backed item store |
//! | [`sqlite_store`] | SQLite-backed item store |
//! | [`images`] | Content-addressed image store with default fallback |
//! | [`server`] | Axum HTTP server |
//! | [`items`] | CLI item commands |
//!
//! Models, hashing, the error taxonomy and the [`store::ItemStore`] trait live
//! in `item-catalog-core` and are re-exported here.

pub mod backend;
pub mod config;
pub mod db;
pub mod images;
pub mod init;
pub mod items;
pub mod json_store;
pub mod server;
pub mod sqlite_store;

pub use item_catalog_core::{hash, models, store};
pub use item_catalog_core::{Item, ItemList, StoreError, StoreResult};
