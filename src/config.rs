//! Configuration parsing and validation.
//!
//! Item Catalog is configured via an optional TOML file passed with
//! `--config`. Every field has a default, so a missing flag (or an empty
//! file) yields a working local setup.
//!
//! # Example
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:9000"
//! front_url = "http://localhost:3000"
//! max_upload_bytes = 33554432   # request body limit for POST /items
//!
//! [storage]
//! backend = "sqlite"            # or "json"
//! items_path = "db/items.json"  # used by the json backend
//!
//! [db]
//! path = "db/mercari.sqlite3"   # used by the sqlite backend
//!
//! [images]
//! dir = "images"
//! ```
//!
//! The `FRONT_URL` environment variable, when set and non-empty, overrides
//! `server.front_url`.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding [`ServerConfig::front_url`].
pub const FRONT_URL_ENV: &str = "FRONT_URL";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub db: DbConfig,
    #[serde(default)]
    pub images: ImagesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// The single origin allowed to make cross-origin requests.
    #[serde(default = "default_front_url")]
    pub front_url: String,
    /// Largest accepted request body, image upload included.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            front_url: default_front_url(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:9000".to_string()
}
fn default_front_url() -> String {
    "http://localhost:3000".to_string()
}
fn default_max_upload_bytes() -> usize {
    32 * 1024 * 1024
}

/// Which [`ItemStore`](item_catalog_core::ItemStore) implementation to use.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Whole collection in one JSON document.
    Json,
    /// One row per item in the `items` table.
    #[default]
    Sqlite,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_items_path")]
    pub items_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            items_path: default_items_path(),
        }
    }
}

fn default_items_path() -> PathBuf {
    PathBuf::from("db/items.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("db/mercari.sqlite3")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImagesConfig {
    #[serde(default = "default_images_dir")]
    pub dir: PathBuf,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            dir: default_images_dir(),
        }
    }
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}

impl Config {
    /// Applies environment overrides on top of file or default values.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(FRONT_URL_ENV) {
            if !url.is_empty() {
                self.server.front_url = url;
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server.bind.trim().is_empty() {
            bail!("server.bind must not be empty");
        }
        if self.server.front_url.trim().is_empty() {
            bail!("server.front_url must not be empty");
        }
        if self.server.max_upload_bytes == 0 {
            bail!("server.max_upload_bytes must be > 0");
        }
        Ok(())
    }
}

/// Parses a TOML configuration string and validates it.
///
/// Environment overrides are not applied here; see [`load_config`].
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    config.validate()?;
    Ok(config)
}

/// Loads the configuration from `path`, or defaults when `path` is `None`,
/// then applies environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            parse_config(&content)?
        }
        None => Config::default(),
    };
    config.apply_env();
    config.validate()?;
    Ok(config)
}
