//! Content-addressed image storage.
//!
//! Images are stored flat in one directory as `<sha256>.jpg`, named by the
//! hash of their own bytes. Writing the same bytes twice is a no-op.
//! Requests for a missing (but well-formed) name are served the
//! `default.jpg` placeholder from the same directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use item_catalog_core::hash::{image_filename, DEFAULT_IMAGE, IMAGE_EXTENSION};
use item_catalog_core::{StoreError, StoreResult};

/// Image directory handle.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stores `bytes` under their content hash and returns the filename.
    ///
    /// An existing file with the same name is taken as already stored and
    /// is not compared or rewritten.
    pub async fn store(&self, bytes: &[u8]) -> StoreResult<String> {
        let filename = image_filename(bytes);
        let path = self.dir.join(&filename);

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            StoreError::StorageUnavailable(format!("{}: {}", self.dir.display(), e))
        })?;

        let created = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;

        match created {
            Ok(mut file) => {
                let write_err = |e: std::io::Error| {
                    StoreError::StorageUnavailable(format!("{}: {}", path.display(), e))
                };
                file.write_all(bytes).await.map_err(write_err)?;
                file.flush().await.map_err(write_err)?;
                tracing::info!(image = %filename, bytes = bytes.len(), "stored image");
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!(image = %filename, "image already stored");
            }
            Err(e) => {
                return Err(StoreError::StorageUnavailable(format!(
                    "{}: {}",
                    path.display(),
                    e
                )));
            }
        }

        Ok(filename)
    }

    /// Maps a requested filename to the file to serve.
    ///
    /// The name must end in `.jpg` and must not contain a path separator.
    /// A missing file resolves to the default placeholder.
    pub async fn resolve(&self, requested: &str) -> StoreResult<PathBuf> {
        if !requested.ends_with(IMAGE_EXTENSION) {
            return Err(StoreError::InvalidRequest(
                "Image path does not end with .jpg".to_string(),
            ));
        }
        if requested.contains('/') || requested.contains('\\') {
            return Err(StoreError::InvalidRequest(format!(
                "invalid image name: {}",
                requested
            )));
        }

        let path = self.dir.join(requested);
        match tokio::fs::try_exists(&path).await {
            Ok(true) => Ok(path),
            _ => {
                tracing::debug!(image = %path.display(), "image not found, serving default");
                Ok(self.dir.join(DEFAULT_IMAGE))
            }
        }
    }

    /// Resolves `requested` and reads the file it maps to.
    ///
    /// Fails with `NotFound` only when the default placeholder is missing
    /// as well.
    pub async fn read(&self, requested: &str) -> StoreResult<Vec<u8>> {
        let path = self.resolve(requested).await?;
        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound(format!("image {}", requested)),
            _ => StoreError::StorageUnavailable(format!("{}: {}", path.display(), e)),
        })
    }
}
