//! Content hashing for stored images.
//!
//! Images are content-addressed: the stored filename is the SHA-256 of the
//! file bytes plus a fixed extension, so identical uploads share one file.

use sha2::{Digest, Sha256};

/// Extension appended to every stored image name.
pub const IMAGE_EXTENSION: &str = ".jpg";

/// Placeholder served when a requested image does not exist.
pub const DEFAULT_IMAGE: &str = "default.jpg";

/// Lowercase hex SHA-256 digest of `bytes` (64 characters).
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Stored filename for an image with the given bytes.
pub fn image_filename(bytes: &[u8]) -> String {
    format!("{}{}", content_hash(bytes), IMAGE_EXTENSION)
}
