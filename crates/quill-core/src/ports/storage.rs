//! Image storage port.

use async_trait::async_trait;

/// Image store: holds cover images and hands back opaque references.
///
/// The post handlers use this purely as a pass-through: store the new
/// cover when one is supplied, best-effort delete the replaced one.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store image bytes under a fresh reference. The original filename
    /// is used only to derive the extension.
    async fn store(&self, filename: &str, data: Vec<u8>) -> Result<String, StorageError>;

    /// Delete a previously stored image by its reference.
    async fn delete(&self, reference: &str) -> Result<(), StorageError>;
}

/// Image storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("Invalid image reference: {0}")]
    InvalidReference(String),

    #[error("I/O error: {0}")]
    Io(String),
}
