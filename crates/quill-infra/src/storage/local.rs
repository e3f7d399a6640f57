//! Local-filesystem image store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use quill_core::ports::{ImageStore, StorageError};

/// Cover image formats accepted for upload.
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "avif"];

/// Image store writing files under a local uploads directory.
///
/// References have the form `uploads/<uuid>.<ext>`: the stored name is
/// freshly generated, only the extension is taken from the uploaded
/// filename.
pub struct LocalImageStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            public_prefix: "uploads".to_string(),
        }
    }

    fn extension_of(filename: &str) -> Result<&str, StorageError> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| StorageError::UnsupportedType(filename.to_string()))?;

        if ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        {
            Ok(ext)
        } else {
            Err(StorageError::UnsupportedType(ext.to_string()))
        }
    }

    /// Resolve a public reference back to a path under the root,
    /// rejecting anything that tries to escape the uploads directory.
    fn path_for(&self, reference: &str) -> Result<PathBuf, StorageError> {
        let name = reference
            .strip_prefix(&format!("{}/", self.public_prefix))
            .ok_or_else(|| StorageError::InvalidReference(reference.to_string()))?;

        if name.contains('/') || name.contains("..") {
            return Err(StorageError::InvalidReference(reference.to_string()));
        }

        Ok(self.root.join(name))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, filename: &str, data: Vec<u8>) -> Result<String, StorageError> {
        let ext = Self::extension_of(filename)?.to_ascii_lowercase();
        let name = format!("{}.{}", Uuid::new_v4(), ext);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        tokio::fs::write(self.root.join(&name), data)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        let reference = format!("{}/{}", self.public_prefix, name);
        tracing::debug!(reference = %reference, "Stored cover image");
        Ok(reference)
    }

    async fn delete(&self, reference: &str) -> Result<(), StorageError> {
        let path = self.path_for(reference)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // Already gone; deletion is idempotent.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_and_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path());

        let reference = store.store("cover.JPG", vec![1, 2, 3]).await.unwrap();
        assert!(reference.starts_with("uploads/"));
        assert!(reference.ends_with(".jpg"));

        let on_disk = dir.path().join(reference.strip_prefix("uploads/").unwrap());
        assert_eq!(tokio::fs::read(&on_disk).await.unwrap(), vec![1, 2, 3]);

        store.delete(&reference).await.unwrap();
        assert!(!on_disk.exists());

        // Deleting again is fine.
        store.delete(&reference).await.unwrap();
    }

    #[tokio::test]
    async fn rejects_non_image_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path());

        let result = store.store("payload.exe", vec![0]).await;
        assert!(matches!(result, Err(StorageError::UnsupportedType(_))));

        let result = store.store("no-extension", vec![0]).await;
        assert!(matches!(result, Err(StorageError::UnsupportedType(_))));
    }

    #[tokio::test]
    async fn rejects_traversal_references() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path());

        assert!(matches!(
            store.delete("uploads/../etc/passwd").await,
            Err(StorageError::InvalidReference(_))
        ));
        assert!(matches!(
            store.delete("somewhere/else.jpg").await,
            Err(StorageError::InvalidReference(_))
        ));
    }
}
