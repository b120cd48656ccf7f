//! Local filesystem store for uploaded spreadsheets
//!
//! Files live under `<root>/<category>/` with collision-resistant generated
//! names so re-uploads of the same export never overwrite each other.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, instrument};
use uuid::Uuid;

use marketdesk_common::checksum::checksum_bytes;

/// Result of persisting one uploaded file.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Generated on-disk name, also reported back to clients.
    pub file_name: String,
    /// Full path as stored on the manifest.
    pub path: String,
    /// SHA-256 of the file content.
    pub checksum: String,
    pub size: u64,
}

/// Handle to the upload directory tree.
#[derive(Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure the root directory exists.
    pub async fn init(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("Failed to create upload root {}", self.root.display()))?;
        Ok(())
    }

    /// Persist raw upload bytes under the category's directory.
    ///
    /// The stored name is `<today>_<uuid>_<original-basename>`; the original
    /// name is kept only as a suffix so operators can still recognize files.
    #[instrument(skip(self, bytes), fields(category = %category, size = bytes.len()))]
    pub async fn save(&self, category: &str, original_name: &str, bytes: &[u8]) -> Result<StoredFile> {
        let dir = self.root.join(category);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create upload directory {}", dir.display()))?;

        let file_name = format!(
            "{}_{}_{}",
            Utc::now().date_naive(),
            Uuid::new_v4(),
            sanitize_name(original_name)
        );
        let path = dir.join(&file_name);

        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write upload to {}", path.display()))?;

        debug!(path = %path.display(), "Upload persisted");

        Ok(StoredFile {
            file_name,
            path: path.to_string_lossy().into_owned(),
            checksum: checksum_bytes(bytes),
            size: bytes.len() as u64,
        })
    }

    /// Remove a stored file. Returns `false` when the file was already gone.
    pub async fn remove(&self, path: &str) -> Result<bool> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path)),
        }
    }

    /// Whether a stored file still exists on disk.
    pub async fn exists(&self, path: &str) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    /// Open a stored file for streaming back to a client.
    pub async fn open(&self, path: &str) -> std::io::Result<tokio::fs::File> {
        tokio::fs::File::open(path).await
    }
}

/// Strip any path components from a client-supplied filename.
fn sanitize_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    if base.is_empty() {
        "upload".to_string()
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.init().await.unwrap();

        let stored = store.save("ipo", "master.csv", b"a,b,c\n").await.unwrap();
        assert!(stored.file_name.ends_with("master.csv"));
        assert!(store.exists(&stored.path).await);
        assert_eq!(stored.size, 6);
        assert_eq!(stored.checksum, checksum_bytes(b"a,b,c\n"));

        assert!(store.remove(&stored.path).await.unwrap());
        assert!(!store.exists(&stored.path).await);
        // second removal reports the file as already gone
        assert!(!store.remove(&stored.path).await.unwrap());
    }

    #[tokio::test]
    async fn test_two_saves_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.init().await.unwrap();

        let a = store.save("heatmap", "export.csv", b"1").await.unwrap();
        let b = store.save("heatmap", "export.csv", b"2").await.unwrap();
        assert_ne!(a.path, b.path);
    }

    #[test]
    fn test_sanitize_name_strips_directories() {
        assert_eq!(sanitize_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_name("C:\\exports\\q1.xlsx"), "q1.xlsx");
        assert_eq!(sanitize_name("plain.csv"), "plain.csv");
        assert_eq!(sanitize_name(""), "upload");
    }
}
