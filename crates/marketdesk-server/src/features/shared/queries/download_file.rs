//! Resolve a manifest's stored file for download

use crate::features::shared::{manifests, Category, ManifestRow};
use crate::features::FeatureState;

#[derive(Debug, thiserror::Error)]
pub enum DownloadFileError {
    #[error("Upload {0} not found")]
    NotFound(i64),

    #[error("File not found on server")]
    FileMissing,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(state), fields(category = cat.slug))]
pub async fn handle(
    state: &FeatureState,
    cat: &'static Category,
    id: i64,
) -> Result<ManifestRow, DownloadFileError> {
    let manifest = manifests::fetch_by_id(&state.db, cat, id)
        .await?
        .ok_or(DownloadFileError::NotFound(id))?;

    if !state.files.exists(&manifest.file_path).await {
        return Err(DownloadFileError::FileMissing);
    }

    Ok(manifest)
}
