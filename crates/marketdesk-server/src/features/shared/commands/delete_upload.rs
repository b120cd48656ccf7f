//! Manifest deletion: rows, manifest record, and stored file go together

use serde::Serialize;
use tracing::info;

use crate::features::shared::{manifests, rows, Category};
use crate::features::FeatureState;

#[derive(Debug, Clone, Serialize)]
pub struct DeleteUploadResponse {
    pub upload_id: i64,
    pub rows_deleted: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteUploadError {
    #[error("Upload {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(state), fields(category = cat.slug))]
pub async fn handle(
    state: &FeatureState,
    cat: &'static Category,
    id: i64,
) -> Result<DeleteUploadResponse, DeleteUploadError> {
    let manifest = manifests::fetch_by_id(&state.db, cat, id)
        .await?
        .ok_or(DeleteUploadError::NotFound(id))?;

    let mut tx = state.db.begin().await?;
    let rows_deleted = rows::delete_rows(&mut *tx, cat, manifest.id).await?;
    manifests::delete(&mut *tx, cat, manifest.id).await?;
    tx.commit().await?;

    // DB state is authoritative; a failed unlink only leaks a file.
    let _ = state.files.remove(&manifest.file_path).await;

    info!(category = cat.slug, upload_id = id, rows_deleted, "Upload deleted");

    Ok(DeleteUploadResponse { upload_id: id, rows_deleted })
}
