//! Delete a whole upload group: rows, manifests, and stored files for all
//! three tabs

use serde::Serialize;
use tracing::info;

use super::super::CATEGORY;
use crate::features::shared::commands::delete_upload::{self, DeleteUploadError};
use crate::features::shared::manifests;
use crate::features::FeatureState;

#[derive(Debug, Clone, Serialize)]
pub struct DeleteGroupResponse {
    pub group_id: String,
    pub uploads_deleted: usize,
    pub rows_deleted: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteGroupError {
    #[error("Upload group {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Delete(#[from] DeleteUploadError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(state))]
pub async fn handle(
    state: &FeatureState,
    group_id: &str,
) -> Result<DeleteGroupResponse, DeleteGroupError> {
    let uploads = manifests::fetch_by_group(&state.db, &CATEGORY, group_id).await?;
    if uploads.is_empty() {
        return Err(DeleteGroupError::NotFound(group_id.to_string()));
    }

    let mut rows_deleted = 0u64;
    for upload in &uploads {
        let deleted = delete_upload::handle(state, &CATEGORY, upload.id).await?;
        rows_deleted += deleted.rows_deleted;
    }

    info!(group_id, uploads = uploads.len(), rows_deleted, "Upload group deleted");

    Ok(DeleteGroupResponse {
        group_id: group_id.to_string(),
        uploads_deleted: uploads.len(),
        rows_deleted,
    })
}
