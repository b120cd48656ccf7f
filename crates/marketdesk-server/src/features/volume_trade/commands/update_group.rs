//! Update a whole upload group: dates for every member, plus optional
//! replacement files per tab

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use super::super::CATEGORY;
use crate::features::shared::commands::update_upload::{
    self, UpdateUploadCommand, UpdateUploadError,
};
use crate::features::shared::form::FilePart;
use crate::features::shared::manifests;
use crate::features::FeatureState;

#[derive(Debug)]
pub struct UpdateGroupCommand {
    pub group_id: String,
    pub upload_date: Option<NaiveDate>,
    pub data_date: Option<NaiveDate>,
    /// Replacement files keyed by tab; tabs without a file keep their rows.
    pub tab_files: Vec<(String, FilePart)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateGroupResponse {
    pub group_id: String,
    pub files_replaced: usize,
    pub records_inserted: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateGroupError {
    #[error("Upload group {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Update(#[from] UpdateUploadError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(state, command), fields(group_id = %command.group_id))]
pub async fn handle(
    state: &FeatureState,
    command: UpdateGroupCommand,
) -> Result<UpdateGroupResponse, UpdateGroupError> {
    let uploads = manifests::fetch_by_group(&state.db, &CATEGORY, &command.group_id).await?;
    if uploads.is_empty() {
        return Err(UpdateGroupError::NotFound(command.group_id));
    }

    let mut files_replaced = 0;
    let mut records_inserted = 0u64;

    for upload in &uploads {
        // The manifest's data_type is its tab.
        let file = command
            .tab_files
            .iter()
            .find(|(tab, _)| *tab == upload.data_type)
            .map(|(_, file)| file.clone());
        if file.is_some() {
            files_replaced += 1;
        }

        let updated = update_upload::handle(
            state,
            &CATEGORY,
            UpdateUploadCommand {
                id: upload.id,
                upload_date: command.upload_date,
                data_date: command.data_date,
                data_type: None,
                name: None,
                file,
            },
        )
        .await?;
        records_inserted += updated.records_inserted;
    }

    info!(
        group_id = %command.group_id,
        files_replaced,
        records_inserted,
        "Upload group updated"
    );

    Ok(UpdateGroupResponse {
        group_id: command.group_id,
        files_replaced,
        records_inserted,
    })
}
