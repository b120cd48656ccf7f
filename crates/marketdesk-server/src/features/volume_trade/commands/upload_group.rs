//! Upload the volume/value/trade tab trio as one correlated group
//!
//! Each file runs the normal single-file pipeline; they share one generated
//! group id. Group atomicity across files is deliberately not provided —
//! each file commits on its own, matching the manual-upload workflow.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::super::{is_valid_tab, CATEGORY};
use crate::features::shared::commands::ingest_upload::{ingest_one, IngestedFile};
use crate::features::shared::commands::IngestError;
use crate::features::shared::form::FilePart;
use crate::features::FeatureState;

#[derive(Debug)]
pub struct UploadGroupCommand {
    pub upload_date: NaiveDate,
    pub data_date: NaiveDate,
    /// `(tab, file)` pairs built from the parallel `files` / `data_types`
    /// form lists.
    pub entries: Vec<(String, FilePart)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadGroupResponse {
    pub group_id: String,
    pub files: Vec<IngestedFile>,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadGroupError {
    #[error("No files were provided")]
    NoFiles,

    #[error("Number of files and data_types must match")]
    MismatchedLists,

    #[error("Invalid data_type: {0}")]
    InvalidTab(String),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

impl UploadGroupCommand {
    pub fn validate(&self) -> Result<(), UploadGroupError> {
        if self.entries.is_empty() {
            return Err(UploadGroupError::NoFiles);
        }
        for (tab, _) in &self.entries {
            if !is_valid_tab(tab) {
                return Err(UploadGroupError::InvalidTab(tab.clone()));
            }
        }
        Ok(())
    }
}

#[tracing::instrument(skip(state, command))]
pub async fn handle(
    state: &FeatureState,
    command: UploadGroupCommand,
) -> Result<UploadGroupResponse, UploadGroupError> {
    command.validate()?;

    let group_id = Uuid::new_v4().to_string();

    let mut files = Vec::with_capacity(command.entries.len());
    for (tab, file) in &command.entries {
        files.push(
            ingest_one(
                state,
                &CATEGORY,
                command.upload_date,
                command.data_date,
                tab,
                None,
                Some(&group_id),
                Some(tab),
                file,
            )
            .await?,
        );
    }

    info!(group_id = %group_id, files = files.len(), "Upload group ingested");

    Ok(UploadGroupResponse { group_id, files })
}
