//! Manifest update: replace the file and/or its dates
//!
//! A new file fully replaces the manifest's row set. A dates-only change
//! rewrites both the manifest and its rows' date tags in one transaction.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::features::shared::{form::FilePart, manifests, rows, Category};
use crate::features::FeatureState;
use crate::ingest::{parse_rows, read_table, ParseError};

#[derive(Debug)]
pub struct UpdateUploadCommand {
    pub id: i64,
    pub upload_date: Option<NaiveDate>,
    pub data_date: Option<NaiveDate>,
    pub data_type: Option<String>,
    pub name: Option<String>,
    pub file: Option<FilePart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateUploadResponse {
    pub upload_id: i64,
    pub file_name: String,
    pub upload_date: NaiveDate,
    pub data_date: NaiveDate,
    pub records_inserted: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateUploadError {
    #[error("Upload {0} not found")]
    NotFound(i64),

    #[error("{file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: ParseError,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(state, command), fields(category = cat.slug, upload_id = command.id))]
pub async fn handle(
    state: &FeatureState,
    cat: &'static Category,
    command: UpdateUploadCommand,
) -> Result<UpdateUploadResponse, UpdateUploadError> {
    let manifest = manifests::fetch_by_id(&state.db, cat, command.id)
        .await?
        .ok_or(UpdateUploadError::NotFound(command.id))?;

    let upload_date = command.upload_date.unwrap_or(manifest.upload_date);
    let data_date = command.data_date.unwrap_or(manifest.data_date);
    let data_type = command.data_type.clone().unwrap_or_else(|| manifest.data_type.clone());
    let name = command.name.clone().or_else(|| manifest.name.clone());

    let mut records_inserted = 0u64;
    let mut file_name = manifest.file_name.clone();

    if let Some(ref file) = command.file {
        // Parse before touching anything so a bad replacement file leaves
        // the previous upload fully intact.
        let grid = read_table(&file.bytes, &file.file_name).map_err(|source| {
            UpdateUploadError::Parse { file: file.file_name.clone(), source }
        })?;
        let parsed = parse_rows(cat.schema, &grid).map_err(|source| UpdateUploadError::Parse {
            file: file.file_name.clone(),
            source,
        })?;

        let stored = state.files.save(cat.slug, &file.file_name, &file.bytes).await?;
        let tags = super::ingest_upload::row_tag_values(
            cat,
            name.as_deref(),
            // volume_trade rows tag their manifest's tab
            Some(data_type.as_str()),
        );

        let result: Result<u64, sqlx::Error> = async {
            let mut tx = state.db.begin().await?;
            manifests::update_meta(
                &mut *tx,
                cat,
                manifest.id,
                upload_date,
                data_date,
                &data_type,
                name.as_deref(),
            )
            .await?;
            manifests::update_file(&mut *tx, cat, manifest.id, &stored).await?;
            rows::delete_rows(&mut *tx, cat, manifest.id).await?;
            let inserted = rows::insert_rows(
                &mut *tx,
                cat,
                manifest.id,
                upload_date,
                data_date,
                &tags,
                &parsed,
            )
            .await?;
            tx.commit().await?;
            Ok(inserted)
        }
        .await;

        records_inserted = match result {
            Ok(n) => n,
            Err(e) => {
                let _ = state.files.remove(&stored.path).await;
                return Err(e.into());
            },
        };

        // The old file only becomes garbage once the transaction commits.
        let _ = state.files.remove(&manifest.file_path).await;
        file_name = stored.file_name;
    } else {
        let mut tx = state.db.begin().await?;
        manifests::update_meta(
            &mut *tx,
            cat,
            manifest.id,
            upload_date,
            data_date,
            &data_type,
            name.as_deref(),
        )
        .await?;
        rows::retag_rows(&mut *tx, cat, manifest.id, upload_date, data_date).await?;
        tx.commit().await?;
    }

    info!(
        category = cat.slug,
        upload_id = manifest.id,
        rows = records_inserted,
        replaced_file = command.file.is_some(),
        "Upload updated"
    );

    Ok(UpdateUploadResponse {
        upload_id: manifest.id,
        file_name,
        upload_date,
        data_date,
        records_inserted,
    })
}
