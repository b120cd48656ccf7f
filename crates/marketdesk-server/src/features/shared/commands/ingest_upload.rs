//! Upload ingestion: the one pipeline every category runs
//!
//! Per file: validate extension and shape, coerce rows, persist the raw
//! bytes, then write manifest + rows in a single transaction. Nothing is
//! committed (and no file is kept) for a rejected upload.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::features::shared::{form::FilePart, manifests, rows, Category};
use crate::features::FeatureState;
use crate::ingest::{parse_rows, read_table, ParseError};

/// One multi-file upload request for a category.
#[derive(Debug)]
pub struct IngestUploadCommand {
    pub upload_date: NaiveDate,
    pub data_date: NaiveDate,
    /// Value for the category's discriminant column.
    pub data_type: String,
    /// House name, for categories whose manifests carry one.
    pub name: Option<String>,
    pub files: Vec<FilePart>,
}

/// Per-file ingestion result.
#[derive(Debug, Clone, Serialize)]
pub struct IngestedFile {
    pub upload_id: i64,
    pub file_name: String,
    pub records_inserted: u64,
    pub file_link: String,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("No files were provided")]
    NoFiles,

    #[error("A {0} value is required")]
    MissingField(&'static str),

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

impl IngestUploadCommand {
    pub fn validate(&self, cat: &Category) -> Result<(), IngestError> {
        if self.files.is_empty() {
            return Err(IngestError::NoFiles);
        }
        if self.data_type.trim().is_empty() {
            return Err(IngestError::MissingField(cat.discriminant));
        }
        if cat.has_name && self.name.as_deref().unwrap_or("").trim().is_empty() {
            return Err(IngestError::MissingField("name"));
        }
        Ok(())
    }
}

#[tracing::instrument(skip(state, command), fields(category = cat.slug))]
pub async fn handle(
    state: &FeatureState,
    cat: &'static Category,
    command: IngestUploadCommand,
) -> Result<Vec<IngestedFile>, IngestError> {
    command.validate(cat)?;

    let mut ingested = Vec::with_capacity(command.files.len());
    for file in &command.files {
        ingested.push(
            ingest_one(
                state,
                cat,
                command.upload_date,
                command.data_date,
                &command.data_type,
                command.name.as_deref(),
                None,
                None,
                file,
            )
            .await?,
        );
    }

    Ok(ingested)
}

/// Ingest a single file: parse first, then persist to disk, then commit
/// manifest + rows atomically. Used directly by the volume_trade group
/// upload, which supplies `group_id` and `tab`.
#[allow(clippy::too_many_arguments)]
pub async fn ingest_one(
    state: &FeatureState,
    cat: &'static Category,
    upload_date: NaiveDate,
    data_date: NaiveDate,
    data_type: &str,
    name: Option<&str>,
    group_id: Option<&str>,
    tab: Option<&str>,
    file: &FilePart,
) -> Result<IngestedFile, IngestError> {
    let grid = read_table(&file.bytes, &file.file_name).map_err(|source| IngestError::Parse {
        file: file.file_name.clone(),
        source,
    })?;
    let parsed = parse_rows(cat.schema, &grid).map_err(|source| IngestError::Parse {
        file: file.file_name.clone(),
        source,
    })?;

    let stored = state.files.save(cat.slug, &file.file_name, &file.bytes).await?;

    let tags = row_tag_values(cat, name, tab);

    let result: Result<(i64, u64), sqlx::Error> = async {
        let mut tx = state.db.begin().await?;
        let upload_id = manifests::insert(
            &mut *tx,
            cat,
            manifests::NewManifest {
                upload_date,
                data_date,
                data_type,
                name,
                group_id,
                stored: &stored,
            },
        )
        .await?;
        let inserted =
            rows::insert_rows(&mut *tx, cat, upload_id, upload_date, data_date, &tags, &parsed)
                .await?;
        tx.commit().await?;
        Ok((upload_id, inserted))
    }
    .await;

    let (upload_id, records_inserted) = match result {
        Ok(ok) => ok,
        Err(e) => {
            // The file was only written for a manifest that now does not
            // exist; best-effort cleanup before surfacing the error.
            let _ = state.files.remove(&stored.path).await;
            return Err(e.into());
        },
    };

    info!(
        category = cat.slug,
        upload_id,
        rows = records_inserted,
        file = %stored.file_name,
        "Upload ingested"
    );

    Ok(IngestedFile {
        upload_id,
        file_name: stored.file_name,
        records_inserted,
        file_link: cat.file_link(upload_id),
    })
}

/// Values for the category's extra row columns, in `row_tags` order.
pub(crate) fn row_tag_values(cat: &Category, name: Option<&str>, tab: Option<&str>) -> Vec<String> {
    cat.row_tags
        .iter()
        .map(|tag| match *tag {
            "name" => name.unwrap_or_default().to_string(),
            "tab" => tab.unwrap_or_default().to_string(),
            other => {
                debug_assert!(false, "unknown row tag {other}");
                String::new()
            },
        })
        .collect()
}
