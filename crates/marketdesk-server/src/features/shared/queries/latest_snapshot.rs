//! Latest-snapshot resolution
//!
//! The latest manifest is the one with the greatest `(upload_date,
//! data_date)`, tie-broken by highest id, optionally pre-filtered by the
//! category's discriminant and/or house name. Its rows are returned
//! verbatim; a manifest that resolved but has no rows reads as "no data".

use sqlx::SqlitePool;

use crate::features::shared::{manifests, rows, Category, ManifestRow};

/// Optional filters narrowing which series "latest" refers to.
#[derive(Debug, Default)]
pub struct LatestQuery {
    /// Discriminant value (`data_type`, or `value` for heatmap).
    pub discriminant: Option<String>,
    /// House name (most_valued).
    pub name: Option<String>,
}

#[derive(Debug)]
pub struct LatestSnapshot {
    pub manifest: ManifestRow,
    pub rows: Vec<serde_json::Value>,
}

impl LatestSnapshot {
    /// Snapshot envelope: dates and discriminant from the manifest plus the
    /// row payload.
    pub fn to_json(&self, cat: &Category) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        obj.insert("upload_date".into(), serde_json::json!(self.manifest.upload_date));
        obj.insert("data_date".into(), serde_json::json!(self.manifest.data_date));
        obj.insert(cat.discriminant.into(), serde_json::json!(self.manifest.data_type));
        if cat.has_name {
            obj.insert("name".into(), serde_json::json!(self.manifest.name));
        }
        obj.insert("rows".into(), serde_json::json!(self.rows));
        serde_json::Value::Object(obj)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LatestSnapshotError {
    #[error("No uploads found")]
    NoUploads,

    #[error("No data rows found for the latest upload")]
    NoRows,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(pool), fields(category = cat.slug))]
pub async fn handle(
    pool: &SqlitePool,
    cat: &'static Category,
    query: LatestQuery,
) -> Result<LatestSnapshot, LatestSnapshotError> {
    let manifest =
        manifests::fetch_latest(pool, cat, query.discriminant.as_deref(), query.name.as_deref())
            .await?
            .ok_or(LatestSnapshotError::NoUploads)?;

    let rows = rows::fetch_rows(pool, cat, manifest.id).await?;
    if rows.is_empty() {
        return Err(LatestSnapshotError::NoRows);
    }

    Ok(LatestSnapshot { manifest, rows })
}
