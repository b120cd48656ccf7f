//! Indicator snapshot queries
//!
//! The generic latest-snapshot query returns flat rows; market indicators
//! are presented as nested sections, and the frontend also pulls single
//! tabs, so both get dedicated queries over the same stored rows.

use sqlx::SqlitePool;

use super::sections::IndicatorRow;
use super::CATEGORY;
use crate::features::shared::manifests;
use crate::features::shared::queries::LatestSnapshotError;
use crate::features::shared::ManifestRow;

const ROW_SQL: &str = "SELECT tab_id, name, year_ago, current, change_percent, is_section \
                       FROM market_indicator_data WHERE upload_id = ?";

/// Latest manifest plus its typed rows, ordered for section grouping.
pub async fn latest_rows(
    pool: &SqlitePool,
) -> Result<(ManifestRow, Vec<IndicatorRow>), LatestSnapshotError> {
    let manifest = manifests::fetch_latest(pool, &CATEGORY, None, None)
        .await?
        .ok_or(LatestSnapshotError::NoUploads)?;

    let sql = format!("{ROW_SQL} ORDER BY tab_id, id");
    let rows = sqlx::query_as::<_, IndicatorRow>(&sql)
        .bind(manifest.id)
        .fetch_all(pool)
        .await?;

    if rows.is_empty() {
        return Err(LatestSnapshotError::NoRows);
    }

    Ok((manifest, rows))
}

/// One tab of the latest snapshot, flat.
pub async fn latest_tab_rows(
    pool: &SqlitePool,
    tab_id: f64,
) -> Result<(ManifestRow, Vec<IndicatorRow>), LatestSnapshotError> {
    let manifest = manifests::fetch_latest(pool, &CATEGORY, None, None)
        .await?
        .ok_or(LatestSnapshotError::NoUploads)?;

    let sql = format!("{ROW_SQL} AND tab_id = ? ORDER BY id");
    let rows = sqlx::query_as::<_, IndicatorRow>(&sql)
        .bind(manifest.id)
        .bind(tab_id)
        .fetch_all(pool)
        .await?;

    if rows.is_empty() {
        return Err(LatestSnapshotError::NoRows);
    }

    Ok((manifest, rows))
}
