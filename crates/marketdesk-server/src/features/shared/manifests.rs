//! Manifest table access
//!
//! All SQL against the per-category `<category>_uploads` tables. Table and
//! column names come from the static [`Category`] descriptor; values are
//! always bound.

use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use super::{Category, ManifestRow};
use crate::storage::StoredFile;

/// New manifest values for insertion.
#[derive(Debug)]
pub struct NewManifest<'a> {
    pub upload_date: NaiveDate,
    pub data_date: NaiveDate,
    /// Value of the category's discriminant column.
    pub data_type: &'a str,
    pub name: Option<&'a str>,
    pub group_id: Option<&'a str>,
    pub stored: &'a StoredFile,
}

fn select_clause(cat: &Category) -> String {
    format!(
        "SELECT id, upload_date, data_date, {disc} AS data_type, {name} AS name, \
         {group} AS group_id, file_name, file_path, checksum FROM {table}",
        disc = cat.discriminant,
        name = if cat.has_name { "name" } else { "NULL" },
        group = if cat.has_group { "group_id" } else { "NULL" },
        table = cat.upload_table,
    )
}

/// Deterministic "latest first" ordering: upload date, then data date, then
/// highest id as the tie-break.
const LATEST_ORDER: &str = " ORDER BY upload_date DESC, data_date DESC, id DESC";

pub async fn fetch_by_id(
    pool: &SqlitePool,
    cat: &Category,
    id: i64,
) -> Result<Option<ManifestRow>, sqlx::Error> {
    let sql = format!("{} WHERE id = ?", select_clause(cat));
    sqlx::query_as::<_, ManifestRow>(&sql).bind(id).fetch_optional(pool).await
}

pub async fn fetch_latest(
    pool: &SqlitePool,
    cat: &Category,
    discriminant: Option<&str>,
    name: Option<&str>,
) -> Result<Option<ManifestRow>, sqlx::Error> {
    // a name filter only means something for categories that store one
    let name = if cat.has_name { name } else { None };

    let mut sql = format!("{} WHERE 1 = 1", select_clause(cat));
    if discriminant.is_some() {
        sql.push_str(&format!(" AND {} = ?", cat.discriminant));
    }
    if name.is_some() {
        sql.push_str(" AND name = ?");
    }
    sql.push_str(LATEST_ORDER);
    sql.push_str(" LIMIT 1");

    let mut query = sqlx::query_as::<_, ManifestRow>(&sql);
    if let Some(d) = discriminant {
        query = query.bind(d.to_string());
    }
    if let Some(n) = name {
        query = query.bind(n.to_string());
    }
    query.fetch_optional(pool).await
}

pub async fn list_all(pool: &SqlitePool, cat: &Category) -> Result<Vec<ManifestRow>, sqlx::Error> {
    let sql = format!("{}{}", select_clause(cat), LATEST_ORDER);
    sqlx::query_as::<_, ManifestRow>(&sql).fetch_all(pool).await
}

pub async fn fetch_by_group(
    pool: &SqlitePool,
    cat: &Category,
    group_id: &str,
) -> Result<Vec<ManifestRow>, sqlx::Error> {
    let sql = format!("{} WHERE group_id = ? ORDER BY id", select_clause(cat));
    sqlx::query_as::<_, ManifestRow>(&sql).bind(group_id.to_string()).fetch_all(pool).await
}

/// Insert a manifest row, returning its id.
pub async fn insert(
    conn: &mut SqliteConnection,
    cat: &Category,
    manifest: NewManifest<'_>,
) -> Result<i64, sqlx::Error> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
        "INSERT INTO {} (upload_date, data_date, {}",
        cat.upload_table, cat.discriminant
    ));
    if cat.has_name {
        qb.push(", name");
    }
    if cat.has_group {
        qb.push(", group_id");
    }
    qb.push(", file_name, file_path, checksum) VALUES (");

    let mut values = qb.separated(", ");
    values.push_bind(manifest.upload_date);
    values.push_bind(manifest.data_date);
    values.push_bind(manifest.data_type.to_string());
    if cat.has_name {
        values.push_bind(manifest.name.unwrap_or_default().to_string());
    }
    if cat.has_group {
        values.push_bind(manifest.group_id.unwrap_or_default().to_string());
    }
    values.push_bind(manifest.stored.file_name.clone());
    values.push_bind(manifest.stored.path.clone());
    values.push_bind(manifest.stored.checksum.clone());
    values.push_unseparated(")");

    let result = qb.build().execute(conn).await?;
    Ok(result.last_insert_rowid())
}

/// Rewrite the manifest's dates, discriminant, and (where present) name.
pub async fn update_meta(
    conn: &mut SqliteConnection,
    cat: &Category,
    id: i64,
    upload_date: NaiveDate,
    data_date: NaiveDate,
    data_type: &str,
    name: Option<&str>,
) -> Result<(), sqlx::Error> {
    let mut sql = format!(
        "UPDATE {} SET upload_date = ?, data_date = ?, {} = ?",
        cat.upload_table, cat.discriminant
    );
    if cat.has_name {
        sql.push_str(", name = ?");
    }
    sql.push_str(" WHERE id = ?");

    let mut query = sqlx::query(&sql)
        .bind(upload_date)
        .bind(data_date)
        .bind(data_type.to_string());
    if cat.has_name {
        query = query.bind(name.unwrap_or_default().to_string());
    }
    query.bind(id).execute(conn).await?;
    Ok(())
}

/// Point the manifest at a replacement stored file.
pub async fn update_file(
    conn: &mut SqliteConnection,
    cat: &Category,
    id: i64,
    stored: &StoredFile,
) -> Result<(), sqlx::Error> {
    let sql = format!(
        "UPDATE {} SET file_name = ?, file_path = ?, checksum = ? WHERE id = ?",
        cat.upload_table
    );
    sqlx::query(&sql)
        .bind(stored.file_name.clone())
        .bind(stored.path.clone())
        .bind(stored.checksum.clone())
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Delete a manifest row; returns the number of rows removed (0 or 1).
pub async fn delete(
    conn: &mut SqliteConnection,
    cat: &Category,
    id: i64,
) -> Result<u64, sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE id = ?", cat.upload_table);
    let result = sqlx::query(&sql).bind(id).execute(conn).await?;
    Ok(result.rows_affected())
}
