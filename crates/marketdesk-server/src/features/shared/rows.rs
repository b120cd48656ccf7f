//! Data-row table access
//!
//! Bulk insert, delete, re-tag, and snapshot fetch against the per-category
//! `<category>_data` tables, driven entirely by the category schema.

use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool};

use super::Category;
use crate::ingest::{CellValue, ColumnType, ParsedRow, RowKind};

/// Keep bound parameters per statement well under SQLite's limit; the widest
/// layout (IPO) binds ~50 values per row.
const INSERT_CHUNK: usize = 200;

/// Bulk-insert parsed rows for one manifest.
///
/// `tags` are the values for `Category::row_tags`, in the same order.
pub async fn insert_rows(
    conn: &mut SqliteConnection,
    cat: &Category,
    upload_id: i64,
    upload_date: NaiveDate,
    data_date: NaiveDate,
    tags: &[String],
    rows: &[ParsedRow],
) -> Result<u64, sqlx::Error> {
    debug_assert_eq!(tags.len(), cat.row_tags.len());

    let mut columns = String::from("upload_id, upload_date, data_date");
    if cat.schema.has_section_rows() {
        columns.push_str(", is_section");
    }
    for tag in cat.row_tags {
        columns.push_str(", ");
        columns.push_str(tag);
    }
    for col in cat.schema.columns {
        columns.push_str(", \"");
        columns.push_str(col.name);
        columns.push('"');
    }

    let mut inserted = 0u64;
    for chunk in rows.chunks(INSERT_CHUNK) {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("INSERT INTO {} ({}) ", cat.data_table, columns));

        qb.push_values(chunk, |mut b, row| {
            b.push_bind(upload_id);
            b.push_bind(upload_date);
            b.push_bind(data_date);
            if cat.schema.has_section_rows() {
                b.push_bind(row.kind == RowKind::SectionHeader);
            }
            for tag in tags {
                b.push_bind(tag.clone());
            }
            for value in &row.values {
                match value {
                    CellValue::Null => b.push_bind(Option::<String>::None),
                    CellValue::Float(f) => b.push_bind(*f),
                    CellValue::Int(i) => b.push_bind(*i),
                    CellValue::Text(s) => b.push_bind(s.clone()),
                    CellValue::Date(d) => b.push_bind(*d),
                };
            }
        });

        let result = qb.build().execute(&mut *conn).await?;
        inserted += result.rows_affected();
    }

    Ok(inserted)
}

/// Delete every row belonging to a manifest; returns the count removed.
pub async fn delete_rows(
    conn: &mut SqliteConnection,
    cat: &Category,
    upload_id: i64,
) -> Result<u64, sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE upload_id = ?", cat.data_table);
    let result = sqlx::query(&sql).bind(upload_id).execute(conn).await?;
    Ok(result.rows_affected())
}

/// Rewrite the date tags on a manifest's rows after a dates-only update, so
/// manifest and rows can never disagree.
pub async fn retag_rows(
    conn: &mut SqliteConnection,
    cat: &Category,
    upload_id: i64,
    upload_date: NaiveDate,
    data_date: NaiveDate,
) -> Result<(), sqlx::Error> {
    let sql = format!(
        "UPDATE {} SET upload_date = ?, data_date = ? WHERE upload_id = ?",
        cat.data_table
    );
    sqlx::query(&sql)
        .bind(upload_date)
        .bind(data_date)
        .bind(upload_id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Fetch a manifest's rows as JSON objects in snapshot order.
pub async fn fetch_rows(
    pool: &SqlitePool,
    cat: &Category,
    upload_id: i64,
) -> Result<Vec<serde_json::Value>, sqlx::Error> {
    let sql = format!(
        "SELECT * FROM {} WHERE upload_id = ? ORDER BY {}",
        cat.data_table, cat.order_by
    );
    let rows = sqlx::query(&sql).bind(upload_id).fetch_all(pool).await?;

    rows.iter().map(|row| row_to_json(cat, row)).collect()
}

fn row_to_json(cat: &Category, row: &SqliteRow) -> Result<serde_json::Value, sqlx::Error> {
    let mut obj = serde_json::Map::new();

    obj.insert("id".into(), serde_json::json!(row.try_get::<i64, _>("id")?));
    obj.insert(
        "upload_date".into(),
        serde_json::json!(row.try_get::<NaiveDate, _>("upload_date")?),
    );
    obj.insert(
        "data_date".into(),
        serde_json::json!(row.try_get::<NaiveDate, _>("data_date")?),
    );
    if cat.schema.has_section_rows() {
        obj.insert(
            "is_section".into(),
            serde_json::json!(row.try_get::<bool, _>("is_section")?),
        );
    }
    for tag in cat.row_tags {
        obj.insert((*tag).into(), serde_json::json!(row.try_get::<String, _>(tag)?));
    }
    for col in cat.schema.columns {
        let value = match col.ty {
            ColumnType::Text => serde_json::json!(row.try_get::<Option<String>, _>(col.name)?),
            ColumnType::Float => serde_json::json!(row.try_get::<Option<f64>, _>(col.name)?),
            ColumnType::Int => serde_json::json!(row.try_get::<Option<i64>, _>(col.name)?),
            ColumnType::Date => serde_json::json!(row.try_get::<Option<NaiveDate>, _>(col.name)?),
        };
        obj.insert(col.name.into(), value);
    }

    Ok(serde_json::Value::Object(obj))
}
