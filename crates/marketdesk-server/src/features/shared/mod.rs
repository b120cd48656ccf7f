//! Shared ingestion machinery
//!
//! The upload/list/latest/download/update/delete lifecycle is identical for
//! every category; only table names, discriminant column, extra manifest
//! columns, and the column layout vary. [`Category`] captures those
//! variations so the commands and queries here are written once.

pub mod commands;
pub mod form;
pub mod manifests;
pub mod queries;
pub mod routes;
pub mod rows;

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use crate::ingest::TableSchema;

/// Static descriptor of one spreadsheet category.
#[derive(Debug)]
pub struct Category {
    /// Storage namespace under the upload root, e.g. `ipo`.
    pub slug: &'static str,
    /// Route prefix used to derive download links, e.g. `/ipo`.
    pub base_path: &'static str,
    pub upload_table: &'static str,
    pub data_table: &'static str,
    /// Manifest column discriminating independent series: `data_type`
    /// everywhere except heatmap, which calls it `value`.
    pub discriminant: &'static str,
    /// Manifest carries a `name` column (most_valued houses).
    pub has_name: bool,
    /// Manifest carries a `group_id` column (volume_trade).
    pub has_group: bool,
    /// Extra TEXT columns stamped on every data row, filled from request
    /// context (`name` for most_valued, `tab` for volume_trade).
    pub row_tags: &'static [&'static str],
    /// Row ordering for snapshot responses.
    pub order_by: &'static str,
    pub schema: &'static TableSchema,
}

impl Category {
    pub fn file_link(&self, upload_id: i64) -> String {
        format!("{}/files/{}", self.base_path, upload_id)
    }
}

/// One upload-manifest record as stored.
///
/// The discriminant column is always selected as `data_type`; `name` and
/// `group_id` are NULL for categories without them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ManifestRow {
    pub id: i64,
    pub upload_date: NaiveDate,
    pub data_date: NaiveDate,
    pub data_type: String,
    pub name: Option<String>,
    pub group_id: Option<String>,
    pub file_name: String,
    pub file_path: String,
    pub checksum: String,
}

impl ManifestRow {
    /// Client-facing manifest JSON with the discriminant under its real
    /// column name and a derived download link. `file_path` stays internal.
    pub fn to_json(&self, cat: &Category) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        obj.insert("id".into(), serde_json::json!(self.id));
        obj.insert("upload_date".into(), serde_json::json!(self.upload_date));
        obj.insert("data_date".into(), serde_json::json!(self.data_date));
        obj.insert(cat.discriminant.into(), serde_json::json!(self.data_type));
        if cat.has_name {
            obj.insert("name".into(), serde_json::json!(self.name));
        }
        if cat.has_group {
            obj.insert("group_id".into(), serde_json::json!(self.group_id));
        }
        obj.insert("file_name".into(), serde_json::json!(self.file_name));
        obj.insert("checksum".into(), serde_json::json!(self.checksum));
        obj.insert("file_link".into(), serde_json::json!(cat.file_link(self.id)));
        serde_json::Value::Object(obj)
    }
}
