//! Industry stock-trend table (8-column export)

pub mod routes;

pub use routes::routes;

use crate::features::shared::Category;
use crate::ingest::schema::{self, ColumnCount, ColumnSpec, Picks, TableSchema};

static COLUMNS: [ColumnSpec; 8] = [
    schema::text("description"),
    schema::float("count"),
    schema::float("day"),
    schema::float("week"),
    schema::float("month"),
    schema::float("quarter"),
    schema::float("halfyear"),
    schema::float("year"),
];

static SCHEMA: TableSchema = TableSchema {
    expected_columns: ColumnCount::Exact(8),
    picks: Picks::From(0),
    columns: &COLUMNS,
    has_header_row: false,
    section_probe: &[],
};

pub static CATEGORY: Category = Category {
    slug: "industry_trend",
    base_path: "/industry-trend",
    upload_table: "industry_trend_uploads",
    data_table: "industry_trend_data",
    discriminant: "data_type",
    has_name: false,
    has_group: false,
    row_tags: &[],
    order_by: "id",
    schema: &SCHEMA,
};
