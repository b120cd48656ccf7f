//! Most-valued rankings (8-column export, one series per house)
//!
//! Manifests and rows both carry the house `name`; `GET /latest?name=` picks
//! a single house's series.

pub mod routes;

pub use routes::routes;

use crate::features::shared::Category;
use crate::ingest::schema::{self, ColumnCount, ColumnSpec, Picks, TableSchema};

static COLUMNS: [ColumnSpec; 8] = [
    schema::text("company"),
    schema::float_req("day"),
    schema::float_req("week"),
    schema::float_req("month"),
    schema::float_req("quarter"),
    schema::float_req("halfyear"),
    schema::float_req("year"),
    schema::float_req("threeyear"),
];

static SCHEMA: TableSchema = TableSchema {
    expected_columns: ColumnCount::Exact(8),
    picks: Picks::From(0),
    columns: &COLUMNS,
    has_header_row: false,
    section_probe: &[],
};

pub static CATEGORY: Category = Category {
    slug: "most_valued",
    base_path: "/most-valued",
    upload_table: "most_valued_uploads",
    data_table: "most_valued_data",
    discriminant: "data_type",
    has_name: true,
    has_group: false,
    row_tags: &["name"],
    order_by: "id",
    schema: &SCHEMA,
};
