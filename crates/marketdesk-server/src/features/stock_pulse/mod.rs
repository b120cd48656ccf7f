//! Stock pulse screener export (33 columns)
//!
//! The export leads with a serial-number column, which is dropped; the
//! remaining 32 are the screener fields plus the trailing pulse score.

pub mod routes;

pub use routes::routes;

use crate::features::shared::Category;
use crate::ingest::schema::{self, ColumnCount, ColumnSpec, Picks, TableSchema};

static COLUMNS: [ColumnSpec; 32] = [
    schema::text("scrip_code"),
    schema::text("scrip"),
    schema::text("co_code"),
    schema::text("isin"),
    schema::float("fv"),
    schema::float("cmp"),
    schema::float("dma_5"),
    schema::float("dma_21"),
    schema::float("dma_60"),
    schema::float("dma_245"),
    schema::float("wkh_52"),
    schema::date("wkhdt_52"),
    schema::float("wkl_52"),
    schema::date("wkldt_52"),
    schema::float("cur_vol"),
    schema::float("dvma_5"),
    schema::float("dvma_21"),
    schema::float("dvma_60"),
    schema::float("dvma_245"),
    schema::float("wkhv_52"),
    schema::date("wkhvdt_52"),
    schema::float("wklv_52"),
    schema::date("wklvdt_52"),
    schema::float("myrh"),
    schema::date("myrhdt"),
    schema::float("myrl"),
    schema::date("myrldt"),
    schema::float("myruh"),
    schema::date("myruhdt"),
    schema::float("myrul"),
    schema::date("myruldt"),
    schema::int("pulse_score"),
];

static SCHEMA: TableSchema = TableSchema {
    expected_columns: ColumnCount::Exact(33),
    picks: Picks::From(1),
    columns: &COLUMNS,
    has_header_row: false,
    section_probe: &[],
};

pub static CATEGORY: Category = Category {
    slug: "stock_pulse",
    base_path: "/stock-pulse",
    upload_table: "stock_pulse_uploads",
    data_table: "stock_pulse_data",
    discriminant: "data_type",
    has_name: false,
    has_group: false,
    row_tags: &[],
    order_by: "id",
    schema: &SCHEMA,
};
