//! Market indicators (returns, indices, currencies, commodities)
//!
//! The export mixes data rows and section-divider rows ("India Stocks",
//! "Bullion", ...) in one table, per tab. Dividers are recognized at parse
//! time by their placeholder numeric cells and stored with `is_section`
//! set; the latest-snapshot endpoint regroups rows under their preceding
//! divider per tab.

pub mod queries;
pub mod routes;
pub mod sections;

pub use routes::routes;

use crate::features::shared::Category;
use crate::ingest::schema::{self, ColumnCount, ColumnSpec, Picks, TableSchema};

static COLUMNS: [ColumnSpec; 5] = [
    schema::text("name"),
    schema::float_req("year_ago"),
    schema::float_req("current"),
    schema::float_req("change_percent"),
    schema::float_req("tab_id"),
];

static SCHEMA: TableSchema = TableSchema {
    // Sheets often carry scratch columns after tab_id; they are ignored.
    expected_columns: ColumnCount::AtLeast(5),
    picks: Picks::First(5),
    columns: &COLUMNS,
    has_header_row: true,
    section_probe: &["year_ago", "current"],
};

pub static CATEGORY: Category = Category {
    slug: "market_indicators",
    base_path: "/market-indicators",
    upload_table: "market_indicator_uploads",
    data_table: "market_indicator_data",
    discriminant: "data_type",
    has_name: false,
    has_group: false,
    row_tags: &[],
    order_by: "tab_id, id",
    schema: &SCHEMA,
};
