//! Volume/value/trade tabs (13-column exports)
//!
//! Three files — one per tab — are uploaded together and correlated by a
//! generated group id stamped on each manifest. Rows for all tabs share one
//! table, discriminated by `tab`; lifecycle operations address the whole
//! group.

pub mod commands;
pub mod queries;
pub mod routes;

pub use routes::routes;

use crate::features::shared::Category;
use crate::ingest::schema::{self, ColumnCount, ColumnSpec, Picks, TableSchema};

/// The three tab identifiers, doubling as manifest `data_type` values.
pub const TABS: [&str; 3] = ["volume", "value", "trade"];

pub fn is_valid_tab(tab: &str) -> bool {
    TABS.contains(&tab)
}

static COLUMNS: [ColumnSpec; 13] = [
    schema::text("company"),
    schema::text("isin"),
    schema::float("mcap"),
    schema::float("cmp"),
    schema::float("volume"),
    schema::float("spurt"),
    schema::float("chper"),
    schema::float("five_dvma"),
    schema::float("twentyone_dvma"),
    schema::float("sixty_dvma"),
    schema::float("two_four_five_dvma"),
    schema::float("five_two_wkhv"),
    schema::float("five_two_wklv"),
];

static SCHEMA: TableSchema = TableSchema {
    expected_columns: ColumnCount::Exact(13),
    picks: Picks::From(0),
    columns: &COLUMNS,
    has_header_row: false,
    section_probe: &[],
};

pub static CATEGORY: Category = Category {
    slug: "volume_trade",
    base_path: "/volume-trade",
    upload_table: "volume_trade_uploads",
    data_table: "volume_trade_data",
    discriminant: "data_type",
    has_name: false,
    has_group: true,
    row_tags: &["tab"],
    order_by: "isin, id",
    schema: &SCHEMA,
};
