//! IPO heatmap: two small series uploaded separately
//!
//! - **yearwise**: one row per year (count, raised value, market value,
//!   change percent)
//! - **companies**: one row per listed company (offer price, current price,
//!   value gained)

pub mod routes;

pub use routes::{company_routes, yearwise_routes};

use crate::features::shared::Category;
use crate::ingest::schema::{self, ColumnCount, ColumnSpec, Picks, TableSchema};

static YEARWISE_COLUMNS: [ColumnSpec; 5] = [
    schema::int("year"),
    schema::int("cos"),
    schema::float("ipo_value"),
    schema::float("market_value"),
    schema::float("ch_per"),
];

static YEARWISE_SCHEMA: TableSchema = TableSchema {
    expected_columns: ColumnCount::Exact(5),
    picks: Picks::From(0),
    columns: &YEARWISE_COLUMNS,
    has_header_row: false,
    section_probe: &[],
};

pub static YEARWISE: Category = Category {
    slug: "ipo_heatmap_yearwise",
    base_path: "/ipo-heatmap/yearwise",
    upload_table: "ipo_heatmap_year_uploads",
    data_table: "ipo_heatmap_year_data",
    discriminant: "data_type",
    has_name: false,
    has_group: false,
    row_tags: &[],
    order_by: "year, id",
    schema: &YEARWISE_SCHEMA,
};

static COMPANY_COLUMNS: [ColumnSpec; 7] = [
    schema::text("company"),
    schema::date("iss_open"),
    schema::float("offer_price"),
    schema::float("cmp"),
    schema::float("ipo_value"),
    schema::float("cur_value"),
    schema::float("gain_per"),
];

static COMPANY_SCHEMA: TableSchema = TableSchema {
    expected_columns: ColumnCount::Exact(7),
    picks: Picks::From(0),
    columns: &COMPANY_COLUMNS,
    has_header_row: false,
    section_probe: &[],
};

pub static COMPANIES: Category = Category {
    slug: "ipo_heatmap_companies",
    base_path: "/ipo-heatmap/companies",
    upload_table: "ipo_heatmap_company_uploads",
    data_table: "ipo_heatmap_company_data",
    discriminant: "data_type",
    has_name: false,
    has_group: false,
    row_tags: &[],
    order_by: "id",
    schema: &COMPANY_SCHEMA,
};
