//! IPO master sheet (47-column exchange export)
//!
//! Mostly free-text issue metadata with seven date columns and a block of
//! lead-manager / market-maker slots. Every column is optional; the only
//! structural gate is the column count.

pub mod routes;

pub use routes::routes;

use crate::features::shared::Category;
use crate::ingest::schema::{self, ColumnCount, ColumnSpec, Picks, TableSchema};

static COLUMNS: [ColumnSpec; 47] = [
    schema::text("isin"),
    schema::text("co_name"),
    schema::text("ibr_name"),
    schema::date("iss_open"),
    schema::date("iss_close"),
    schema::date("allotment_date"),
    schema::date("refund_dt"),
    schema::date("demat_dt"),
    schema::date("trading_dt"),
    schema::float("high"),
    schema::float("low"),
    schema::float("off_price"),
    schema::float("face_value"),
    schema::float("iss_amt"),
    schema::float("iss_qty"),
    schema::float("listed_pr"),
    schema::float("listed_gain"),
    schema::date("listed_dt"),
    schema::float("mkt_lot"),
    schema::float("subs_times"),
    schema::text("exch"),
    schema::text("iss_type"),
    schema::text("offer_type"),
    schema::text("offer_objective"),
    schema::text("state"),
    schema::text("signed_by"),
    schema::text("industry"),
    schema::text("lm1"),
    schema::text("lm2"),
    schema::text("lm3"),
    schema::text("lm4"),
    schema::text("lm5"),
    schema::text("lm6"),
    schema::text("lm7"),
    schema::text("lm8"),
    schema::text("lm9"),
    schema::text("lm10"),
    schema::text("lm11"),
    schema::text("lm12"),
    schema::text("lm13"),
    schema::text("lm14"),
    schema::text("lm15"),
    schema::text("mktmkr1"),
    schema::text("mktmkr2"),
    schema::text("mktmkr3"),
    schema::text("mktmkr4"),
    schema::text("mktmkr5"),
];

static SCHEMA: TableSchema = TableSchema {
    expected_columns: ColumnCount::Exact(47),
    picks: Picks::From(0),
    columns: &COLUMNS,
    has_header_row: false,
    section_probe: &[],
};

pub static CATEGORY: Category = Category {
    slug: "ipo",
    base_path: "/ipo",
    upload_table: "ipo_uploads",
    data_table: "ipo_data",
    discriminant: "data_type",
    has_name: false,
    has_group: false,
    row_tags: &[],
    order_by: "isin, id",
    schema: &SCHEMA,
};
