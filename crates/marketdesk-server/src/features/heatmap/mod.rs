//! Ranked market heatmap (21-column export, rank + 17 measure columns)
//!
//! The source export carries three scratch columns between rank and name
//! that are never read. Manifests discriminate on `value` — the kind of
//! entity being ranked (Company, House, IndSegment) — each of which has its
//! own independent "latest".

pub mod routes;

pub use routes::routes;

use crate::features::shared::Category;
use crate::ingest::schema::{self, ColumnCount, ColumnSpec, Picks, TableSchema};

static COLUMNS: [ColumnSpec; 18] = [
    schema::int_req("rank"),
    schema::text("name"),
    schema::int("cos"),
    schema::int("mcap"),
    schema::int("daych"),
    schema::float("daychper"),
    schema::int("ffltmcap"),
    schema::int("ffltrank"),
    schema::int("wkch"),
    schema::float("wkchper"),
    schema::int("mthch"),
    schema::float("mthchper"),
    schema::int("qtrch"),
    schema::float("qtrchper"),
    schema::int("hrch"),
    schema::float("hrchper"),
    schema::int("yrch"),
    schema::float("yrchper"),
];

static SCHEMA: TableSchema = TableSchema {
    expected_columns: ColumnCount::Exact(21),
    picks: Picks::OneThenFrom { keep: 0, from: 4 },
    columns: &COLUMNS,
    has_header_row: false,
    section_probe: &[],
};

pub static CATEGORY: Category = Category {
    slug: "heatmap",
    base_path: "/heatmap",
    upload_table: "heatmap_uploads",
    data_table: "heatmap_data",
    discriminant: "value",
    has_name: false,
    has_group: false,
    row_tags: &[],
    order_by: "\"rank\", id",
    schema: &SCHEMA,
};
