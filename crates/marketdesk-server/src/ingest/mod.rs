//! Generic spreadsheet ingestion
//!
//! Every category ingests the same way: a CSV/Excel export with a fixed
//! column layout is read into a cell grid, validated against the category's
//! [`TableSchema`], and coerced positionally into typed rows. The schema is
//! the only thing that varies between categories; the engine here is written
//! once.

pub mod parse;
pub mod reader;
pub mod schema;

pub use parse::{parse_rows, ParseError};
pub use reader::{read_table, Cell};
pub use schema::{
    CellValue, ColumnCount, ColumnSpec, ColumnType, ParsedRow, Picks, RowKind, TableSchema,
};
