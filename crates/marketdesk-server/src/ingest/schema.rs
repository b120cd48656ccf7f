//! Static column layouts
//!
//! Each category describes its spreadsheet as an ordered list of
//! `(name, type)` pairs plus a column-count expectation and a projection
//! describing which source positions feed those columns. The parser consumes
//! this description; no category carries its own parsing code.

use chrono::NaiveDate;

/// Target type of one spreadsheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Float,
    Int,
    Date,
}

/// One column of a category layout.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub ty: ColumnType,
    /// A data row whose cell fails to coerce aborts the whole batch when the
    /// column is required; optional columns coerce to NULL instead.
    pub required: bool,
}

/// Shorthand constructors used by the per-category layout tables.
pub const fn text(name: &'static str) -> ColumnSpec {
    ColumnSpec { name, ty: ColumnType::Text, required: false }
}

pub const fn float(name: &'static str) -> ColumnSpec {
    ColumnSpec { name, ty: ColumnType::Float, required: false }
}

pub const fn float_req(name: &'static str) -> ColumnSpec {
    ColumnSpec { name, ty: ColumnType::Float, required: true }
}

pub const fn int(name: &'static str) -> ColumnSpec {
    ColumnSpec { name, ty: ColumnType::Int, required: false }
}

pub const fn int_req(name: &'static str) -> ColumnSpec {
    ColumnSpec { name, ty: ColumnType::Int, required: true }
}

pub const fn date(name: &'static str) -> ColumnSpec {
    ColumnSpec { name, ty: ColumnType::Date, required: false }
}

/// Expected source-column count for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnCount {
    Exact(usize),
    /// Files may carry trailing scratch columns; only the projected ones are
    /// read.
    AtLeast(usize),
}

impl ColumnCount {
    pub fn matches(&self, found: usize) -> bool {
        match *self {
            ColumnCount::Exact(n) => found == n,
            ColumnCount::AtLeast(n) => found >= n,
        }
    }

    pub fn describe(&self) -> String {
        match *self {
            ColumnCount::Exact(n) => format!("exactly {n}"),
            ColumnCount::AtLeast(n) => format!("at least {n}"),
        }
    }
}

/// Which source positions feed the layout's columns, in order.
#[derive(Debug, Clone, Copy)]
pub enum Picks {
    /// The first `n` source columns.
    First(usize),
    /// Every source column starting at `from` (drops leading index columns).
    From(usize),
    /// One leading column plus everything from `from` onwards (the heatmap
    /// export carries three ignored columns between rank and name).
    OneThenFrom { keep: usize, from: usize },
}

/// Full description of one category's spreadsheet shape.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub expected_columns: ColumnCount,
    pub picks: Picks,
    pub columns: &'static [ColumnSpec],
    /// The market-indicator export ships a header line; everything else is
    /// headerless.
    pub has_header_row: bool,
    /// Columns probed for section-divider rows. Empty when the category has
    /// no section rows.
    pub section_probe: &'static [&'static str],
}

impl TableSchema {
    pub fn has_section_rows(&self) -> bool {
        !self.section_probe.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

/// Whether a parsed row is market data or a section divider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Data,
    SectionHeader,
}

/// A coerced cell value, ready to bind into an INSERT.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Float(f64),
    Int(i64),
    Text(String),
    Date(NaiveDate),
}

/// One parsed spreadsheet row: kind plus values aligned with
/// `TableSchema::columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub kind: RowKind,
    pub values: Vec<CellValue>,
}
