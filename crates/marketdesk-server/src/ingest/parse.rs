//! Positional coercion of cell grids into typed rows

use chrono::NaiveDate;
use thiserror::Error;

use super::reader::Cell;
use super::schema::{CellValue, ColumnSpec, ColumnType, ParsedRow, Picks, RowKind, TableSchema};

/// Errors produced while turning an upload into rows.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unsupported file type: {0} (expected .csv, .xls, or .xlsx)")]
    UnsupportedExtension(String),

    #[error("Failed to read file: {0}")]
    Read(String),

    #[error("File must have {expected} columns, found {found}")]
    ColumnCount { expected: String, found: usize },

    #[error("Invalid value {value:?} for column '{column}' in row {row}")]
    Cell {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Parse a cell grid against a category schema.
///
/// Skips the header line when the schema declares one, drops fully blank
/// lines, validates the source column count, projects the schema's columns
/// out of each line, and coerces cell by cell. A required column that fails
/// to coerce on a data row aborts the whole batch.
pub fn parse_rows(schema: &TableSchema, grid: &[Vec<Cell>]) -> Result<Vec<ParsedRow>, ParseError> {
    let skip = usize::from(schema.has_header_row);
    let mut rows = Vec::new();

    for (line_idx, line) in grid.iter().enumerate().skip(skip) {
        if line.iter().all(Cell::is_blank) {
            continue;
        }

        if !schema.expected_columns.matches(line.len()) {
            return Err(ParseError::ColumnCount {
                expected: schema.expected_columns.describe(),
                found: line.len(),
            });
        }

        let picked = project(schema.picks, line);
        debug_assert_eq!(picked.len(), schema.columns.len());

        let kind = if schema.has_section_rows() && is_section_row(schema, &picked) {
            RowKind::SectionHeader
        } else {
            RowKind::Data
        };

        let mut values = Vec::with_capacity(schema.columns.len());
        for (cell, spec) in picked.iter().zip(schema.columns) {
            values.push(coerce(cell, spec, kind, line_idx + 1)?);
        }

        rows.push(ParsedRow { kind, values });
    }

    Ok(rows)
}

fn project<'a>(picks: Picks, line: &'a [Cell]) -> Vec<&'a Cell> {
    match picks {
        Picks::First(n) => line.iter().take(n).collect(),
        Picks::From(from) => line.iter().skip(from).collect(),
        Picks::OneThenFrom { keep, from } => std::iter::once(&line[keep])
            .chain(line.iter().skip(from))
            .collect(),
    }
}

/// A line is a section divider when every probed column holds a placeholder:
/// blank, zero, or a non-numeric label such as `Yr-ago` / `Curnt`.
fn is_section_row(schema: &TableSchema, picked: &[&Cell]) -> bool {
    schema.section_probe.iter().all(|name| {
        schema
            .column_index(name)
            .map(|idx| is_placeholder(picked[idx]))
            .unwrap_or(false)
    })
}

fn is_placeholder(cell: &Cell) -> bool {
    match cell {
        Cell::Empty => true,
        Cell::Number(n) => *n == 0.0,
        Cell::Text(t) => {
            let t = t.trim();
            t.is_empty() || t == "0" || t.parse::<f64>().is_err()
        },
    }
}

fn coerce(
    cell: &Cell,
    spec: &ColumnSpec,
    kind: RowKind,
    row: usize,
) -> Result<CellValue, ParseError> {
    let value = match spec.ty {
        ColumnType::Text => coerce_text(cell),
        ColumnType::Float => coerce_float(cell),
        ColumnType::Int => coerce_int(cell),
        ColumnType::Date => coerce_date(cell),
    };

    match value {
        Some(v) => Ok(v),
        None if !spec.required => Ok(CellValue::Null),
        // Section dividers carry placeholder labels in numeric columns; the
        // original data entry stored them as zeros.
        None if kind == RowKind::SectionHeader => Ok(match spec.ty {
            ColumnType::Float => CellValue::Float(0.0),
            ColumnType::Int => CellValue::Int(0),
            ColumnType::Text | ColumnType::Date => CellValue::Null,
        }),
        None => Err(ParseError::Cell {
            row,
            column: spec.name,
            value: cell_repr(cell),
        }),
    }
}

fn coerce_text(cell: &Cell) -> Option<CellValue> {
    match cell {
        Cell::Empty => None,
        Cell::Number(n) => Some(CellValue::Text(format_number(*n))),
        Cell::Text(t) => {
            let t = t.trim();
            if t.is_empty() {
                None
            } else {
                Some(CellValue::Text(t.to_string()))
            }
        },
    }
}

fn coerce_float(cell: &Cell) -> Option<CellValue> {
    match cell {
        Cell::Empty => None,
        Cell::Number(n) if n.is_finite() => Some(CellValue::Float(*n)),
        Cell::Number(_) => None,
        Cell::Text(t) => t.trim().parse::<f64>().ok().filter(|f| f.is_finite()).map(CellValue::Float),
    }
}

fn coerce_int(cell: &Cell) -> Option<CellValue> {
    match cell {
        Cell::Empty => None,
        Cell::Number(n) if n.is_finite() => Some(CellValue::Int(*n as i64)),
        Cell::Number(_) => None,
        Cell::Text(t) => {
            let t = t.trim();
            t.parse::<i64>()
                .ok()
                .or_else(|| t.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
                .map(CellValue::Int)
        },
    }
}

fn coerce_date(cell: &Cell) -> Option<CellValue> {
    match cell {
        Cell::Empty => None,
        Cell::Text(t) => parse_date_flexible(t.trim()).map(CellValue::Date),
        Cell::Number(n) => excel_serial_date(*n).map(CellValue::Date),
    }
}

/// Dates in the exchange exports arrive in any of three formats.
pub fn parse_date_flexible(s: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 3] = ["%d-%m-%Y", "%Y-%m-%d", "%d/%m/%Y"];
    FORMATS.iter().find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Excel stores dates as serial day counts from 1899-12-30.
fn excel_serial_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > 200_000.0 {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|epoch| epoch.checked_add_days(chrono::Days::new(serial as u64)))
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn cell_repr(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Number(n) => format!("{}", n),
        Cell::Text(t) => t.clone(),
    }
}
