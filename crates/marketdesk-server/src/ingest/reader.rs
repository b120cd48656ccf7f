//! File readers: CSV and Excel into a uniform cell grid

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;

use super::parse::ParseError;

/// A raw cell before coercion. CSV yields only `Text`/`Empty`; Excel also
/// yields `Number`.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

/// Read upload bytes into a row-major cell grid, dispatching on the file
/// extension. Unknown extensions are rejected before anything is written.
pub fn read_table(bytes: &[u8], filename: &str) -> Result<Vec<Vec<Cell>>, ParseError> {
    let lower = filename.to_lowercase();
    if lower.ends_with(".csv") {
        read_csv(bytes)
    } else if lower.ends_with(".xls") || lower.ends_with(".xlsx") {
        read_workbook(bytes)
    } else {
        Err(ParseError::UnsupportedExtension(filename.to_string()))
    }
}

fn read_csv(bytes: &[u8]) -> Result<Vec<Vec<Cell>>, ParseError> {
    let mut reader = ReaderBuilder::new().has_headers(false).from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ParseError::Read(e.to_string()))?;
        let row = record
            .iter()
            .map(|field| {
                if field.trim().is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(field.to_string())
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

fn read_workbook(bytes: &[u8]) -> Result<Vec<Vec<Cell>>, ParseError> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook =
        open_workbook_auto_from_rs(cursor).map_err(|e| ParseError::Read(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ParseError::Read("workbook has no sheets".to_string()))?
        .map_err(|e| ParseError::Read(e.to_string()))?;

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();

    Ok(rows)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_basic() {
        let rows = read_table(b"a,1.5,\nb,2,x\n", "data.csv").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], Cell::Text("a".to_string()));
        assert_eq!(rows[0][1], Cell::Text("1.5".to_string()));
        assert_eq!(rows[0][2], Cell::Empty);
    }

    #[test]
    fn test_read_rejects_unknown_extension() {
        let err = read_table(b"x", "data.pdf").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedExtension(_)));
    }

    #[test]
    fn test_read_rejects_ragged_csv() {
        let err = read_table(b"a,b,c\nd,e\n", "data.csv").unwrap_err();
        assert!(matches!(err, ParseError::Read(_)));
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(read_table(b"a,b\n", "DATA.CSV").is_ok());
    }
}
