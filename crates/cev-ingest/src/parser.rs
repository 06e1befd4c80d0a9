//! Equipment CSV parsing
//!
//! Converts an uploaded byte buffer into per-row parse outcomes. Structural
//! problems fail the whole parse; value problems fail only their row.

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;

use crate::columns::ColumnMap;
use cev_common::EquipmentFields;

/// Errors that fail the entire parse. Nothing should be persisted when one
/// of these is returned.
#[derive(Debug, Error)]
pub enum CsvParseError {
    /// The input has no header row (empty upload).
    #[error("Input is empty: no header row found")]
    Empty,
    /// The input could not be tokenized as CSV (ragged record, invalid
    /// UTF-8, unterminated quote).
    #[error("Failed to parse CSV: {0}")]
    Malformed(#[from] csv::Error),
}

/// A single row that could not be coerced into an equipment record.
///
/// Row numbers are 1-based over data rows (the header is row 0).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("row {row}: equipment name is missing or empty")]
    MissingName { row: usize },
    #[error("row {row}: invalid numeric value '{value}' in column {column}")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// The outcome of parsing one upload: every data row in input order, each
/// either a typed record or the reason it was skipped.
#[derive(Debug)]
pub struct ParsedCsv {
    pub rows: Vec<Result<EquipmentFields, RowError>>,
}

impl ParsedCsv {
    /// Iterate over the successfully parsed rows, in input order.
    pub fn valid(&self) -> impl Iterator<Item = &EquipmentFields> {
        self.rows.iter().filter_map(|r| r.as_ref().ok())
    }

    /// Number of rows skipped due to row-local errors.
    pub fn skipped(&self) -> usize {
        self.rows.iter().filter(|r| r.is_err()).count()
    }

    /// Total number of data rows in the input.
    pub fn total(&self) -> usize {
        self.rows.len()
    }
}

/// Parse uploaded CSV bytes into per-row outcomes.
///
/// The header is read first and each logical field resolved through its
/// candidate list (see [`crate::columns`]). All records are tokenized before
/// returning, so a structural defect anywhere in the file aborts the parse
/// and the caller creates nothing.
///
/// # Errors
///
/// - [`CsvParseError::Empty`] - the input has no header row
/// - [`CsvParseError::Malformed`] - a record could not be tokenized
pub fn parse_equipment_csv(bytes: &[u8]) -> Result<ParsedCsv, CsvParseError> {
    let mut reader = ReaderBuilder::new().flexible(false).from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(CsvParseError::Empty);
    }

    let columns = ColumnMap::resolve(&headers);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        rows.push(parse_row(&columns, &record, index + 1));
    }

    Ok(ParsedCsv { rows })
}

/// Coerce one tokenized record into equipment fields.
///
/// Name must be present and non-empty. Type and material default to the
/// empty string. Numeric cells are trimmed; empty means zero, anything else
/// must parse as a float.
fn parse_row(
    columns: &ColumnMap,
    record: &StringRecord,
    row: usize,
) -> Result<EquipmentFields, RowError> {
    let cell = |index: Option<usize>| {
        index
            .and_then(|i| record.get(i))
            .map(str::trim)
            .unwrap_or("")
    };

    let name = cell(columns.name);
    if name.is_empty() {
        return Err(RowError::MissingName { row });
    }

    Ok(EquipmentFields {
        name: name.to_string(),
        equipment_type: cell(columns.equipment_type).to_string(),
        material: cell(columns.material).to_string(),
        flowrate: parse_number(cell(columns.flowrate), "Flowrate", row)?,
        pressure: parse_number(cell(columns.pressure), "Pressure", row)?,
        temperature: parse_number(cell(columns.temperature), "Temperature", row)?,
    })
}

fn parse_number(cell: &str, column: &'static str, row: usize) -> Result<f64, RowError> {
    if cell.is_empty() {
        return Ok(0.0);
    }

    cell.parse().map_err(|_| RowError::InvalidNumber {
        row,
        column,
        value: cell.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CANONICAL: &[u8] = b"Equipment Name,Type,Flowrate,Pressure,Temperature\n\
        Pump-1,Pump,120,5.2,110\n\
        Compressor-1,Compressor,95,8.4,95\n";

    #[test]
    fn test_parse_well_formed_file() {
        let parsed = parse_equipment_csv(CANONICAL).unwrap();

        assert_eq!(parsed.total(), 2);
        assert_eq!(parsed.skipped(), 0);

        let rows: Vec<_> = parsed.valid().collect();
        assert_eq!(rows[0].name, "Pump-1");
        assert_eq!(rows[0].equipment_type, "Pump");
        assert_eq!(rows[0].flowrate, 120.0);
        assert_eq!(rows[0].pressure, 5.2);
        assert_eq!(rows[0].temperature, 110.0);
        assert_eq!(rows[1].name, "Compressor-1");
    }

    #[test]
    fn test_material_defaults_to_empty_when_column_absent() {
        let parsed = parse_equipment_csv(CANONICAL).unwrap();
        assert!(parsed.valid().all(|r| r.material.is_empty()));
    }

    #[test]
    fn test_non_numeric_cell_skips_only_that_row() {
        let input = b"Equipment Name,Type,Flowrate,Pressure,Temperature\n\
            Pump-1,Pump,120,5.2,110\n\
            Pump-2,Pump,not-a-number,5.0,100\n\
            Pump-3,Pump,80,4.1,90\n";

        let parsed = parse_equipment_csv(input).unwrap();

        assert_eq!(parsed.total(), 3);
        assert_eq!(parsed.skipped(), 1);
        assert_eq!(parsed.valid().count(), 2);
        assert!(matches!(
            parsed.rows[1],
            Err(RowError::InvalidNumber { row: 2, column: "Flowrate", .. })
        ));
    }

    #[test]
    fn test_empty_numeric_cell_is_zero() {
        let input = b"Equipment Name,Type,Flowrate,Pressure,Temperature\n\
            Pump-1,Pump,,5.2,\n";

        let parsed = parse_equipment_csv(input).unwrap();
        let row = parsed.valid().next().unwrap();

        assert_eq!(row.flowrate, 0.0);
        assert_eq!(row.pressure, 5.2);
        assert_eq!(row.temperature, 0.0);
    }

    #[test]
    fn test_whitespace_numeric_cell_is_zero() {
        let input = b"Equipment Name,Flowrate\nPump-1,   \n";

        let parsed = parse_equipment_csv(input).unwrap();
        assert_eq!(parsed.valid().next().unwrap().flowrate, 0.0);
    }

    #[test]
    fn test_missing_name_column_skips_every_row() {
        let input = b"Type,Flowrate,Pressure,Temperature\n\
            Pump,120,5.2,110\n\
            Compressor,95,8.4,95\n";

        let parsed = parse_equipment_csv(input).unwrap();

        assert_eq!(parsed.total(), 2);
        assert_eq!(parsed.skipped(), 2);
        assert!(matches!(parsed.rows[0], Err(RowError::MissingName { row: 1 })));
    }

    #[test]
    fn test_empty_name_cell_skips_row() {
        let input = b"Equipment Name,Flowrate\n,120\nPump-2,95\n";

        let parsed = parse_equipment_csv(input).unwrap();
        assert_eq!(parsed.skipped(), 1);
        assert_eq!(parsed.valid().next().unwrap().name, "Pump-2");
    }

    #[test]
    fn test_lowercase_name_synonym() {
        let input = b"name,type,Flowrate\npump-a,Pump,42.5\n";

        let parsed = parse_equipment_csv(input).unwrap();
        let row = parsed.valid().next().unwrap();
        assert_eq!(row.name, "pump-a");
        assert_eq!(row.equipment_type, "Pump");
        assert_eq!(row.flowrate, 42.5);
    }

    #[test]
    fn test_ragged_record_fails_whole_parse() {
        let input = b"Equipment Name,Type,Flowrate\n\
            Pump-1,Pump,120\n\
            Pump-2,Pump,95,extra,cells\n";

        assert!(matches!(
            parse_equipment_csv(input),
            Err(CsvParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_empty_input_is_a_parse_error() {
        assert!(matches!(parse_equipment_csv(b""), Err(CsvParseError::Empty)));
    }

    #[test]
    fn test_header_only_file_yields_zero_rows() {
        let parsed =
            parse_equipment_csv(b"Equipment Name,Type,Flowrate,Pressure,Temperature\n").unwrap();
        assert_eq!(parsed.total(), 0);
        assert_eq!(parsed.skipped(), 0);
    }

    #[test]
    fn test_cell_whitespace_is_trimmed() {
        let input = b"Equipment Name,Type,Flowrate\n  Pump-1  , Pump , 120 \n";

        let parsed = parse_equipment_csv(input).unwrap();
        let row = parsed.valid().next().unwrap();
        assert_eq!(row.name, "Pump-1");
        assert_eq!(row.equipment_type, "Pump");
        assert_eq!(row.flowrate, 120.0);
    }
}
