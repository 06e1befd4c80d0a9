//! CEV Ingest Library
//!
//! The CSV ingestion and export core for chemical equipment datasets.
//!
//! This crate is deliberately database-free: it turns raw tabular bytes into
//! typed equipment rows (and typed rows back into CSV) and leaves persistence
//! to the caller.
//!
//! # Parsing model
//!
//! Parsing distinguishes two failure scopes:
//!
//! - **Structural**: the input cannot be tokenized as CSV at all (ragged
//!   records, invalid UTF-8, missing header). This aborts the whole parse
//!   with a [`parser::CsvParseError`] and the caller persists nothing.
//! - **Row-local**: one data row's values cannot be coerced (missing name,
//!   non-numeric measurement). The row becomes a [`parser::RowError`] inside
//!   the result set; the caller skips it and continues.
//!
//! # Example
//!
//! ```
//! use cev_ingest::parser::parse_equipment_csv;
//!
//! let csv = b"Equipment Name,Type,Flowrate,Pressure,Temperature\n\
//!             Pump-1,Pump,120,5.2,110\n";
//! let parsed = parse_equipment_csv(csv).unwrap();
//! assert_eq!(parsed.valid().count(), 1);
//! assert_eq!(parsed.skipped(), 0);
//! ```

pub mod columns;
pub mod export;
pub mod parser;

pub use export::write_equipment_csv;
pub use parser::{parse_equipment_csv, CsvParseError, ParsedCsv, RowError};
