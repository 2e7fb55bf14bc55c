//! Raw table input from local CSV files.
//!
//! Region parsers upstream flatten each authority's HTML or JSON payload
//! into a CSV whose header row carries the authority's own column labels.
//! Every column is read as text so that conversion, not the reader, decides
//! what counts as a number.

use crate::error::{AirwatchError, Result};
use crate::models::{RawCell, RawTable};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Read a raw table from a CSV file
///
/// # Errors
/// * `AirwatchError::InputNotFound` if `path` does not exist
/// * `AirwatchError::Polars` if the file is not readable CSV
pub fn read_raw_csv(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(AirwatchError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = csv_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    debug!(
        "Read raw table {} ({} rows, {} columns)",
        path.display(),
        df.height(),
        df.width()
    );
    raw_table_from_frame(&df)
}

/// Read a raw table from in-memory CSV bytes
pub fn read_raw_csv_bytes(bytes: &[u8]) -> Result<RawTable> {
    let df = csv_options()
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()?;
    raw_table_from_frame(&df)
}

fn csv_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_encoding(CsvEncoding::LossyUtf8))
}

/// Convert any data frame into a raw table, column by column
///
/// Text columns become `RawCell::Text`; numeric columns become
/// `RawCell::Number`; nulls become `RawCell::Missing`.
pub fn raw_table_from_frame(df: &DataFrame) -> Result<RawTable> {
    let mut table = RawTable::new();

    for column in df.get_columns() {
        let series = column.as_materialized_series();
        let cells: Vec<RawCell> = match series.dtype() {
            DataType::String => series.str()?.into_iter().map(RawCell::from).collect(),
            dtype if dtype.is_primitive_numeric() => series
                .cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .map(|v| v.map_or(RawCell::Missing, RawCell::Number))
                .collect(),
            _ => series
                .cast(&DataType::String)?
                .str()?
                .into_iter()
                .map(RawCell::from)
                .collect(),
        };
        table.insert_column(column.name().as_str(), cells);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_raw_csv_keeps_labels_and_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "測定局,SO2 ppm,WD 方位").unwrap();
        writeln!(file, "野田宮崎,0.002,NNE").unwrap();
        writeln!(file, "市川稲荷木,-,CALM").unwrap();

        let table = read_raw_csv(file.path()).unwrap();
        assert_eq!(
            table.labels().collect::<Vec<_>>(),
            vec!["測定局", "SO2 ppm", "WD 方位"]
        );
        assert_eq!(table.row_count(), 2);

        let so2 = table.column("SO2 ppm").unwrap();
        assert_eq!(so2.cells[0].as_number(), Some(0.002));
        assert_eq!(so2.cells[1].as_number(), None);
        assert_eq!(table.column("WD 方位").unwrap().cells[1].as_text(), "CALM");
    }

    #[test]
    fn test_empty_fields_are_missing_or_blank() {
        let table = read_raw_csv_bytes("name,SO2\n国設野田,\n".as_bytes()).unwrap();
        let cell = &table.column("SO2").unwrap().cells[0];
        assert_eq!(cell.as_number(), None);
        assert_eq!(cell.as_text(), "");
    }

    #[test]
    fn test_numeric_frame_columns() {
        let df = df!(
            "code" => [44132i64, 11001],
            "temp" => [Some(25.1f64), None],
        )
        .unwrap();
        let table = raw_table_from_frame(&df).unwrap();
        assert_eq!(table.column("code").unwrap().cells[0], RawCell::Number(44132.0));
        assert_eq!(table.column("code").unwrap().cells[0].as_text(), "44132");
        assert_eq!(table.column("temp").unwrap().cells[1], RawCell::Missing);
    }

    #[test]
    fn test_missing_file() {
        let err = read_raw_csv(Path::new("/nonexistent/raw.csv")).unwrap_err();
        assert!(matches!(err, AirwatchError::InputNotFound { .. }));
    }
}
