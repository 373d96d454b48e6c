//! Inventory export reader
//!
//! Parses the tabular export (Excel workbook or CSV) into raw records.
//! The export format is fixed: a header row carrying the columns
//! `Softwarebezeichnung`, `Installationsanzahl` and `Version`. A missing
//! column or unreadable file is fatal for the whole run; blank cells
//! degrade to `None` and are handled downstream.

use crate::models::RawRecord;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use swinv_common::{Error, Result};
use tracing::debug;

/// Title column header in the export
pub const TITLE_COLUMN: &str = "Softwarebezeichnung";
/// Install-count column header in the export
pub const COUNT_COLUMN: &str = "Installationsanzahl";
/// Version column header in the export
pub const VERSION_COLUMN: &str = "Version";

/// Read raw records from an inventory export file
///
/// Dispatches on the file extension: `.xlsx`/`.xlsm`/`.xls` are parsed as
/// workbooks (first sheet), `.csv` as headered CSV.
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let records = match extension.as_str() {
        "xlsx" | "xlsm" | "xls" => read_workbook(path)?,
        "csv" => read_csv(path)?,
        _ => {
            return Err(Error::Spreadsheet(format!(
                "Unsupported file type: {}",
                path.display()
            )))
        }
    };

    debug!(path = %path.display(), rows = records.len(), "Read inventory export");
    Ok(records)
}

fn read_workbook(path: &Path) -> Result<Vec<RawRecord>> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| Error::Spreadsheet(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Spreadsheet(format!("No sheets in {}", path.display())))?
        .map_err(|e| Error::Spreadsheet(e.to_string()))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| Error::Spreadsheet(format!("Empty sheet in {}", path.display())))?;

    let find_column = |name: &str| {
        header
            .iter()
            .position(|cell| cell.to_string().trim() == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    };
    let title_idx = find_column(TITLE_COLUMN)?;
    let count_idx = find_column(COUNT_COLUMN)?;
    let version_idx = find_column(VERSION_COLUMN)?;

    let mut records = Vec::new();
    for (i, row) in rows.enumerate() {
        // Spreadsheet row number, counting the header
        let row_number = i + 2;
        let title = cell_to_string(row.get(title_idx).unwrap_or(&Data::Empty));
        let version = cell_to_string(row.get(version_idx).unwrap_or(&Data::Empty));
        let install_count =
            cell_to_count(row.get(count_idx).unwrap_or(&Data::Empty), row_number)?;

        records.push(RawRecord {
            title,
            install_count,
            version,
        });
    }

    Ok(records)
}

fn read_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| Error::Spreadsheet(e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| Error::Spreadsheet(e.to_string()))?
        .clone();

    let find_column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    };
    let title_idx = find_column(TITLE_COLUMN)?;
    let count_idx = find_column(COUNT_COLUMN)?;
    let version_idx = find_column(VERSION_COLUMN)?;

    let mut records = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| Error::Spreadsheet(e.to_string()))?;
        let row_number = i + 2;

        let title = field_to_string(record.get(title_idx));
        let version = field_to_string(record.get(version_idx));
        let install_count =
            parse_count(record.get(count_idx).unwrap_or(""), row_number)?;

        records.push(RawRecord {
            title,
            install_count,
            version,
        });
    }

    Ok(records)
}

/// Blank cells become `None`; everything else its trimmed text
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        other => {
            let text = other.to_string();
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        }
    }
}

fn field_to_string(field: Option<&str>) -> Option<String> {
    field.and_then(|s| {
        let s = s.trim();
        if s.is_empty() {
            None
        } else {
            Some(s.to_string())
        }
    })
}

/// Interpret an install-count cell.
///
/// Spreadsheet exports frequently deliver integers as floats; those are
/// truncated toward zero. Anything non-numeric is a structural error.
fn cell_to_count(cell: &Data, row_number: usize) -> Result<i64> {
    match cell {
        Data::Int(i) => Ok(*i),
        Data::Float(f) => Ok(*f as i64),
        Data::String(s) => parse_count(s, row_number),
        other => Err(Error::InvalidCell {
            column: COUNT_COLUMN.to_string(),
            row: row_number,
            value: other.to_string(),
        }),
    }
}

fn parse_count(text: &str, row_number: usize) -> Result<i64> {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        return Ok(value as i64);
    }
    Err(Error::InvalidCell {
        column: COUNT_COLUMN.to_string(),
        row: row_number,
        value: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_read_csv_export() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "export.csv",
            "Softwarebezeichnung,Installationsanzahl,Version\n\
             Adobe Flash Player 32.0.0.156,3,1.0\n\
             Office 2019 (64-Bit),7,16.0\n",
        );

        let records = read_records(&path).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].title.as_deref(),
            Some("Adobe Flash Player 32.0.0.156")
        );
        assert_eq!(records[0].install_count, 3);
        assert_eq!(records[0].version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_blank_cells_become_none() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "export.csv",
            "Softwarebezeichnung,Installationsanzahl,Version\n\
             ,2,\n",
        );

        let records = read_records(&path).unwrap();

        assert_eq!(records[0].title, None);
        assert_eq!(records[0].version, None);
        assert_eq!(records[0].install_count, 2);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "export.csv",
            "Softwarebezeichnung,Installationsanzahl\nGIMP,2\n",
        );

        let err = read_records(&path).unwrap_err();

        assert!(matches!(err, Error::MissingColumn(ref c) if c == VERSION_COLUMN));
    }

    #[test]
    fn test_float_count_truncates() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "export.csv",
            "Softwarebezeichnung,Installationsanzahl,Version\nGIMP,3.0,2.10\n",
        );

        let records = read_records(&path).unwrap();

        assert_eq!(records[0].install_count, 3);
    }

    #[test]
    fn test_non_numeric_count_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "export.csv",
            "Softwarebezeichnung,Installationsanzahl,Version\nGIMP,many,2.10\n",
        );

        let err = read_records(&path).unwrap_err();

        assert!(matches!(err, Error::InvalidCell { row: 2, .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "export.txt", "not a spreadsheet");

        let err = read_records(&path).unwrap_err();

        assert!(matches!(err, Error::Spreadsheet(_)));
    }
}
