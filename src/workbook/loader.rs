//! Workbook loading via calamine

use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDate;
use std::path::Path;
use tracing::{debug, warn};

use super::error::{LoadError, Result};
use super::sheet::{normalize_header, CellValue, Sheet};
use super::Workbook;

/// String date formats tried in order. Day-first formats come before ISO
/// because the source workbooks are day-first exports.
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y-%m-%d",
    "%d %b %Y",
    "%d %B %Y",
];

/// Load every sheet of the workbook at `path`.
///
/// Individual sheets that fail to read become empty sheets; only a missing or
/// unreadable file (or a workbook with no sheets at all) fails the load.
pub fn load(path: &Path) -> Result<Workbook> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let mut source = open_workbook_auto(path).map_err(|source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let sheet_names = source.sheet_names().to_owned();
    if sheet_names.is_empty() {
        return Err(LoadError::EmptyWorkbook(path.to_path_buf()));
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let sheet = match source.worksheet_range(&name) {
            Ok(range) => read_sheet(&name, &range),
            Err(err) => {
                warn!("failed to read sheet '{}': {}", name, err);
                Sheet {
                    name: name.clone(),
                    ..Sheet::default()
                }
            }
        };
        sheets.push(sheet);
    }

    Ok(Workbook {
        path: path.to_path_buf(),
        sheets,
    })
}

fn read_sheet(name: &str, range: &calamine::Range<Data>) -> Sheet {
    let mut rows_iter = range.rows();

    let columns = match rows_iter.next() {
        Some(header_row) => header_names(header_row),
        None => {
            return Sheet {
                name: name.to_string(),
                ..Sheet::default()
            }
        }
    };

    // Columns whose header mentions a date get date coercion, mirroring the
    // "standardize likely date columns" behavior of the source dashboard.
    let date_cols: Vec<bool> = columns
        .iter()
        .map(|c| normalize_header(c).contains("date"))
        .collect();

    let rows = rows_iter
        .map(|row| {
            (0..columns.len())
                .map(|i| match row.get(i) {
                    Some(value) => convert_cell(name, value, date_cols[i]),
                    None => CellValue::Empty,
                })
                .collect()
        })
        .collect();

    Sheet {
        name: name.to_string(),
        columns,
        rows,
    }
}

/// Trimmed display names with positional fallbacks for blank or duplicate
/// headers.
fn header_names(header_row: &[Data]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(header_row.len());
    let mut columns = Vec::with_capacity(header_row.len());

    for (i, cell) in header_row.iter().enumerate() {
        let raw = match cell {
            Data::String(s) => s.trim().to_string(),
            Data::Empty => String::new(),
            other => other.to_string().trim().to_string(),
        };

        let name = if raw.is_empty() {
            format!("Column {}", i + 1)
        } else if seen.contains(&normalize_header(&raw)) {
            format!("{} {}", raw, i + 1)
        } else {
            raw
        };

        seen.push(normalize_header(&name));
        columns.push(name);
    }

    columns
}

fn convert_cell(sheet: &str, value: &Data, date_column: bool) -> CellValue {
    match value {
        Data::Empty => CellValue::Empty,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Float(n) => CellValue::Number(*n),
        Data::String(s) => {
            if date_column {
                match parse_date_text(s) {
                    Some(date) => CellValue::Date(date),
                    None => {
                        if !s.trim().is_empty() {
                            debug!("sheet '{}': unparseable date '{}' coerced", sheet, s);
                        }
                        CellValue::Empty
                    }
                }
            } else if s.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => CellValue::Date(naive.date()),
            None => {
                debug!("sheet '{}': invalid excel datetime coerced", sheet);
                CellValue::Empty
            }
        },
        Data::DateTimeIso(s) => match parse_iso_datetime(s) {
            Some(date) => CellValue::Date(date),
            None => CellValue::Empty,
        },
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => {
            debug!("sheet '{}': cell error {:?} coerced to empty", sheet, e);
            CellValue::Empty
        }
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    parse_iso_datetime(trimmed)
}

fn parse_iso_datetime(text: &str) -> Option<NaiveDate> {
    // Date-only prefix of an ISO datetime ("2025-10-07T00:00:00").
    let prefix = text.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}
