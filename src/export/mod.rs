//! CSV export of the displayed table

use anyhow::{Context, Result};
use std::path::Path;

use crate::workbook::Sheet;

/// Serialize a sheet to CSV text: header row first, then every row (or the
/// given subset, in the given order). Cell formatting matches the on-screen
/// table: ISO dates, trimmed numbers, empty cells as empty fields.
pub fn sheet_to_csv(sheet: &Sheet, rows: Option<&[usize]>) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(&sheet.columns)
        .context("writing CSV header")?;

    let write_row = |writer: &mut csv::Writer<Vec<u8>>, row: usize| -> Result<()> {
        let record: Vec<String> = (0..sheet.columns.len())
            .map(|col| sheet.cell(row, col).display())
            .collect();
        writer.write_record(&record).context("writing CSV row")?;
        Ok(())
    };

    match rows {
        Some(subset) => {
            for &row in subset {
                write_row(&mut writer, row)?;
            }
        }
        None => {
            for row in 0..sheet.row_count() {
                write_row(&mut writer, row)?;
            }
        }
    }

    let bytes = writer.into_inner().context("flushing CSV buffer")?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}

/// Write the export to disk.
pub fn write_csv(sheet: &Sheet, rows: Option<&[usize]>, path: &Path) -> Result<()> {
    let csv = sheet_to_csv(sheet, rows)?;
    std::fs::write(path, csv).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Default export file name for a sheet: `<sheet>_export.csv`, with
/// filesystem-hostile characters replaced.
pub fn export_file_name(sheet_name: &str) -> String {
    let sanitized: String = sheet_name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_export.csv", sanitized.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::CellValue;
    use chrono::NaiveDate;

    fn sample_sheet() -> Sheet {
        Sheet {
            name: "Tasks".to_string(),
            columns: vec![
                "Task Name".to_string(),
                "Due date".to_string(),
                "Count".to_string(),
            ],
            rows: vec![
                vec![
                    CellValue::Text("Install, pump".to_string()),
                    CellValue::Date(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()),
                    CellValue::Number(3.0),
                ],
                vec![
                    CellValue::Text("Snag \"valve\"".to_string()),
                    CellValue::Empty,
                    CellValue::Number(1.5),
                ],
            ],
        }
    }

    #[test]
    fn test_csv_header_and_rows() {
        let csv = sheet_to_csv(&sample_sheet(), None).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Task Name,Due date,Count"));
        assert_eq!(lines.next(), Some("\"Install, pump\",2025-10-01,3"));
        // Quotes escaped per CSV rules, empty cell as empty field
        assert_eq!(lines.next(), Some("\"Snag \"\"valve\"\"\",,1.5"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_row_subset_preserves_order() {
        let csv = sheet_to_csv(&sample_sheet(), Some(&[1])).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.lines().nth(1).unwrap().starts_with("\"Snag"));
    }

    #[test]
    fn test_round_trip_row_count_and_columns() {
        let sheet = sample_sheet();
        let csv = sheet_to_csv(&sheet, None).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(|h| h.to_string())
            .collect();
        assert_eq!(headers, sheet.columns);

        let rows: Vec<_> = reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), sheet.row_count());
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("Tasks"), "Tasks_export.csv");
        assert_eq!(export_file_name("Q1/Q2 Plan"), "Q1_Q2 Plan_export.csv");
    }
}
