//! End-to-end tests against a generated .xlsx fixture: load, column
//! detection, KPI math, and CSV export on a real file.

use anyhow::Result;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook as XlsxWorkbook};
use tempfile::TempDir;

use taskdash::analytics::{bucket_counts, overdue_tasks, Kpis};
use taskdash::export::sheet_to_csv;
use taskdash::task::{TaskColumns, TaskStatus};
use taskdash::workbook::{CellValue, LoadError, Workbook};

/// The reference date all fixture assertions use.
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 7).unwrap()
}

fn excel_date(y: u16, m: u8, d: u8) -> ExcelDateTime {
    ExcelDateTime::from_ymd(y, m, d).unwrap()
}

/// A two-sheet workbook: a Planner-style "Tasks" sheet (mixing real Excel
/// dates, day-first text dates, blanks, and one malformed date) and a
/// non-task "Budget" sheet.
fn write_fixture(dir: &TempDir) -> Result<std::path::PathBuf> {
    let path = dir.path().join("project.xlsx");
    let mut book = XlsxWorkbook::new();
    let date_format = Format::new().set_num_format("dd/mm/yyyy");

    let tasks = book.add_worksheet();
    tasks.set_name("Tasks")?;
    let headers = [
        "Task Name",
        "Bucket Name",
        "Progress",
        "Priority",
        "Start date",
        "Due date",
    ];
    for (col, header) in headers.iter().enumerate() {
        tasks.write(0, col as u16, *header)?;
    }

    // Due yesterday, still in progress: the one overdue task
    tasks.write(1, 0, "Install pump")?;
    tasks.write(1, 1, "Civils")?;
    tasks.write(1, 2, "In progress")?;
    tasks.write(1, 3, "Urgent")?;
    tasks.write_with_format(1, 4, &excel_date(2025, 9, 1), &date_format)?;
    tasks.write_with_format(1, 5, &excel_date(2025, 10, 6), &date_format)?;

    // Due tomorrow, dates stored as day-first text
    tasks.write(2, 0, "Pour slab")?;
    tasks.write(2, 1, "Civils")?;
    tasks.write(2, 2, "In progress")?;
    tasks.write(2, 3, "High")?;
    tasks.write(2, 4, "02/09/2025")?;
    tasks.write(2, 5, "08/10/2025")?;

    // Past due but completed
    tasks.write(3, 0, "Sign off drawings")?;
    tasks.write(3, 1, "Design")?;
    tasks.write(3, 2, "Completed")?;
    tasks.write(3, 3, "Medium")?;
    tasks.write_with_format(3, 4, &excel_date(2025, 8, 15), &date_format)?;
    tasks.write_with_format(3, 5, &excel_date(2025, 10, 6), &date_format)?;

    // No dates at all
    tasks.write(4, 0, "Order valves")?;
    tasks.write(4, 1, "Procurement")?;
    tasks.write(4, 2, "Not started")?;
    tasks.write(4, 3, "Low")?;

    // Malformed due date in a date column
    tasks.write(5, 0, "Site survey")?;
    tasks.write(5, 1, "Civils")?;
    tasks.write(5, 2, "In progress")?;
    tasks.write(5, 3, "Low")?;
    tasks.write(5, 5, "soon")?;

    let budget = book.add_worksheet();
    budget.set_name("Budget")?;
    budget.write(0, 0, "Item")?;
    budget.write(0, 1, "Cost")?;
    budget.write(1, 0, "Crane hire")?;
    budget.write(1, 1, 1200.5)?;

    book.save(&path)?;
    Ok(path)
}

#[test]
fn test_every_sheet_is_exposed() -> Result<()> {
    let dir = TempDir::new()?;
    let workbook = Workbook::load(&write_fixture(&dir)?)?;

    assert_eq!(workbook.sheet_names(), vec!["Tasks", "Budget"]);
    assert_eq!(workbook.default_sheet().name, "Tasks");
    assert_eq!(workbook.sheet("Tasks").map(|s| s.row_count()), Some(5));
    assert_eq!(workbook.sheet("Budget").map(|s| s.row_count()), Some(1));
    Ok(())
}

#[test]
fn test_date_coercion_across_storage_styles() -> Result<()> {
    let dir = TempDir::new()?;
    let workbook = Workbook::load(&write_fixture(&dir)?)?;
    let tasks = workbook.sheet("Tasks").unwrap();

    // Native Excel date cell
    assert_eq!(
        tasks.cell(0, 5).as_date(),
        NaiveDate::from_ymd_opt(2025, 10, 6)
    );
    // Day-first text date
    assert_eq!(
        tasks.cell(1, 5).as_date(),
        NaiveDate::from_ymd_opt(2025, 10, 8)
    );
    // Malformed text in a date column coerces to empty, not a crash
    assert_eq!(tasks.cell(4, 5), &CellValue::Empty);
    // Unwritten cell
    assert!(tasks.cell(3, 5).is_empty());
    Ok(())
}

#[test]
fn test_column_detection_and_status_parsing() -> Result<()> {
    let dir = TempDir::new()?;
    let workbook = Workbook::load(&write_fixture(&dir)?)?;

    let tasks = workbook.sheet("Tasks").unwrap();
    let cols = TaskColumns::detect(tasks).unwrap();
    let records = cols.extract(tasks);

    assert_eq!(records.len(), 5);
    assert_eq!(records[0].title, "Install pump");
    assert_eq!(records[0].status, TaskStatus::InProgress);
    assert_eq!(records[2].status, TaskStatus::Complete);
    assert_eq!(records[3].status, TaskStatus::NotStarted);

    // The budget sheet is not a task table
    let budget = workbook.sheet("Budget").unwrap();
    assert!(TaskColumns::detect(budget).is_none());
    Ok(())
}

#[test]
fn test_overdue_and_kpis() -> Result<()> {
    let dir = TempDir::new()?;
    let workbook = Workbook::load(&write_fixture(&dir)?)?;

    let tasks = workbook.sheet("Tasks").unwrap();
    let records = TaskColumns::detect(tasks).unwrap().extract(tasks);

    // Due-yesterday + complete and due-tomorrow rows are not overdue;
    // neither are rows with no due date.
    let overdue = overdue_tasks(&records, today());
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].title, "Install pump");
    assert_eq!(overdue[0].days_late(today()), 1);

    let kpis = Kpis::compute(&records, today());
    assert_eq!(kpis.total, 5);
    assert_eq!(kpis.complete, 1);
    assert_eq!(kpis.in_progress, 3);
    assert_eq!(kpis.not_started, 1);
    assert_eq!(kpis.overdue, 1);

    let buckets = bucket_counts(&records);
    assert_eq!(buckets[0], ("Civils".to_string(), 3));
    Ok(())
}

#[test]
fn test_export_matches_loaded_sheet() -> Result<()> {
    let dir = TempDir::new()?;
    let workbook = Workbook::load(&write_fixture(&dir)?)?;
    let tasks = workbook.sheet("Tasks").unwrap();

    let csv = sheet_to_csv(tasks, None)?;
    let mut reader = csv::Reader::from_reader(csv.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    assert_eq!(headers, tasks.columns);

    let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
    assert_eq!(rows.len(), tasks.row_count());
    // Dates come out ISO regardless of how the cell was stored
    assert_eq!(&rows[0][5], "2025-10-06");
    assert_eq!(&rows[1][5], "2025-10-08");
    Ok(())
}

#[test]
fn test_missing_file_is_a_clean_error() {
    let err = Workbook::load(std::path::Path::new("no-such-file.xlsx")).unwrap_err();
    assert!(matches!(err, LoadError::NotFound(_)));
    assert!(err.to_string().contains("no-such-file.xlsx"));
}
