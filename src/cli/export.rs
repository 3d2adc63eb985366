//! `tdash export` command implementation

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

use crate::export::{export_file_name, sheet_to_csv, write_csv};
use crate::task::TaskColumns;
use crate::workbook::Workbook;

#[derive(Args)]
pub struct ExportArgs {
    /// Path to the workbook (.xlsx)
    #[arg(env = "TASKDASH_FILE", value_name = "FILE")]
    file: Option<PathBuf>,

    /// Sheet to export (defaults to "Tasks" or the first sheet)
    #[arg(short, long)]
    sheet: Option<String>,

    /// Output path; "-" writes to stdout (default: <sheet>_export.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep only rows whose start date is on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    from: Option<NaiveDate>,

    /// Keep only rows whose due date is on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    to: Option<NaiveDate>,
}

pub fn run(args: ExportArgs) -> Result<()> {
    let path = super::workbook_path(args.file)?;
    let workbook = Workbook::load(&path)?;
    let sheet = super::resolve_sheet(args.sheet.as_deref(), &workbook)?;

    // Date filters need the task projection; a plain export does not.
    let rows: Option<Vec<usize>> = if args.from.is_some() || args.to.is_some() {
        let Some(cols) = TaskColumns::detect(sheet) else {
            bail!(
                "Sheet '{}' has no date columns to filter on; drop --from/--to to export it as-is.",
                sheet.name
            );
        };
        let selected: Vec<usize> = cols
            .extract(sheet)
            .into_iter()
            .filter(|rec| match args.from {
                // Rows without a start date drop out when filtering by start.
                Some(from) => rec.start.is_some_and(|s| s >= from),
                None => true,
            })
            .filter(|rec| match args.to {
                Some(to) => rec.due.is_some_and(|d| d <= to),
                None => true,
            })
            .map(|rec| rec.row)
            .collect();
        Some(selected)
    } else {
        None
    };

    let row_count = rows.as_ref().map(|r| r.len()).unwrap_or(sheet.row_count());

    match args.output {
        Some(path) if path.as_os_str() == "-" => {
            print!("{}", sheet_to_csv(sheet, rows.as_deref())?);
        }
        Some(path) => {
            write_csv(sheet, rows.as_deref(), &path)?;
            println!("Exported {} rows to {}", row_count, path.display());
        }
        None => {
            let path = PathBuf::from(export_file_name(&sheet.name));
            write_csv(sheet, rows.as_deref(), &path)?;
            println!("Exported {} rows to {}", row_count, path.display());
        }
    }

    Ok(())
}
