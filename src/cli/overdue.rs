//! `tdash overdue` command implementation

use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

use crate::analytics::overdue_tasks;
use crate::task::TaskColumns;
use crate::workbook::Workbook;

const TABLE_COL_TITLE: usize = 40;
const TABLE_COL_BUCKET: usize = 18;
const TABLE_COL_PRIORITY: usize = 10;

#[derive(Args)]
pub struct OverdueArgs {
    /// Path to the workbook (.xlsx)
    #[arg(env = "TASKDASH_FILE", value_name = "FILE")]
    file: Option<PathBuf>,

    /// Sheet to check (defaults to "Tasks" or the first sheet)
    #[arg(short, long)]
    sheet: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: OverdueArgs) -> Result<()> {
    let path = super::workbook_path(args.file)?;
    let workbook = Workbook::load(&path)?;
    let sheet = super::resolve_sheet(args.sheet.as_deref(), &workbook)?;

    let records = match TaskColumns::detect(sheet) {
        Some(cols) => cols.extract(sheet),
        None => {
            println!(
                "Sheet '{}' has no recognizable task columns (need a title plus status or due date).",
                sheet.name
            );
            return Ok(());
        }
    };

    let today = Local::now().date_naive();
    let overdue = overdue_tasks(&records, today);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&overdue)?);
        return Ok(());
    }

    if overdue.is_empty() {
        println!("No overdue tasks in sheet '{}'.", sheet.name);
        return Ok(());
    }

    println!("Sheet: {}\n", sheet.name);
    println!(
        "{:<w_title$} {:<w_bucket$} {:<w_prio$} {:<10} {:>4}",
        "TITLE",
        "BUCKET",
        "PRIORITY",
        "DUE",
        "LATE",
        w_title = TABLE_COL_TITLE,
        w_bucket = TABLE_COL_BUCKET,
        w_prio = TABLE_COL_PRIORITY
    );
    println!(
        "{}",
        "-".repeat(TABLE_COL_TITLE + TABLE_COL_BUCKET + TABLE_COL_PRIORITY + 19)
    );
    for rec in &overdue {
        let due = rec
            .due
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!(
            "{:<w_title$} {:<w_bucket$} {:<w_prio$} {:<10} {:>4}",
            super::truncate(&rec.title, TABLE_COL_TITLE),
            super::truncate(rec.bucket.as_deref().unwrap_or("-"), TABLE_COL_BUCKET),
            super::truncate(rec.priority.as_deref().unwrap_or("-"), TABLE_COL_PRIORITY),
            due,
            rec.days_late(today),
            w_title = TABLE_COL_TITLE,
            w_bucket = TABLE_COL_BUCKET,
            w_prio = TABLE_COL_PRIORITY
        );
    }
    println!("\nTotal: {} overdue tasks", overdue.len());

    Ok(())
}
