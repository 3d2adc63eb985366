//! `tdash sheets` command implementation

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::workbook::Workbook;

const TABLE_COL_NAME: usize = 30;

#[derive(Args)]
pub struct SheetsArgs {
    /// Path to the workbook (.xlsx)
    #[arg(env = "TASKDASH_FILE", value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SheetJson {
    name: String,
    rows: usize,
    columns: Vec<String>,
}

pub fn run(args: SheetsArgs) -> Result<()> {
    let path = super::workbook_path(args.file)?;
    let workbook = Workbook::load(&path)?;

    if args.json {
        let sheets: Vec<SheetJson> = workbook
            .sheets
            .iter()
            .map(|s| SheetJson {
                name: s.name.clone(),
                rows: s.row_count(),
                columns: s.columns.clone(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&sheets)?);
        return Ok(());
    }

    println!("Workbook: {}\n", workbook.path.display());
    println!("{:<width$} {:>6}  COLUMNS", "SHEET", "ROWS", width = TABLE_COL_NAME);
    println!("{}", "-".repeat(TABLE_COL_NAME + 18));
    for sheet in &workbook.sheets {
        println!(
            "{:<width$} {:>6}  {}",
            super::truncate(&sheet.name, TABLE_COL_NAME),
            sheet.row_count(),
            sheet.columns.len(),
            width = TABLE_COL_NAME
        );
    }
    println!("\nTotal: {} sheets", workbook.sheets.len());

    Ok(())
}
