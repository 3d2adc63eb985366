//! `tdash kpi` command implementation

use anyhow::Result;
use chrono::Local;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::analytics::{bucket_counts, priority_counts, status_counts, Kpis};
use crate::task::TaskColumns;
use crate::workbook::Workbook;

#[derive(Args)]
pub struct KpiArgs {
    /// Path to the workbook (.xlsx)
    #[arg(env = "TASKDASH_FILE", value_name = "FILE")]
    file: Option<PathBuf>,

    /// Sheet to summarize (defaults to "Tasks" or the first sheet)
    #[arg(short, long)]
    sheet: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct KpiJson {
    sheet: String,
    kpis: Kpis,
    by_status: Vec<(String, usize)>,
    by_bucket: Vec<(String, usize)>,
    by_priority: Vec<(String, usize)>,
}

pub fn run(args: KpiArgs) -> Result<()> {
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
    let kpis = Kpis::compute(&records, today);
    let by_status = status_counts(&records);
    let by_bucket = bucket_counts(&records);
    let by_priority = priority_counts(&records);

    if args.json {
        let out = KpiJson {
            sheet: sheet.name.clone(),
            kpis,
            by_status,
            by_bucket,
            by_priority,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Sheet: {}\n", sheet.name);
    println!("Total:       {}", kpis.total);
    println!("Complete:    {}", kpis.complete);
    println!("In Progress: {}", kpis.in_progress);
    println!("Not Started: {}", kpis.not_started);
    if kpis.other > 0 {
        println!("Other:       {}", kpis.other);
    }
    println!("Overdue:     {}", kpis.overdue);

    print_breakdown("By status", &by_status);
    print_breakdown("By bucket", &by_bucket);
    print_breakdown("By priority", &by_priority);

    Ok(())
}

fn print_breakdown(title: &str, counts: &[(String, usize)]) {
    if counts.is_empty() {
        return;
    }
    println!("\n{}:", title);
    for (label, count) in counts {
        println!("  {:<25} {}", super::truncate(label, 25), count);
    }
}
