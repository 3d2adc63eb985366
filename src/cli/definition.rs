//! Top-level CLI definition

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::export::ExportArgs;
use super::kpi::KpiArgs;
use super::overdue::OverdueArgs;
use super::sheets::SheetsArgs;

#[derive(Parser)]
#[command(
    name = "tdash",
    version,
    about = "Terminal dashboard for project task workbooks",
    long_about = "Loads a task workbook (.xlsx) and shows KPIs, charts, a timeline, \
                  and an overdue table. Run without a subcommand for the interactive \
                  dashboard."
)]
pub struct Cli {
    /// Path to the workbook (.xlsx)
    #[arg(env = "TASKDASH_FILE", value_name = "FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the workbook's sheets with row counts
    Sheets(SheetsArgs),

    /// Print the KPI summary and breakdowns for a sheet
    Kpi(KpiArgs),

    /// Print the overdue task table for a sheet
    Overdue(OverdueArgs),

    /// Export a sheet to CSV
    Export(ExportArgs),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
