//! taskdash - a terminal dashboard for project task workbooks.
//!
//! Loads a spreadsheet of tasks (one row per task, named columns for title,
//! bucket, priority, status, and dates), computes progress KPIs, and renders
//! them as an interactive TUI or plain-text CLI reports.

pub mod analytics;
pub mod cli;
pub mod export;
pub mod task;
pub mod tui;
pub mod workbook;
