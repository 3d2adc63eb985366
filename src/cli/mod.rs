//! CLI command implementations

pub mod definition;
pub mod export;
pub mod kpi;
pub mod overdue;
pub mod sheets;

pub use definition::{Cli, Commands};

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::workbook::{Sheet, Workbook};

/// Resolve the workbook path from the positional argument (or the
/// TASKDASH_FILE environment variable, which clap fills in).
pub fn workbook_path(file: Option<PathBuf>) -> Result<PathBuf> {
    match file {
        Some(path) => Ok(path),
        None => bail!(
            "No workbook given.\n\
             Pass the file path as an argument or set TASKDASH_FILE."
        ),
    }
}

/// Resolve a sheet by exact name, case-insensitive name, or unique prefix.
/// With no name, the workbook's default sheet ("Tasks" when present) is used.
pub fn resolve_sheet<'a>(name: Option<&str>, workbook: &'a Workbook) -> Result<&'a Sheet> {
    let Some(name) = name else {
        return Ok(workbook.default_sheet());
    };

    // Try exact name match
    if let Some(sheet) = workbook.sheets.iter().find(|s| s.name == name) {
        return Ok(sheet);
    }

    // Try case-insensitive match
    if let Some(sheet) = workbook
        .sheets
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name))
    {
        return Ok(sheet);
    }

    // Try unique prefix match
    let prefixed: Vec<&Sheet> = workbook
        .sheets
        .iter()
        .filter(|s| s.name.to_lowercase().starts_with(&name.to_lowercase()))
        .collect();
    match prefixed.as_slice() {
        [sheet] => return Ok(sheet),
        [] => {}
        many => {
            let names: Vec<&str> = many.iter().map(|s| s.name.as_str()).collect();
            bail!("Sheet name '{}' is ambiguous: {}", name, names.join(", "));
        }
    }

    bail!(
        "Sheet not found: {}. Available sheets: {}",
        name,
        workbook.sheet_names().join(", ")
    )
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max <= 3 {
        s.chars().take(max).collect()
    } else {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    }
}
