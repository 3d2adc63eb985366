//! Workbook loading and in-memory tables

mod error;
mod loader;
mod sheet;

pub use error::LoadError;
pub use sheet::{normalize_header, CellValue, Sheet};

use std::path::{Path, PathBuf};

/// The sheet the dashboard selects by default when present.
pub const DEFAULT_SHEET: &str = "Tasks";

/// An ordered set of named sheets read from a single spreadsheet file.
///
/// The workbook is read once and held in memory; `reload` re-reads the same
/// path on demand.
#[derive(Debug, Clone)]
pub struct Workbook {
    pub path: PathBuf,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        loader::load(path)
    }

    pub fn reload(&self) -> Result<Self, LoadError> {
        loader::load(&self.path)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// The sheet shown when none is named: "Tasks" if the workbook has one
    /// (matching by case-insensitive name), otherwise the first sheet.
    pub fn default_sheet(&self) -> &Sheet {
        self.sheets
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(DEFAULT_SHEET))
            .unwrap_or(&self.sheets[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workbook_with(names: &[&str]) -> Workbook {
        Workbook {
            path: PathBuf::from("test.xlsx"),
            sheets: names
                .iter()
                .map(|n| Sheet {
                    name: n.to_string(),
                    ..Sheet::default()
                })
                .collect(),
        }
    }

    #[test]
    fn test_default_sheet_prefers_tasks() {
        let wb = workbook_with(&["Summary", "tasks", "Budget"]);
        assert_eq!(wb.default_sheet().name, "tasks");
    }

    #[test]
    fn test_default_sheet_falls_back_to_first() {
        let wb = workbook_with(&["Summary", "Budget"]);
        assert_eq!(wb.default_sheet().name, "Summary");
    }

    #[test]
    fn test_sheet_lookup_is_exact() {
        let wb = workbook_with(&["Tasks", "Budget"]);
        assert!(wb.sheet("Tasks").is_some());
        assert!(wb.sheet("tasks").is_none());
    }
}
