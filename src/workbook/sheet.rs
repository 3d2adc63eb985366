//! In-memory sheet representation

use chrono::NaiveDate;
use std::fmt;

/// A single cell after load-time coercion.
///
/// Malformed source cells (formula errors, unparseable dates) are coerced to
/// `Empty` by the loader rather than failing the whole load.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Render the cell the way it appears in tables and CSV exports.
    ///
    /// Dates are ISO formatted; whole numbers drop the trailing `.0`.
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Bool(b) => b.to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// A named table of rows with a shared header.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    /// Trimmed display names, in source column order.
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find a column index by header, ignoring case and surrounding/internal
    /// whitespace differences.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        let wanted = normalize_header(header);
        self.columns
            .iter()
            .position(|c| normalize_header(c) == wanted)
    }

    /// First column whose header contains the given fragment (normalized).
    pub fn column_index_containing(&self, fragment: &str) -> Option<usize> {
        let wanted = normalize_header(fragment);
        self.columns
            .iter()
            .position(|c| normalize_header(c).contains(&wanted))
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }
}

/// Lowercase a header and collapse runs of whitespace to single spaces.
pub fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
