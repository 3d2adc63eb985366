//! Task data model

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

/// Task status as recorded in the workbook.
///
/// The canonical three stages keep their own variants so the overdue
/// invariant can test for `Complete`; anything else the sheet contains is
/// preserved as `Other` so status breakdowns stay faithful to the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Complete,
    Other(String),
}

impl TaskStatus {
    /// Parse a status cell. Accepts the Planner-export spellings
    /// ("Not started", "In progress", "Completed") as well as the plain
    /// forms; a blank cell parses as `Other("")`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "not started" | "notstarted" | "todo" => Self::NotStarted,
            "in progress" | "in-progress" | "inprogress" | "started" => Self::InProgress,
            "complete" | "completed" | "done" => Self::Complete,
            _ => Self::Other(s.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Complete => "Complete",
            Self::Other(s) if s.is_empty() => "(none)",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// JSON output carries the display label, not the enum structure.
impl Serialize for TaskStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

/// One task row, typed.
#[derive(Debug, Clone, Serialize)]
pub struct TaskRecord {
    pub title: String,
    pub bucket: Option<String>,
    pub status: TaskStatus,
    pub priority: Option<String>,
    pub assigned_to: Option<String>,
    pub start: Option<NaiveDate>,
    pub due: Option<NaiveDate>,
    pub completed: Option<NaiveDate>,
    /// Index of the source row within its sheet.
    pub row: usize,
}

impl TaskRecord {
    /// A row is overdue iff its due date has passed and it is not complete.
    /// Rows without a due date are never overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due {
            Some(due) => due < today && self.status != TaskStatus::Complete,
            None => false,
        }
    }

    pub fn days_late(&self, today: NaiveDate) -> i64 {
        self.due.map(|due| (today - due).num_days()).unwrap_or(0)
    }
}
