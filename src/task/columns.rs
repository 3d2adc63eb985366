//! Column detection for task sheets

use crate::workbook::Sheet;

use super::{TaskRecord, TaskStatus};

/// Resolved column positions for the task fields a sheet actually has.
#[derive(Debug, Clone)]
pub struct TaskColumns {
    pub title: usize,
    pub bucket: Option<usize>,
    pub status: Option<usize>,
    pub priority: Option<usize>,
    pub assigned_to: Option<usize>,
    pub start: Option<usize>,
    pub due: Option<usize>,
    pub completed: Option<usize>,
}

impl TaskColumns {
    /// Detect the task column mapping of a sheet.
    ///
    /// The title column is matched by name; when no title-like header exists
    /// the first column stands in, but only if the sheet also has a status or
    /// due-date column — otherwise the sheet is not a task table and `None`
    /// is returned.
    pub fn detect(sheet: &Sheet) -> Option<Self> {
        if sheet.columns.is_empty() {
            return None;
        }

        let title = first_match(sheet, &["Task Name", "Title", "Name"]);
        // Planner exports call the status column "Progress".
        let status = first_match(sheet, &["Progress", "Status"]);
        let due = first_match(sheet, &["Due date"]);

        let title = match title {
            Some(idx) => idx,
            None if status.is_some() || due.is_some() => 0,
            None => return None,
        };

        Some(Self {
            title,
            bucket: first_match(sheet, &["Bucket Name", "Bucket"]),
            status,
            priority: first_match(sheet, &["Priority"]),
            assigned_to: first_match(sheet, &["Assigned To", "Assignee"]),
            start: first_match(sheet, &["Start date"]),
            due,
            completed: first_match(sheet, &["Completed Date", "Completed"]),
        })
    }

    /// Project the sheet's rows into task records. Rows whose mapped cells
    /// are all empty (trailing blank rows) are skipped.
    pub fn extract(&self, sheet: &Sheet) -> Vec<TaskRecord> {
        sheet
            .rows
            .iter()
            .enumerate()
            .filter_map(|(row, _)| self.record(sheet, row))
            .collect()
    }

    fn record(&self, sheet: &Sheet, row: usize) -> Option<TaskRecord> {
        let title = sheet.cell(row, self.title).display();
        let bucket = self.text_at(sheet, row, self.bucket);
        let status_text = self.text_at(sheet, row, self.status);
        let priority = self.text_at(sheet, row, self.priority);
        let assigned_to = self.text_at(sheet, row, self.assigned_to);
        let start = self.date_at(sheet, row, self.start);
        let due = self.date_at(sheet, row, self.due);
        let completed = self.date_at(sheet, row, self.completed);

        let all_empty = title.is_empty()
            && bucket.is_none()
            && status_text.is_none()
            && priority.is_none()
            && start.is_none()
            && due.is_none();
        if all_empty {
            return None;
        }

        Some(TaskRecord {
            title,
            bucket,
            status: TaskStatus::parse(status_text.as_deref().unwrap_or("")),
            priority,
            assigned_to,
            start,
            due,
            completed,
            row,
        })
    }

    fn text_at(&self, sheet: &Sheet, row: usize, col: Option<usize>) -> Option<String> {
        let value = sheet.cell(row, col?).display();
        if value.trim().is_empty() {
            None
        } else {
            Some(value.trim().to_string())
        }
    }

    fn date_at(
        &self,
        sheet: &Sheet,
        row: usize,
        col: Option<usize>,
    ) -> Option<chrono::NaiveDate> {
        sheet.cell(row, col?).as_date()
    }
}

fn first_match(sheet: &Sheet, names: &[&str]) -> Option<usize> {
    names.iter().find_map(|n| sheet.column_index(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::CellValue;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> CellValue {
        CellValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn planner_sheet() -> Sheet {
        Sheet {
            name: "Tasks".to_string(),
            columns: vec![
                "Task Name".to_string(),
                "Bucket Name".to_string(),
                "Progress".to_string(),
                "Priority".to_string(),
                "Start date".to_string(),
                "Due date".to_string(),
            ],
            rows: vec![
                vec![
                    text("Install pump"),
                    text("Civils"),
                    text("In progress"),
                    text("Urgent"),
                    date(2025, 9, 1),
                    date(2025, 10, 1),
                ],
                vec![
                    text("Sign off drawings"),
                    text("Design"),
                    text("Completed"),
                    text("Medium"),
                    date(2025, 8, 1),
                    date(2025, 8, 20),
                ],
                // Trailing blank row from the export
                vec![
                    CellValue::Empty,
                    CellValue::Empty,
                    CellValue::Empty,
                    CellValue::Empty,
                    CellValue::Empty,
                    CellValue::Empty,
                ],
            ],
        }
    }

    #[test]
    fn test_detect_planner_columns() {
        let sheet = planner_sheet();
        let cols = TaskColumns::detect(&sheet).unwrap();
        assert_eq!(cols.title, 0);
        assert_eq!(cols.bucket, Some(1));
        assert_eq!(cols.status, Some(2));
        assert_eq!(cols.due, Some(5));
    }

    #[test]
    fn test_detect_rejects_non_task_sheet() {
        let sheet = Sheet {
            name: "Budget".to_string(),
            columns: vec!["Item".to_string(), "Cost".to_string()],
            rows: Vec::new(),
        };
        assert!(TaskColumns::detect(&sheet).is_none());
    }

    #[test]
    fn test_detect_title_fallback_with_status() {
        let sheet = Sheet {
            name: "Snags".to_string(),
            columns: vec!["Description".to_string(), "Status".to_string()],
            rows: Vec::new(),
        };
        let cols = TaskColumns::detect(&sheet).unwrap();
        assert_eq!(cols.title, 0);
        assert_eq!(cols.status, Some(1));
    }

    #[test]
    fn test_extract_skips_blank_rows() {
        let sheet = planner_sheet();
        let cols = TaskColumns::detect(&sheet).unwrap();
        let records = cols.extract(&sheet);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Install pump");
        assert_eq!(records[0].status, TaskStatus::InProgress);
        assert_eq!(records[1].status, TaskStatus::Complete);
        assert_eq!(records[1].row, 1);
    }
}
