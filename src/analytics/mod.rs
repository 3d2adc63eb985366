//! Aggregates behind the dashboard: KPI counts, grouped distributions,
//! timeline spans, and the overdue filter.
//!
//! Everything here is a pure function over task records; the reference date
//! is always a parameter so callers (and tests) control the clock.

use chrono::NaiveDate;
use serde::Serialize;

use crate::task::{TaskRecord, TaskStatus};

/// Headline counts for the KPI cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Kpis {
    pub total: usize,
    pub complete: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub other: usize,
    pub overdue: usize,
}

impl Kpis {
    pub fn compute(records: &[TaskRecord], today: NaiveDate) -> Self {
        let mut kpis = Self {
            total: records.len(),
            complete: 0,
            in_progress: 0,
            not_started: 0,
            other: 0,
            overdue: 0,
        };

        for rec in records {
            match rec.status {
                TaskStatus::Complete => kpis.complete += 1,
                TaskStatus::InProgress => kpis.in_progress += 1,
                TaskStatus::NotStarted => kpis.not_started += 1,
                TaskStatus::Other(_) => kpis.other += 1,
            }
            if rec.is_overdue(today) {
                kpis.overdue += 1;
            }
        }

        kpis
    }
}

/// Grouped counts by an arbitrary category accessor, sorted by descending
/// count then label. Records where the accessor yields nothing group under
/// "(none)".
pub fn count_by<F>(records: &[TaskRecord], accessor: F) -> Vec<(String, usize)>
where
    F: Fn(&TaskRecord) -> Option<String>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();

    for rec in records {
        let key = accessor(rec).unwrap_or_else(|| "(none)".to_string());
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key, 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

pub fn status_counts(records: &[TaskRecord]) -> Vec<(String, usize)> {
    count_by(records, |r| Some(r.status.label().to_string()))
}

pub fn bucket_counts(records: &[TaskRecord]) -> Vec<(String, usize)> {
    count_by(records, |r| r.bucket.clone())
}

pub fn priority_counts(records: &[TaskRecord]) -> Vec<(String, usize)> {
    count_by(records, |r| r.priority.clone())
}

/// One interval on the timeline, from start to due.
#[derive(Debug, Clone)]
pub struct TimelineSpan {
    pub title: String,
    pub bucket: Option<String>,
    pub start: NaiveDate,
    pub due: NaiveDate,
    pub status: TaskStatus,
}

/// Spans for every record that has a title, a start, and a due date; rows
/// missing any of the three are dropped. Inverted ranges are normalized so
/// the bar always runs left to right.
pub fn timeline_spans(records: &[TaskRecord]) -> Vec<TimelineSpan> {
    records
        .iter()
        .filter(|r| !r.title.is_empty())
        .filter_map(|r| {
            let (start, due) = (r.start?, r.due?);
            let (start, due) = if start <= due { (start, due) } else { (due, start) };
            Some(TimelineSpan {
                title: r.title.clone(),
                bucket: r.bucket.clone(),
                start,
                due,
                status: r.status.clone(),
            })
        })
        .collect()
}

/// Records satisfying the overdue invariant, most overdue first.
pub fn overdue_tasks(records: &[TaskRecord], today: NaiveDate) -> Vec<&TaskRecord> {
    let mut overdue: Vec<&TaskRecord> = records.iter().filter(|r| r.is_overdue(today)).collect();
    overdue.sort_by_key(|r| r.due);
    overdue
}

/// Case-insensitive title filter, the dashboard's search box semantics.
pub fn filter_by_title<'a>(records: &'a [TaskRecord], query: &str) -> Vec<TaskRecord> {
    if query.is_empty() {
        return records.to_vec();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| r.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
