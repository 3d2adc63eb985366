//! Gantt-style timeline tab
//!
//! One horizontal bar per task, from start date to due date, labeled by
//! title and colored by bucket.

use chrono::{Datelike, Duration, NaiveDate};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::styles::Theme;
use crate::analytics::TimelineSpan;
use crate::task::TaskStatus;

/// Maps dates onto terminal columns for the visible range.
struct TimelineGrid {
    start: NaiveDate,
    days: i64,
    bar_width: u16,
    label_width: u16,
}

impl TimelineGrid {
    fn from_spans(spans: &[TimelineSpan], area_width: u16) -> Self {
        let label_width = 28u16.min(area_width / 3);
        let bar_width = area_width.saturating_sub(label_width).saturating_sub(1);

        let (start, end) = match (
            spans.iter().map(|s| s.start).min(),
            spans.iter().map(|s| s.due).max(),
        ) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                let today = chrono::Local::now().date_naive();
                (today - Duration::days(7), today)
            }
        };

        Self {
            start,
            days: (end - start).num_days().max(1),
            bar_width,
            label_width,
        }
    }

    fn column(&self, date: NaiveDate) -> u16 {
        if self.bar_width == 0 {
            return 0;
        }
        let offset = (date - self.start).num_days();
        let ratio = offset as f64 / self.days as f64;
        (ratio * self.bar_width as f64).clamp(0.0, self.bar_width as f64 - 1.0) as u16
    }

    /// Month starts within the visible range, used for the date scale.
    fn month_marks(&self) -> Vec<(NaiveDate, u16)> {
        let end = self.start + Duration::days(self.days);
        let mut marks = Vec::new();

        let mut month = NaiveDate::from_ymd_opt(self.start.year(), self.start.month(), 1)
            .unwrap_or(self.start);
        while month <= end {
            if month >= self.start {
                marks.push((month, self.column(month)));
            }
            month = if month.month() == 12 {
                NaiveDate::from_ymd_opt(month.year() + 1, 1, 1).unwrap_or(end + Duration::days(1))
            } else {
                NaiveDate::from_ymd_opt(month.year(), month.month() + 1, 1)
                    .unwrap_or(end + Duration::days(1))
            };
        }

        marks
    }

    fn header_line(&self, theme: &Theme) -> Line<'static> {
        let width = self.bar_width as usize;
        let mut chars = vec![' '; width];

        // Short ranges get the start/end dates, long ranges get month labels.
        if self.days <= 21 {
            place(&mut chars, 0, &self.start.format("%d/%m").to_string());
            let end = self.start + Duration::days(self.days);
            let label = end.format("%d/%m").to_string();
            let pos = width.saturating_sub(label.len());
            place(&mut chars, pos, &label);
        } else {
            for (month, col) in self.month_marks() {
                place(&mut chars, col as usize, &month.format("%b").to_string());
            }
        }

        Line::from(vec![
            Span::raw(" ".repeat(self.label_width as usize)),
            Span::styled(
                chars.into_iter().collect::<String>(),
                Style::default().fg(theme.dimmed),
            ),
        ])
    }

    fn separator_line(&self, theme: &Theme) -> Line<'static> {
        let width = self.bar_width as usize;
        let mut chars = vec!['─'; width];

        if self.days > 21 {
            for (_, col) in self.month_marks() {
                if (col as usize) < width && col > 0 {
                    chars[col as usize] = '┼';
                }
            }
        }

        Line::from(vec![
            Span::raw(" ".repeat(self.label_width as usize)),
            Span::styled(
                chars.into_iter().collect::<String>(),
                Style::default().fg(theme.border),
            ),
        ])
    }
}

fn place(chars: &mut [char], pos: usize, label: &str) {
    for (i, c) in label.chars().enumerate() {
        if pos + i < chars.len() {
            chars[pos + i] = c;
        }
    }
}

pub fn render_timeline(
    frame: &mut Frame,
    area: Rect,
    spans: &[TimelineSpan],
    scroll: usize,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Timeline (Start → Due) ")
        .title_style(Style::default().fg(theme.title));

    if spans.is_empty() {
        let empty = Paragraph::new("No rows with both start and due dates")
            .block(block)
            .style(Style::default().fg(theme.dimmed))
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2);
    let grid = TimelineGrid::from_spans(spans, inner_width);

    // Stable bucket → color assignment in first-seen order.
    let mut buckets: Vec<&str> = Vec::new();
    for span in spans {
        let bucket = span.bucket.as_deref().unwrap_or("(none)");
        if !buckets.contains(&bucket) {
            buckets.push(bucket);
        }
    }

    let mut lines = vec![grid.header_line(theme), grid.separator_line(theme)];

    for span in spans {
        let bucket = span.bucket.as_deref().unwrap_or("(none)");
        let color_index = buckets.iter().position(|b| *b == bucket).unwrap_or(0);
        lines.push(span_line(span, &grid, theme.category_color(color_index), theme));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

fn span_line(
    span: &TimelineSpan,
    grid: &TimelineGrid,
    color: ratatui::style::Color,
    theme: &Theme,
) -> Line<'static> {
    let label_width = grid.label_width as usize;
    let title = crate::cli::truncate(&span.title, label_width.saturating_sub(1));
    let label = format!("{:<width$}", title, width = label_width);

    let bar_width = grid.bar_width as usize;
    let mut chars = vec![' '; bar_width];

    let start_col = grid.column(span.start) as usize;
    let end_col = (grid.column(span.due) as usize).max(start_col) + 1;

    // Complete tasks get a solid bar, open ones a shaded bar.
    let bar_char = if span.status == TaskStatus::Complete {
        '█'
    } else {
        '▒'
    };
    for slot in chars.iter_mut().take(end_col.min(bar_width)).skip(start_col) {
        *slot = bar_char;
    }

    Line::from(vec![
        Span::styled(label, Style::default().fg(theme.text)),
        Span::raw(" "),
        Span::styled(
            chars.into_iter().collect::<String>(),
            Style::default().fg(color),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn span(start: NaiveDate, due: NaiveDate) -> TimelineSpan {
        TimelineSpan {
            title: "Test".to_string(),
            bucket: None,
            start,
            due,
            status: TaskStatus::InProgress,
        }
    }

    #[test]
    fn test_grid_column_mapping() {
        let spans = vec![span(date(2025, 1, 1), date(2025, 1, 11))];
        let grid = TimelineGrid::from_spans(&spans, 90);

        assert_eq!(grid.column(date(2025, 1, 1)), 0);
        let mid = grid.column(date(2025, 1, 6));
        let end = grid.column(date(2025, 1, 11));
        assert!(mid > 0 && mid < end);
        assert!(end < grid.bar_width);
    }

    #[test]
    fn test_grid_column_clamps_out_of_range() {
        let spans = vec![span(date(2025, 1, 1), date(2025, 1, 11))];
        let grid = TimelineGrid::from_spans(&spans, 90);

        assert_eq!(grid.column(date(2024, 12, 1)), 0);
        assert_eq!(grid.column(date(2026, 1, 1)), grid.bar_width - 1);
    }

    #[test]
    fn test_grid_empty_spans_defaults_to_last_week() {
        let grid = TimelineGrid::from_spans(&[], 90);
        assert_eq!(grid.days, 7);
    }

    #[test]
    fn test_month_marks_cover_range() {
        let spans = vec![span(date(2025, 1, 15), date(2025, 4, 10))];
        let grid = TimelineGrid::from_spans(&spans, 120);
        let marks = grid.month_marks();
        // Feb, Mar, Apr fall inside the range; Jan 1 precedes it.
        assert_eq!(marks.len(), 3);
        assert_eq!(marks[0].0, date(2025, 2, 1));
    }
}
