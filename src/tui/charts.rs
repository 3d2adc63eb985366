//! KPI cards and distribution bars for the overview tab

use ratatui::prelude::*;
use ratatui::widgets::*;
use unicode_width::UnicodeWidthStr;

use super::styles::Theme;
use crate::analytics::Kpis;

const LABEL_WIDTH: usize = 14;

/// The four headline cards: Total / Complete / In Progress / Overdue.
pub fn render_kpi_cards(frame: &mut Frame, area: Rect, kpis: &Kpis, theme: &Theme) {
    let cards = [
        ("Total Tasks", kpis.total, theme.text),
        ("Complete", kpis.complete, theme.complete),
        ("In Progress", kpis.in_progress, theme.in_progress),
        ("Overdue", kpis.overdue, theme.overdue),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((label, value, color), chunk) in cards.iter().zip(chunks.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" {} ", label))
            .title_style(Style::default().fg(theme.dimmed));

        let inner = block.inner(*chunk);
        frame.render_widget(block, *chunk);

        let number = Paragraph::new(value.to_string())
            .style(Style::default().fg(*color).bold())
            .alignment(Alignment::Center);
        // Vertically center the number in the card
        let offset = inner.height.saturating_sub(1) / 2;
        let number_area = Rect {
            y: inner.y + offset,
            height: 1.min(inner.height),
            ..inner
        };
        frame.render_widget(number, number_area);
    }
}

/// A titled block of horizontal bars, one per category, scaled to the
/// largest count.
pub fn render_distribution<F>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    counts: &[(String, usize)],
    theme: &Theme,
    color_of: F,
) where
    F: Fn(usize, &str) -> Color,
{
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(theme.title));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if counts.is_empty() {
        let empty = Paragraph::new("No data")
            .style(Style::default().fg(theme.dimmed))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let max = counts.iter().map(|(_, n)| *n).max().unwrap_or(1);
    let count_width = max.to_string().len();
    let bar_space = (inner.width as usize)
        .saturating_sub(LABEL_WIDTH + count_width + 3)
        .max(1);

    let lines: Vec<Line> = counts
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            let color = color_of(i, label);
            let bar = "█".repeat(bar_len(*count, max, bar_space));
            Line::from(vec![
                Span::styled(
                    format!("{:<width$} ", pad_label(label, LABEL_WIDTH), width = LABEL_WIDTH),
                    Style::default().fg(theme.text),
                ),
                Span::styled(bar, Style::default().fg(color)),
                Span::styled(
                    format!(" {:>width$}", count, width = count_width),
                    Style::default().fg(theme.dimmed),
                ),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// Color for a status label in the status distribution.
pub fn status_color(theme: &Theme, label: &str) -> Color {
    match label {
        "Complete" => theme.complete,
        "In Progress" => theme.in_progress,
        "Not Started" => theme.not_started,
        _ => theme.dimmed,
    }
}

/// Bar length for a count, scaled so the largest count fills the space.
/// Non-zero counts always get at least one cell.
fn bar_len(count: usize, max: usize, space: usize) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    ((count as f64 / max as f64) * space as f64).round().max(1.0) as usize
}

fn pad_label(label: &str, width: usize) -> String {
    if label.width() <= width {
        return label.to_string();
    }
    let mut out = String::new();
    for c in label.chars() {
        if out.width() + 1 > width.saturating_sub(1) {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}
