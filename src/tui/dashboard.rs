//! Dashboard view - sheet list, tabbed content, and status bar

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::app::Action;
use super::components::HelpOverlay;
use super::styles::Theme;
use super::{charts, timeline};
use crate::analytics::{
    bucket_counts, filter_by_title, overdue_tasks, priority_counts, status_counts, timeline_spans,
    Kpis,
};
use crate::export::{export_file_name, write_csv};
use crate::task::{TaskColumns, TaskRecord};
use crate::workbook::{Sheet, Workbook};

const CONTENT_SCROLL_STEP: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTab {
    Overview,
    Timeline,
    Overdue,
    Data,
}

impl ActiveTab {
    const TITLES: [&'static str; 4] = ["Overview", "Timeline", "Overdue", "Data"];

    fn index(self) -> usize {
        match self {
            Self::Overview => 0,
            Self::Timeline => 1,
            Self::Overdue => 2,
            Self::Data => 3,
        }
    }

    fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::Overview,
            1 => Self::Timeline,
            2 => Self::Overdue,
            _ => Self::Data,
        }
    }

    fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    fn previous(self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

pub struct DashboardView {
    workbook: Workbook,
    cursor: usize,
    tab: ActiveTab,
    scroll: usize,

    // Search
    search_active: bool,
    search_query: String,

    // Overlays and feedback
    show_help: bool,
    status_message: Option<String>,
}

impl DashboardView {
    pub fn new(workbook: Workbook) -> Self {
        let default_name = workbook.default_sheet().name.clone();
        let cursor = workbook
            .sheets
            .iter()
            .position(|s| s.name == default_name)
            .unwrap_or(0);

        Self {
            workbook,
            cursor,
            tab: ActiveTab::Overview,
            scroll: 0,
            search_active: false,
            search_query: String::new(),
            show_help: false,
            status_message: None,
        }
    }

    pub fn has_overlay(&self) -> bool {
        self.show_help || self.search_active
    }

    fn selected_sheet(&self) -> &Sheet {
        &self.workbook.sheets[self.cursor]
    }

    /// Task records of the selected sheet with the search filter applied.
    /// Sheets without task columns yield nothing.
    fn records(&self) -> Option<Vec<TaskRecord>> {
        let sheet = self.selected_sheet();
        let cols = TaskColumns::detect(sheet)?;
        let records = cols.extract(sheet);
        Some(filter_by_title(&records, &self.search_query))
    }

    pub fn reload(&mut self) {
        match self.workbook.reload() {
            Ok(workbook) => {
                self.workbook = workbook;
                self.cursor = self.cursor.min(self.workbook.sheets.len() - 1);
                self.scroll = 0;
                self.status_message = Some("Workbook reloaded".to_string());
            }
            // A failed reload keeps the in-memory workbook.
            Err(err) => {
                self.status_message = Some(format!("Reload failed: {}", err));
            }
        }
    }

    /// Export the currently displayed table to `<sheet>_export.csv`.
    fn export_current(&mut self) {
        let sheet = self.selected_sheet();
        let today = Local::now().date_naive();

        let rows: Option<Vec<usize>> = match self.tab {
            ActiveTab::Overdue => self
                .records()
                .map(|recs| overdue_tasks(&recs, today).iter().map(|r| r.row).collect()),
            _ if self.search_query.is_empty() => None,
            _ => self.records().map(|recs| recs.iter().map(|r| r.row).collect()),
        };

        let path = std::path::PathBuf::from(export_file_name(&sheet.name));
        let row_count = rows.as_ref().map(|r| r.len()).unwrap_or(sheet.row_count());

        self.status_message = match write_csv(sheet, rows.as_deref(), &path) {
            Ok(()) => Some(format!("Exported {} rows to {}", row_count, path.display())),
            Err(err) => Some(format!("Export failed: {}", err)),
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return None;
        }

        if self.search_active {
            match key.code {
                KeyCode::Esc => {
                    self.search_query.clear();
                    self.search_active = false;
                }
                KeyCode::Enter => self.search_active = false,
                KeyCode::Backspace => {
                    self.search_query.pop();
                }
                KeyCode::Char(c) => self.search_query.push(c),
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => self.select_sheet(1),
            KeyCode::Char('k') | KeyCode::Up => self.select_sheet(-1),
            KeyCode::Char('J') | KeyCode::PageDown => self.scroll += CONTENT_SCROLL_STEP,
            KeyCode::Char('K') | KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(CONTENT_SCROLL_STEP)
            }
            KeyCode::Tab => self.switch_tab(self.tab.next()),
            KeyCode::BackTab => self.switch_tab(self.tab.previous()),
            KeyCode::Char(c @ '1'..='4') => {
                self.switch_tab(ActiveTab::from_index(c as usize - '1' as usize))
            }
            KeyCode::Char('/') => {
                self.search_active = true;
                self.status_message = None;
            }
            KeyCode::Esc => {
                self.search_query.clear();
                self.status_message = None;
            }
            KeyCode::Char('e') => self.export_current(),
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }

        None
    }

    fn select_sheet(&mut self, direction: isize) {
        let len = self.workbook.sheets.len() as isize;
        let next = (self.cursor as isize + direction).clamp(0, len - 1);
        if next as usize != self.cursor {
            self.cursor = next as usize;
            self.scroll = 0;
            self.status_message = None;
        }
    }

    fn switch_tab(&mut self, tab: ActiveTab) {
        if tab != self.tab {
            self.tab = tab;
            self.scroll = 0;
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
            .split(main_chunks[0]);

        self.render_sheet_list(frame, panels[0], theme);
        self.render_content(frame, panels[1], theme);
        self.render_status_bar(frame, main_chunks[1], theme);

        if self.show_help {
            HelpOverlay::render(frame, area, theme);
        }
    }

    fn render_sheet_list(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Sheets ")
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let items: Vec<ListItem> = self
            .workbook
            .sheets
            .iter()
            .enumerate()
            .map(|(i, sheet)| {
                let is_selected = i == self.cursor;
                let marker = if is_selected { "▶ " } else { "  " };
                let line = Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme.accent)),
                    Span::styled(
                        sheet.name.clone(),
                        if is_selected {
                            Style::default().fg(theme.text).bold()
                        } else {
                            Style::default().fg(theme.text)
                        },
                    ),
                    Span::styled(
                        format!(" ({})", sheet.row_count()),
                        Style::default().fg(theme.dimmed),
                    ),
                ]);
                if is_selected {
                    ListItem::new(line).style(Style::default().bg(theme.selection))
                } else {
                    ListItem::new(line)
                }
            })
            .collect();

        frame.render_widget(List::new(items), inner);
    }

    fn render_content(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let titles: Vec<Line> = ActiveTab::TITLES.iter().map(|t| Line::from(*t)).collect();
        let tabs = Tabs::new(titles)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border)),
            )
            .select(self.tab.index())
            .style(Style::default().fg(theme.dimmed))
            .highlight_style(Style::default().fg(theme.accent).bold());
        frame.render_widget(tabs, chunks[0]);

        match self.tab {
            ActiveTab::Overview => self.render_overview(frame, chunks[1], theme),
            ActiveTab::Timeline => self.render_timeline(frame, chunks[1], theme),
            ActiveTab::Overdue => self.render_overdue(frame, chunks[1], theme),
            ActiveTab::Data => self.render_data(frame, chunks[1], theme),
        }
    }

    fn render_overview(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(records) = self.records() else {
            self.render_no_task_columns(frame, area, theme);
            return;
        };

        let today = Local::now().date_naive();
        let kpis = Kpis::compute(&records, today);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(area);

        charts::render_kpi_cards(frame, chunks[0], &kpis, theme);

        let thirds = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(chunks[1]);

        charts::render_distribution(
            frame,
            thirds[0],
            "Status",
            &status_counts(&records),
            theme,
            |_, label| charts::status_color(theme, label),
        );
        charts::render_distribution(
            frame,
            thirds[1],
            "Tasks per Bucket",
            &bucket_counts(&records),
            theme,
            |i, _| theme.category_color(i),
        );
        charts::render_distribution(
            frame,
            thirds[2],
            "Priority",
            &priority_counts(&records),
            theme,
            |i, _| theme.category_color(i),
        );
    }

    fn render_timeline(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(records) = self.records() else {
            self.render_no_task_columns(frame, area, theme);
            return;
        };
        let spans = timeline_spans(&records);
        timeline::render_timeline(frame, area, &spans, self.scroll, theme);
    }

    fn render_overdue(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(records) = self.records() else {
            self.render_no_task_columns(frame, area, theme);
            return;
        };

        let today = Local::now().date_naive();
        let overdue = overdue_tasks(&records, today);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" Overdue ({}) ", overdue.len()))
            .title_style(Style::default().fg(theme.title));

        if overdue.is_empty() {
            let empty = Paragraph::new("No overdue tasks")
                .block(block)
                .style(Style::default().fg(theme.dimmed))
                .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        }

        let inner_width = area.width.saturating_sub(2) as usize;
        let title_width = inner_width.saturating_sub(44).clamp(10, 48);

        let mut lines = vec![Line::from(Span::styled(
            format!(
                "{:<tw$} {:<16} {:<10} {:<10} {:>4}",
                "TITLE",
                "BUCKET",
                "PRIORITY",
                "DUE",
                "LATE",
                tw = title_width
            ),
            Style::default().fg(theme.dimmed).bold(),
        ))];

        for rec in &overdue {
            let due = rec
                .due
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            lines.push(Line::from(Span::styled(
                format!(
                    "{:<tw$} {:<16} {:<10} {:<10} {:>4}",
                    crate::cli::truncate(&rec.title, title_width),
                    crate::cli::truncate(rec.bucket.as_deref().unwrap_or("-"), 16),
                    crate::cli::truncate(rec.priority.as_deref().unwrap_or("-"), 10),
                    due,
                    rec.days_late(today),
                    tw = title_width
                ),
                Style::default().fg(theme.overdue),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, area);
    }

    fn render_data(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let sheet = self.selected_sheet();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" {} ", sheet.name))
            .title_style(Style::default().fg(theme.title));

        if sheet.is_empty() {
            let empty = Paragraph::new("Sheet is empty")
                .block(block)
                .style(Style::default().fg(theme.dimmed))
                .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        }

        // Visible rows: the search filter applies when the sheet is a task
        // table, otherwise every row shows.
        let row_indices: Vec<usize> = match self.records() {
            Some(records) if !self.search_query.is_empty() => {
                records.iter().map(|r| r.row).collect()
            }
            _ => (0..sheet.row_count()).collect(),
        };

        // Per-status row coloring, mirroring the source dashboard's
        // completed/overdue row highlighting.
        let today = Local::now().date_naive();
        let row_styles: std::collections::HashMap<usize, Style> = match TaskColumns::detect(sheet) {
            Some(cols) => cols
                .extract(sheet)
                .iter()
                .filter_map(|rec| {
                    if rec.status == crate::task::TaskStatus::Complete {
                        Some((rec.row, Style::default().fg(theme.complete)))
                    } else if rec.is_overdue(today) {
                        Some((rec.row, Style::default().fg(theme.overdue)))
                    } else {
                        None
                    }
                })
                .collect(),
            None => Default::default(),
        };

        let widths: Vec<usize> = sheet
            .columns
            .iter()
            .map(|c| c.chars().count().clamp(8, 18))
            .collect();

        let header = Line::from(Span::styled(
            format_row(
                &sheet
                    .columns
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>(),
                &widths,
            ),
            Style::default().fg(theme.dimmed).bold(),
        ));

        let mut lines = vec![header];
        for &row in &row_indices {
            let cells: Vec<String> = (0..sheet.columns.len())
                .map(|col| sheet.cell(row, col).display())
                .collect();
            let style = row_styles
                .get(&row)
                .copied()
                .unwrap_or_else(|| Style::default().fg(theme.text));
            lines.push(Line::from(Span::styled(format_row(&cells, &widths), style)));
        }

        if row_indices.is_empty() {
            lines.push(Line::from(Span::styled(
                "No rows match the search",
                Style::default().fg(theme.dimmed),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, area);
    }

    fn render_no_task_columns(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Sheet '{}' has no task columns", self.selected_sheet().name),
                Style::default().fg(theme.dimmed),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Needs a title column plus a status or due-date column.",
                Style::default().fg(theme.hint),
            )),
            Line::from(Span::styled(
                "The Data tab (4) shows the raw rows.",
                Style::default().fg(theme.hint),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let key_style = Style::default().fg(theme.accent).bold();
        let desc_style = Style::default().fg(theme.dimmed);
        let sep_style = Style::default().fg(theme.border);

        let mut spans = Vec::new();

        if self.search_active || !self.search_query.is_empty() {
            spans.push(Span::styled(
                format!(" /{}", self.search_query),
                Style::default().fg(theme.search),
            ));
            if self.search_active {
                spans.push(Span::styled("▏", Style::default().fg(theme.search)));
            }
            spans.push(Span::styled(" │", sep_style));
        } else if let Some(msg) = &self.status_message {
            spans.push(Span::styled(
                format!(" {}", msg),
                Style::default().fg(theme.accent),
            ));
            spans.push(Span::styled(" │", sep_style));
        }

        for (key, desc) in [
            ("j/k", " Sheets "),
            ("Tab", " Views "),
            ("/", " Search "),
            ("e", " Export "),
            ("r", " Reload "),
            ("?", " Help "),
            ("q", " Quit"),
        ] {
            spans.push(Span::styled(format!(" {}", key), key_style));
            spans.push(Span::styled(desc, desc_style));
        }

        let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.selection));
        frame.render_widget(status, area);
    }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut out = String::new();
    for (cell, width) in cells.iter().zip(widths) {
        out.push_str(&format!(
            "{:<w$} ",
            crate::cli::truncate(cell, *width),
            w = width
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::CellValue;
    use crossterm::event::KeyModifiers;
    use std::path::PathBuf;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_workbook() -> Workbook {
        Workbook {
            path: PathBuf::from("test.xlsx"),
            sheets: vec![
                Sheet {
                    name: "Summary".to_string(),
                    columns: vec!["Item".to_string()],
                    rows: vec![vec![CellValue::Text("x".to_string())]],
                },
                Sheet {
                    name: "Tasks".to_string(),
                    columns: vec![
                        "Task Name".to_string(),
                        "Progress".to_string(),
                        "Due date".to_string(),
                    ],
                    rows: vec![vec![
                        CellValue::Text("Install pump".to_string()),
                        CellValue::Text("In progress".to_string()),
                        CellValue::Empty,
                    ]],
                },
            ],
        }
    }

    #[test]
    fn test_new_selects_tasks_sheet() {
        let view = DashboardView::new(test_workbook());
        assert_eq!(view.selected_sheet().name, "Tasks");
    }

    #[test]
    fn test_sheet_navigation_clamps() {
        let mut view = DashboardView::new(test_workbook());
        view.handle_key(key(KeyCode::Char('j')));
        assert_eq!(view.cursor, 1);
        view.handle_key(key(KeyCode::Char('k')));
        view.handle_key(key(KeyCode::Char('k')));
        assert_eq!(view.cursor, 0);
    }

    #[test]
    fn test_tab_cycling() {
        let mut view = DashboardView::new(test_workbook());
        assert_eq!(view.tab, ActiveTab::Overview);
        view.handle_key(key(KeyCode::Tab));
        assert_eq!(view.tab, ActiveTab::Timeline);
        view.handle_key(key(KeyCode::BackTab));
        assert_eq!(view.tab, ActiveTab::Overview);
        view.handle_key(key(KeyCode::Char('4')));
        assert_eq!(view.tab, ActiveTab::Data);
    }

    #[test]
    fn test_search_input_and_clear() {
        let mut view = DashboardView::new(test_workbook());
        view.handle_key(key(KeyCode::Char('/')));
        assert!(view.search_active);

        // While searching, 'q' types instead of quitting
        assert!(view.handle_key(key(KeyCode::Char('p'))).is_none());
        assert!(view.handle_key(key(KeyCode::Char('u'))).is_none());
        assert_eq!(view.search_query, "pu");

        view.handle_key(key(KeyCode::Enter));
        assert!(!view.search_active);
        assert_eq!(view.records().unwrap().len(), 1);

        view.handle_key(key(KeyCode::Esc));
        assert!(view.search_query.is_empty());
    }

    #[test]
    fn test_quit_action() {
        let mut view = DashboardView::new(test_workbook());
        assert_eq!(view.handle_key(key(KeyCode::Char('q'))), Some(Action::Quit));
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut view = DashboardView::new(test_workbook());
        view.handle_key(key(KeyCode::Char('?')));
        assert!(view.show_help);
        assert!(view.handle_key(key(KeyCode::Char('q'))).is_none());
        assert!(!view.show_help);
    }

    #[test]
    fn test_records_none_for_non_task_sheet() {
        let mut view = DashboardView::new(test_workbook());
        view.handle_key(key(KeyCode::Char('k')));
        assert_eq!(view.selected_sheet().name, "Summary");
        assert!(view.records().is_none());
    }
}
