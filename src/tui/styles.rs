//! TUI theme and styling

use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    // Background and borders
    pub background: Color,
    pub border: Color,
    pub selection: Color,

    // Text colors
    pub title: Color,
    pub text: Color,
    pub dimmed: Color,
    pub hint: Color,

    // Status colors
    pub complete: Color,
    pub in_progress: Color,
    pub not_started: Color,
    pub overdue: Color,

    // UI elements
    pub accent: Color,
    pub search: Color,

    /// Category colors for charts and timeline bars, cycled per label.
    pub palette: [Color; 6],
}

impl Default for Theme {
    fn default() -> Self {
        Self::ember()
    }
}

impl Theme {
    pub fn ember() -> Self {
        Self {
            background: Color::Rgb(18, 18, 18),
            border: Color::Rgb(42, 42, 42),
            selection: Color::Rgb(48, 36, 28),

            title: Color::Rgb(242, 101, 34),
            text: Color::Rgb(242, 242, 242),
            dimmed: Color::Rgb(110, 110, 110),
            hint: Color::Rgb(160, 140, 120),

            complete: Color::Rgb(119, 221, 119),
            in_progress: Color::Rgb(255, 250, 205),
            not_started: Color::Rgb(174, 198, 207),
            overdue: Color::Rgb(255, 182, 193),

            accent: Color::Rgb(242, 101, 34),
            search: Color::Rgb(255, 200, 160),

            palette: [
                Color::Rgb(174, 198, 207),
                Color::Rgb(119, 221, 119),
                Color::Rgb(203, 170, 203),
                Color::Rgb(255, 250, 205),
                Color::Rgb(255, 179, 71),
                Color::Rgb(255, 182, 193),
            ],
        }
    }

    /// Stable color for a category label, cycling the palette by position.
    pub fn category_color(&self, index: usize) -> Color {
        self.palette[index % self.palette.len()]
    }
}
