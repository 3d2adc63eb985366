//! Application event loop

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::Block;

use super::dashboard::DashboardView;
use super::styles::Theme;
use crate::workbook::Workbook;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Requests a view hands back to the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
}

pub struct App {
    view: DashboardView,
    theme: Theme,
    should_quit: bool,
}

impl App {
    pub fn new(workbook: Workbook) -> Self {
        Self {
            view: DashboardView::new(workbook),
            theme: Theme::default(),
            should_quit: false,
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()>
    where
        B::Error: Send + Sync + 'static,
    {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.background)),
            area,
        );
        self.view.render(frame, area, &self.theme);
    }

    fn handle_events(&mut self) -> Result<()> {
        if !event::poll(POLL_INTERVAL)? {
            return Ok(());
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                // Ctrl-C always quits, even while an overlay is open
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    self.should_quit = true;
                    return Ok(());
                }
                if self.view.handle_key(key) == Some(Action::Quit) {
                    self.should_quit = true;
                }
            }
            Event::Resize(_, _) => {}
            _ => {}
        }

        Ok(())
    }
}
