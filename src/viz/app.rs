use std::time::Duration;

use crossterm::event::{self, Event, KeyCode};
use log::LevelFilter;
use ratatui::{prelude::*, widgets::*};
use strum::VariantArray;

use super::{
    components::{help::render_help, Component, Logs, RewardPlot},
    tui::{self, Tui},
    util::event_keycode,
};
use crate::{
    error::Result,
    report::{Report, Skip},
};

/// How long to wait for input before redrawing, so new log records show up
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, VariantArray)]
pub enum Tab {
    #[default]
    Plot,
    Logs,
}

impl Tab {
    fn index(self) -> usize {
        Tab::VARIANTS.iter().position(|t| *t == self).unwrap_or_default()
    }

    fn next(self) -> Self {
        Tab::VARIANTS[(self.index() + 1) % Tab::VARIANTS.len()]
    }
}

#[derive(Debug, Default, PartialEq)]
enum State {
    #[default]
    View,
    Quit,
}

/// The root TUI component, shows the reward plot until the user closes it
pub struct App {
    state: State,
    tab: Tab,
    show_help: bool,
    plot: RewardPlot,
    logs: Logs,
    summary: String,
}

impl App {
    pub fn new(report: &Report, log_level: LevelFilter) -> Self {
        Self {
            state: State::default(),
            tab: Tab::default(),
            show_help: false,
            plot: RewardPlot::new(report),
            logs: Logs::new(log_level),
            summary: summary(report),
        }
    }

    /// Initialize the terminal and run the main loop until the user quits
    ///
    /// Restores the terminal on exit
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = tui::enter()?;
        let result = self.event_loop(&mut terminal);
        tui::leave()?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        while self.state != State::Quit {
            terminal.draw(|frame| frame.render_widget(&*self, frame.size()))?;

            if event::poll(POLL_INTERVAL)? {
                let event = event::read()?;
                self.handle_event(&event);
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        let key = event_keycode(event);

        if self.show_help {
            if matches!(key, Some(KeyCode::Esc | KeyCode::Char('h'))) {
                self.show_help = false;
            } else if key == Some(KeyCode::Char('q')) {
                self.state = State::Quit;
            }
            return;
        }

        if self.tab == Tab::Logs && self.logs.handle_ui_event(event) {
            return;
        }

        match key {
            Some(KeyCode::Char('q') | KeyCode::Esc) => self.state = State::Quit,
            Some(KeyCode::Char('h')) => self.show_help = true,
            Some(KeyCode::Tab) => self.tab = self.tab.next(),
            _ => {}
        }
    }
}

/// Status bar text, naming the skipped runs
fn summary(report: &Report) -> String {
    let plotted = format!("{} runs plotted", report.series.len());
    if report.skipped.is_empty() {
        return plotted;
    }

    let skipped = report.skipped.iter().map(Skip::run).collect::<Vec<_>>();
    format!("{plotted}, skipped {}", skipped.join(", "))
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [menu_area, main_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .areas(area);

        Tabs::new(Tab::VARIANTS.iter().map(|t| t.to_string()))
            .block(Block::default().padding(Padding::uniform(1)))
            .white()
            .bold()
            .highlight_style(Style::default().light_green())
            .select(self.tab.index())
            .render(menu_area, buf);

        match self.tab {
            Tab::Plot => self.plot.render_ref(main_area, buf),
            Tab::Logs => self.logs.render_ref(main_area, buf),
        }

        Paragraph::new(Line::from(vec![
            Span::raw(self.summary.as_str()),
            Span::raw("   "),
            Span::from("q").light_cyan().bold(),
            Span::raw(" quit  "),
            Span::from("h").light_cyan().bold(),
            Span::raw(" help  "),
            Span::from("Tab").light_cyan().bold(),
            Span::raw(" switch tab"),
        ]))
        .block(Block::bordered().border_type(BorderType::Rounded))
        .render(status_area, buf);

        if self.show_help {
            render_help(main_area, buf, self.tab);
        }
    }
}
