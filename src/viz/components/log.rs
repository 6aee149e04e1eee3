use crossterm::event::{Event, KeyCode};
use ratatui::{prelude::*, widgets::WidgetRef};
use tui_logger::{TuiLoggerSmartWidget, TuiWidgetEvent, TuiWidgetState};

use crate::viz::util::event_keycode;

use super::Component;

/// Log records captured while loading runs, skip diagnostics included
pub struct Logs {
    state: TuiWidgetState,
    /// Scrolled back into the history, Esc returns to the live view
    paging: bool,
}

impl Logs {
    pub fn new(level: log::LevelFilter) -> Self {
        Self {
            state: TuiWidgetState::new().set_default_display_level(level),
            paging: false,
        }
    }
}

impl WidgetRef for Logs {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        TuiLoggerSmartWidget::default()
            .style(Style::default().white())
            .style_error(Style::default().light_red())
            .style_warn(Style::default().light_yellow())
            .style_info(Style::default().cyan())
            .style_debug(Style::default().dark_gray())
            .output_separator(' ')
            .state(&self.state)
            .render(area, buf);
    }
}

/// Maps keys to the log widget's own navigation events
fn widget_event(key: KeyCode) -> Option<TuiWidgetEvent> {
    Some(match key {
        KeyCode::Char(' ') => TuiWidgetEvent::SpaceKey,
        KeyCode::Esc => TuiWidgetEvent::EscapeKey,
        KeyCode::PageUp => TuiWidgetEvent::PrevPageKey,
        KeyCode::PageDown => TuiWidgetEvent::NextPageKey,
        KeyCode::Up => TuiWidgetEvent::UpKey,
        KeyCode::Down => TuiWidgetEvent::DownKey,
        KeyCode::Left => TuiWidgetEvent::LeftKey,
        KeyCode::Right => TuiWidgetEvent::RightKey,
        KeyCode::Char('+' | '=') => TuiWidgetEvent::PlusKey,
        KeyCode::Char('-') => TuiWidgetEvent::MinusKey,
        KeyCode::Char('s') => TuiWidgetEvent::HideKey,
        KeyCode::Char('f') => TuiWidgetEvent::FocusKey,
        _ => return None,
    })
}

impl Component for Logs {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        let Some(key) = event_keycode(event) else {
            return false;
        };
        match key {
            // outside page mode Esc belongs to the app
            KeyCode::Esc if !self.paging => return false,
            KeyCode::Esc => self.paging = false,
            KeyCode::PageUp => self.paging = true,
            _ => {}
        }

        match widget_event(key) {
            Some(widget_event) => {
                self.state.transition(widget_event);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_keys_not_captured() {
        for key in [KeyCode::Char('q'), KeyCode::Char('h'), KeyCode::Tab] {
            assert!(widget_event(key).is_none(), "{key:?} left to the app");
        }
        assert!(widget_event(KeyCode::PageUp).is_some());
        assert!(widget_event(KeyCode::Char('=')).is_some());
    }

    #[test]
    fn esc_leaves_page_mode_first() {
        use crossterm::event::{KeyEvent, KeyModifiers};

        let press = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        let mut logs = Logs::new(log::LevelFilter::Info);

        assert!(!logs.handle_ui_event(&press(KeyCode::Esc)), "live view passes Esc on");
        assert!(logs.handle_ui_event(&press(KeyCode::PageUp)));
        assert!(logs.handle_ui_event(&press(KeyCode::Esc)), "Esc ends paging");
        assert!(!logs.handle_ui_event(&press(KeyCode::Esc)));
    }
}
