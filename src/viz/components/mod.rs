pub mod chart;
pub mod help;
pub mod log;
pub mod plot;

use crossterm::event::Event;
pub use log::Logs;
pub use plot::RewardPlot;
use ratatui::widgets::WidgetRef;

/// A widget that can consume terminal events
pub trait Component: WidgetRef {
    /// Returns `true` if the event was handled
    fn handle_ui_event(&mut self, event: &Event) -> bool;
}
