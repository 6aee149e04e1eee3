use log::LevelFilter;

use crate::{error::Result, report::Report};

pub use app::{App, Tab};

mod app;
mod components;
mod tui;
mod util;

/// Route log records to the in-app log view
///
/// Must be called before loading runs so their diagnostics show up in the Logs tab.
pub fn init_logger(level: LevelFilter) -> Result<()> {
    tui_logger::init_logger(level)?;
    tui_logger::set_default_level(level);
    Ok(())
}

/// Show the reward chart in the terminal, blocking until it is closed
pub fn show(report: &Report, log_level: LevelFilter) -> Result<()> {
    App::new(report, log_level).run()
}
