use ratatui::{prelude::*, widgets::*};

use crate::viz::app::Tab;

const GLOBAL_KEYS: [(&str, &str); 3] = [
    ("q / Esc", "Close the chart"),
    ("h", "Toggle help popup"),
    ("Tab", "Switch tabs"),
];

const LOG_KEYS: [(&str, &str); 7] = [
    ("s", "Toggle the target selector"),
    ("f", "Focus on the selected target only"),
    ("⬆ / ⬇", "Switch log target"),
    ("⬅ / ➡", "Show one level less/more of log messages"),
    ("- / +", "Capture one level less/more of log messages"),
    ("PgUp / PgDn", "Scroll the log history, Esc returns to live view"),
    ("Space", "Hide targets whose filter is off"),
];

/// Key bindings for the selected tab, drawn as a popup over `area`
pub fn render_help(area: Rect, buf: &mut Buffer, tab: Tab) {
    let tab_keys: &[(&str, &str)] = match tab {
        Tab::Plot => &[],
        Tab::Logs => &LOG_KEYS,
    };

    let lines = GLOBAL_KEYS
        .iter()
        .chain(tab_keys)
        .map(|(key, action)| {
            Line::from(vec![
                Span::from(format!("{key:>11}")).light_cyan().bold(),
                Span::raw(format!(" : {action}")),
            ])
        })
        .collect::<Vec<_>>();

    let [_, center_vert, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(lines.len() as u16 + 4),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(72),
        Constraint::Fill(1),
    ])
    .areas(center_vert);

    Clear.render(center, buf);

    Paragraph::new(lines)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .padding(Padding::proportional(1))
                .title(format!("Help: {tab}")),
        )
        .wrap(Wrap { trim: false })
        .render(center, buf);
}
