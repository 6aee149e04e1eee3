use ratatui::{prelude::*, widgets::*};

use crate::{
    report::Report,
    series,
    viz::util::{format_step, ticks},
};

use super::chart::{Axis, Dataset, RewardChart};

const X_TITLE: &str = "Training Step";
const Y_TITLE: &str = "Cumulative Reward";

/// Number of labels, and so grid lines plus one, on each axis
const TICKS: usize = 5;

/// Line colors, reused in order when there are more runs than colors
const PALETTE: [Color; 7] = [
    Color::Cyan,
    Color::LightGreen,
    Color::LightMagenta,
    Color::Yellow,
    Color::LightBlue,
    Color::LightRed,
    Color::White,
];

/// One curve of the plot
struct Curve {
    label: String,
    data: Vec<(f64, f64)>,
    color: Color,
}

/// Reward curves of every plotted run on shared axes
pub struct RewardPlot {
    title: String,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x_labels: Vec<String>,
    y_labels: Vec<String>,
    curves: Vec<Curve>,
}

impl RewardPlot {
    pub fn new(report: &Report) -> Self {
        let curves = report
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| Curve {
                label: s.label().to_owned(),
                data: s.points(),
                color: PALETTE[i % PALETTE.len()],
            })
            .collect();

        // Fit the axes to the data
        let (x_bounds, y_bounds) =
            series::bounds(&report.series).unwrap_or(([0.0, 1.0], [0.0, 1.0]));

        Self {
            title: report.title(),
            x_bounds,
            y_bounds,
            x_labels: ticks(x_bounds, TICKS).into_iter().map(format_step).collect(),
            y_labels: ticks(y_bounds, TICKS)
                .into_iter()
                .map(|y| format!("{y:.2}"))
                .collect(),
            curves,
        }
    }
}

impl WidgetRef for RewardPlot {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(self.title.as_str().bold())
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));

        if self.curves.is_empty() {
            Paragraph::new("No reward data to plot. See the Logs tab for skipped runs.")
                .dark_gray()
                .alignment(Alignment::Center)
                .block(block)
                .render(area, buf);
            return;
        }

        let datasets = self
            .curves
            .iter()
            .map(|c| {
                Dataset::default()
                    .name(c.label.as_str())
                    .data(&c.data)
                    .style(c.color)
            })
            .collect();

        let x_axis = Axis::default()
            .title(X_TITLE.bold())
            .style(Style::default().dark_gray())
            .labels(self.x_labels.iter().map(|l| l.as_str().bold()).collect())
            .bounds(self.x_bounds);

        let y_axis = Axis::default()
            .title(Y_TITLE.bold())
            .style(Style::default().dark_gray())
            .labels(self.y_labels.iter().map(|l| l.as_str().bold()).collect())
            .bounds(self.y_bounds);

        RewardChart::new(datasets)
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis)
            .grid(Some(Color::DarkGray))
            .render(area, buf);
    }
}
