use unicode_width::UnicodeWidthStr;

use ratatui::{
    prelude::*,
    widgets::{
        canvas::{Canvas, Line as Segment, Painter, Points, Shape},
        Block, WidgetRef,
    },
};

/// Symbol drawn before each name in the legend
const LEGEND_SYMBOL: &str = "── ";

/// See [`ratatui::widgets::Axis`]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Axis<'a> {
    /// Title displayed next to axis end
    title: Option<Line<'a>>,
    /// Bounds for the axis
    bounds: [f64; 2],
    /// Evenly spaced labels from the lower to the upper bound
    labels: Vec<Span<'a>>,
    /// The style used to draw the axis itself
    style: Style,
}

impl<'a> Axis<'a> {
    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn title<T>(mut self, title: T) -> Self
    where
        T: Into<Line<'a>>,
    {
        self.title = Some(title.into());
        self
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub const fn bounds(mut self, bounds: [f64; 2]) -> Self {
        self.bounds = bounds;
        self
    }

    /// Labels are spread evenly along the axis, the grid has one line per inner label
    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn labels(mut self, labels: Vec<Span<'a>>) -> Self {
        self.labels = labels;
        self
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn style<S: Into<Style>>(mut self, style: S) -> Self {
        self.style = style.into();
        self
    }

    /// Data coordinates of the inner labels
    fn grid_lines(&self) -> Vec<f64> {
        let n = self.labels.len();
        if n < 3 {
            return vec![];
        }
        let [lo, hi] = self.bounds;
        (1..n - 1)
            .map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64)
            .collect()
    }
}

/// A named line in the chart
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Dataset<'a> {
    /// Name shown in the legend
    name: Line<'a>,
    /// Points, in drawing order
    data: &'a [(f64, f64)],
    /// Style of the line and its legend entry
    style: Style,
}

impl<'a> Dataset<'a> {
    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn name<S>(mut self, name: S) -> Self
    where
        S: Into<Line<'a>>,
    {
        self.name = name.into();
        self
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub const fn data(mut self, data: &'a [(f64, f64)]) -> Self {
        self.data = data;
        self
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn style<S: Into<Style>>(mut self, style: S) -> Self {
        self.style = style.into();
        self
    }

    fn color(&self) -> Color {
        self.style.fg.unwrap_or(Color::Reset)
    }
}

/// Where each element of the chart goes
struct ChartLayout {
    /// Row of the x labels
    label_x: Option<u16>,
    /// Column where the y labels start
    label_y: Option<u16>,
    /// Row of the horizontal axis
    axis_x: Option<u16>,
    /// Column of the vertical axis
    axis_y: Option<u16>,
    /// Area of the legend
    legend_area: Option<Rect>,
    /// Area the data is drawn in
    graph_area: Rect,
}

/// Line chart with a dotted background grid and a legend
///
/// Similar to [`ratatui::widgets::Chart`] with [`GraphType::Line`](ratatui::widgets::GraphType),
/// which draws neither a grid nor lets lines and grid share a canvas.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RewardChart<'a> {
    block: Option<Block<'a>>,
    x_axis: Axis<'a>,
    y_axis: Axis<'a>,
    datasets: Vec<Dataset<'a>>,
    style: Style,
    /// Grid color, no grid if `None`
    grid: Option<Color>,
    marker: symbols::Marker,
}

impl<'a> RewardChart<'a> {
    pub fn new(datasets: Vec<Dataset<'a>>) -> Self {
        Self {
            datasets,
            marker: symbols::Marker::Braille,
            ..Default::default()
        }
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn x_axis(mut self, axis: Axis<'a>) -> Self {
        self.x_axis = axis;
        self
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub fn y_axis(mut self, axis: Axis<'a>) -> Self {
        self.y_axis = axis;
        self
    }

    #[must_use = "method moves the value of self and returns the modified value"]
    pub const fn grid(mut self, color: Option<Color>) -> Self {
        self.grid = color;
        self
    }

    fn layout(&self, area: Rect) -> Option<ChartLayout> {
        if area.is_empty() {
            return None;
        }

        let bottom = area.bottom() - 1;
        let has_x_labels = self.x_axis.labels.len() > 1 && area.height > 3;
        let (label_x, axis_x, graph_bottom) = if has_x_labels {
            (Some(bottom), Some(bottom - 1), bottom - 2)
        } else {
            (None, None, bottom)
        };

        let y_labels_width = self.y_labels_width(area);
        let has_y_labels = !self.y_axis.labels.is_empty()
            && area.left() + y_labels_width + 1 < area.right();
        let (label_y, axis_y, graph_left) = if has_y_labels {
            let axis = area.left() + y_labels_width;
            (Some(area.left()), Some(axis), axis + 1)
        } else {
            (None, None, area.left())
        };

        let graph_area = Rect::new(
            graph_left,
            area.top(),
            area.right().saturating_sub(graph_left),
            graph_bottom.saturating_sub(area.top()) + 1,
        );
        if graph_area.is_empty() {
            return None;
        }

        Some(ChartLayout {
            label_x,
            label_y,
            axis_x,
            axis_y,
            legend_area: self.legend_area(graph_area),
            graph_area,
        })
    }

    /// Widest y label, plus one column of padding, limited to a third of the width
    fn y_labels_width(&self, area: Rect) -> u16 {
        let widest = self
            .y_axis
            .labels
            .iter()
            .map(|l| l.content.width())
            .max()
            .unwrap_or_default() as u16;
        (widest + 1).min(area.width / 3)
    }

    /// Legend in the top right corner, hidden when it would cover more than half the graph
    fn legend_area(&self, graph_area: Rect) -> Option<Rect> {
        let widest = self.datasets.iter().map(|d| d.name.width()).max()?;
        let width = (widest + LEGEND_SYMBOL.width() + 2) as u16;
        let height = self.datasets.len() as u16 + 2;

        (width <= graph_area.width / 2 && height <= graph_area.height / 2).then(|| {
            Rect::new(
                graph_area.right() - width,
                graph_area.top(),
                width,
                height,
            )
        })
    }

    fn render_axes(&self, buf: &mut Buffer, layout: &ChartLayout) {
        let graph = layout.graph_area;

        if let Some(y) = layout.axis_x {
            for x in graph.left()..graph.right() {
                buf.get_mut(x, y)
                    .set_symbol(symbols::line::HORIZONTAL)
                    .set_style(self.x_axis.style);
            }
        }

        if let Some(x) = layout.axis_y {
            for y in graph.top()..graph.bottom() {
                buf.get_mut(x, y)
                    .set_symbol(symbols::line::VERTICAL)
                    .set_style(self.y_axis.style);
            }
        }

        if let (Some(x), Some(y)) = (layout.axis_y, layout.axis_x) {
            buf.get_mut(x, y)
                .set_symbol(symbols::line::BOTTOM_LEFT)
                .set_style(self.x_axis.style);
        }
    }

    fn render_x_labels(&self, buf: &mut Buffer, layout: &ChartLayout) {
        let Some(y) = layout.label_x else { return };
        let graph = layout.graph_area;
        let labels = &self.x_axis.labels;
        let (Some(first), Some(last)) = (labels.first(), labels.last()) else {
            return;
        };

        let slot = graph.width / labels.len() as u16;
        Self::render_label(buf, first, Rect::new(graph.left(), y, slot, 1), Alignment::Left);

        let step = (graph.width - 1) as f64 / (labels.len() - 1) as f64;
        for (i, label) in labels.iter().enumerate().skip(1).take(labels.len() - 2) {
            let center = graph.left() + (i as f64 * step).round() as u16;
            let x = center.saturating_sub(slot / 2).max(graph.left());
            Self::render_label(buf, label, Rect::new(x, y, slot, 1), Alignment::Center);
        }

        let area = Rect::new(graph.right() - slot, y, slot, 1);
        Self::render_label(buf, last, area, Alignment::Right);
    }

    fn render_y_labels(&self, buf: &mut Buffer, layout: &ChartLayout) {
        let (Some(x), Some(axis)) = (layout.label_y, layout.axis_y) else {
            return;
        };
        let graph = layout.graph_area;
        let labels = &self.y_axis.labels;
        if labels.len() < 2 {
            return;
        }

        let step = (graph.height - 1) as f64 / (labels.len() - 1) as f64;
        for (i, label) in labels.iter().enumerate() {
            let y = graph.bottom() - 1 - (i as f64 * step).round() as u16;
            let area = Rect::new(x, y, axis.saturating_sub(x + 1), 1);
            Self::render_label(buf, label, area, Alignment::Right);
        }
    }

    fn render_label(buf: &mut Buffer, label: &Span, area: Rect, alignment: Alignment) {
        let width = area.width.min(label.width() as u16);
        let x = match alignment {
            Alignment::Left => area.left(),
            Alignment::Center => area.left() + (area.width - width) / 2,
            Alignment::Right => area.right() - width,
        };
        buf.set_span(x, area.top(), label, width);
    }

    fn render_titles(&self, buf: &mut Buffer, graph: Rect, base_style: Style) {
        if let Some(title) = &self.x_axis.title {
            let width = title.width() as u16;
            if width < graph.width && graph.height > 2 {
                let area = Rect::new(graph.right() - width, graph.bottom() - 1, width, 1);
                buf.set_style(area, base_style);
                buf.set_line(area.x, area.y, title, width);
            }
        }

        if let Some(title) = &self.y_axis.title {
            let width = title.width() as u16;
            if width + 1 < graph.width && graph.height > 2 {
                let area = Rect::new(graph.left(), graph.top(), width, 1);
                buf.set_style(area, base_style);
                buf.set_line(area.x, area.y, title, width);
            }
        }
    }

    fn render_legend(&self, buf: &mut Buffer, area: Rect, base_style: Style) {
        buf.set_style(area, base_style);
        Block::bordered().render(area, buf);

        for (i, dataset) in self.datasets.iter().enumerate() {
            let y = area.y + 1 + i as u16;
            let symbol = Span::styled(LEGEND_SYMBOL, dataset.style);
            let (x, _) = buf.set_span(area.x + 1, y, &symbol, area.width - 2);
            let width = area.right().saturating_sub(x + 1);
            buf.set_line(x, y, &dataset.name, width);
            buf.set_style(Rect::new(x, y, width, 1), dataset.style);
        }
    }
}

/// Dotted lines across the whole canvas at the given data coordinates
struct Grid {
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    verticals: Vec<f64>,
    horizontals: Vec<f64>,
    color: Color,
}

impl Shape for Grid {
    fn draw(&self, painter: &mut Painter) {
        // bottom right corner gives the resolution of the canvas grid
        let Some((right, bottom)) = painter.get_point(self.x_bounds[1], self.y_bounds[0]) else {
            return;
        };

        for &x in &self.verticals {
            if let Some((px, _)) = painter.get_point(x, self.y_bounds[0]) {
                for py in (0..=bottom).step_by(2) {
                    painter.paint(px, py, self.color);
                }
            }
        }

        for &y in &self.horizontals {
            if let Some((_, py)) = painter.get_point(self.x_bounds[0], y) {
                for px in (0..=right).step_by(2) {
                    painter.paint(px, py, self.color);
                }
            }
        }
    }
}

impl Widget for RewardChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_ref(area, buf);
    }
}

impl WidgetRef for RewardChart<'_> {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.style);

        let chart_area = match &self.block {
            Some(block) => {
                block.render_ref(area, buf);
                block.inner(area)
            }
            None => area,
        };
        let Some(layout) = self.layout(chart_area) else {
            return;
        };
        let graph_area = layout.graph_area;

        // Cells under titles and legend are reset to this style so they stay readable
        let base_style = buf.get(area.left(), area.top()).style();

        self.render_x_labels(buf, &layout);
        self.render_y_labels(buf, &layout);
        self.render_axes(buf, &layout);

        let x_bounds = self.x_axis.bounds;
        let y_bounds = self.y_axis.bounds;
        Canvas::default()
            .background_color(self.style.bg.unwrap_or(Color::Reset))
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .marker(self.marker)
            .paint(|ctx| {
                if let Some(color) = self.grid {
                    ctx.draw(&Grid {
                        x_bounds,
                        y_bounds,
                        verticals: self.x_axis.grid_lines(),
                        horizontals: self.y_axis.grid_lines(),
                        color,
                    });
                    ctx.layer();
                }

                // later datasets are drawn on top
                for dataset in &self.datasets {
                    let color = dataset.color();
                    for pair in dataset.data.windows(2) {
                        let [(x1, y1), (x2, y2)] = [pair[0], pair[1]];
                        ctx.draw(&Segment {
                            x1,
                            y1,
                            x2,
                            y2,
                            color,
                        });
                    }
                    ctx.draw(&Points {
                        coords: dataset.data,
                        color,
                    });
                }
            })
            .render(graph_area, buf);

        self.render_titles(buf, graph_area, base_style);

        if let Some(legend_area) = layout.legend_area {
            self.render_legend(buf, legend_area, base_style);
        }
    }
}
