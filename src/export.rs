use std::{fmt::Display, path::Path};

use log::info;
use plotters::{
    backend::BitMapBackend,
    chart::{ChartBuilder, SeriesLabelPosition},
    drawing::IntoDrawingArea,
    element::PathElement,
    series::LineSeries,
    style::{Color, IntoFont, Palette, Palette99, BLACK, WHITE},
};

use crate::{
    error::{Error, Result},
    report::Report,
    series,
};

/// Image size in pixels
pub const SIZE: (u32, u32) = (1200, 600);

fn export_err(e: impl Display) -> Error {
    Error::Export(e.to_string())
}

/// Draw the report's reward curves into a PNG at `path`
///
/// An empty report still produces a chart, with unit axes and no lines.
pub fn save_png(report: &Report, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(export_err)?;

    let ([x0, x1], [y0, y1]) =
        series::bounds(&report.series).unwrap_or(([0.0, 1.0], [0.0, 1.0]));

    let mut chart = ChartBuilder::on(&root)
        .caption(report.title(), ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(export_err)?;

    chart
        .configure_mesh()
        .x_desc("Training Step")
        .y_desc("Cumulative Reward")
        .draw()
        .map_err(export_err)?;

    for (i, s) in report.series.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(s.points(), &color))
            .map_err(export_err)?
            .label(s.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    if !report.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(export_err)?;
    }

    root.present().map_err(export_err)?;
    info!("saved chart to {}", path.display());
    Ok(())
}
