// src/plot/chart.rs
use crate::core::{CurveError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fmt;

const DEFAULT_SIZE: (u32, u32) = (640, 480);

/// One polyline in a chart.
#[derive(Debug, Clone)]
pub struct Series {
    /// Legend text; `None` keeps the series out of the legend.
    pub label: Option<String>,
    pub color: RGBColor,
    pub line_width: u32,
    pub points: Vec<(f64, f64)>,
}

/// In-memory figure: axes, labels and an ordered list of series.
///
/// Nothing is rendered until [`Chart::to_svg`] or [`Chart::draw_on`] is
/// called, and the crate never writes a chart to disk itself.
#[derive(Debug, Clone)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub size: (u32, u32),
    pub series: Vec<Series>,
}

fn plot_error<E: fmt::Display>(err: E) -> CurveError {
    CurveError::PlotError(err.to_string())
}

impl Chart {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Chart {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            x_range: (0.0, 1.0),
            y_range: (0.0, 1.05),
            size: DEFAULT_SIZE,
            series: Vec::new(),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn push_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Legend entries in drawing order.
    pub fn legend(&self) -> Vec<&str> {
        self.series.iter().filter_map(|s| s.label.as_deref()).collect()
    }

    /// Draws the chart onto any plotters drawing area.
    pub fn draw_on<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(plot_error)?;

        let mut chart = ChartBuilder::on(root)
            .margin(20)
            .caption(&self.title, ("sans-serif", 22))
            .x_label_area_size(45)
            .y_label_area_size(45)
            .build_cartesian_2d(self.x_range.0..self.x_range.1, self.y_range.0..self.y_range.1)
            .map_err(plot_error)?;

        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()
            .map_err(plot_error)?;

        for series in &self.series {
            let style = series.color.stroke_width(series.line_width);
            // NaN rates from degenerate classes cannot be placed on the canvas
            let points: Vec<(f64, f64)> = series
                .points
                .iter()
                .copied()
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .collect();
            let drawn = chart
                .draw_series(LineSeries::new(points, style))
                .map_err(plot_error)?;
            if let Some(label) = &series.label {
                drawn
                    .label(label.clone())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .label_font(("sans-serif", 10))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(plot_error)?;

        root.present().map_err(plot_error)?;
        Ok(())
    }

    /// Renders the chart to an SVG document held in memory.
    pub fn to_svg(&self) -> Result<String> {
        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, self.size).into_drawing_area();
            self.draw_on(&root)?;
        }
        Ok(buffer)
    }
}
