//! Plotters chart of a two-point fit.
//!
//! Draws the fitted curve, the two anchors, and the `y = 1/3` asymptote. The
//! drawing code is generic over the Plotters backend so the same chart can be
//! written to PNG (CLI) or to an in-memory SVG string (tests).

use std::path::Path;

use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::domain::ASYMPTOTE;
use crate::error::AppError;
use crate::fit::TwoPointFit;
use crate::plot::{asymptote_dashes, padded_bounds};
use crate::report::format_equation_legend;

pub const FIT_TITLE: &str = "Exact Equation Passing Through Two Data Points";

/// A render-only description of the fit chart.
///
/// All series and bounds are computed up front so `draw()` only draws.
#[derive(Debug, Clone)]
pub struct FitChart {
    pub curve: Vec<(f64, f64)>,
    pub anchors: [(f64, f64); 2],
    pub legend: String,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl FitChart {
    pub fn from_fit(fit: &TwoPointFit) -> Self {
        let anchors = [
            (fit.anchors.first.n, fit.anchors.first.probability),
            (fit.anchors.second.n, fit.anchors.second.probability),
        ];

        let xs = fit.grid.iter().map(|&(n, _)| n).chain(anchors.iter().map(|&(n, _)| n));
        let ys = fit
            .grid
            .iter()
            .map(|&(_, y)| y)
            .chain(anchors.iter().map(|&(_, y)| y))
            .chain(std::iter::once(ASYMPTOTE));

        Self {
            curve: fit.grid.clone(),
            anchors,
            legend: format_equation_legend(&fit.curve),
            x_bounds: padded_bounds(xs, 0.02),
            y_bounds: padded_bounds(ys, 0.05),
        }
    }

    pub fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;

        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(root)
            .caption(FIT_TITLE, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x0..x1, y0..y1)?;

        chart
            .configure_mesh()
            .x_desc("Number of Sides (n)")
            .y_desc("Probability")
            .bold_line_style(BLACK.mix(0.15))
            .light_line_style(BLACK.mix(0.05))
            .draw()?;

        chart
            .draw_series(LineSeries::new(self.curve.iter().copied(), RED.stroke_width(2)))?
            .label(self.legend.as_str())
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

        chart
            .draw_series(
                self.anchors
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 6, BLUE.filled())),
            )?
            .label("Used points")
            .legend(|(x, y)| Circle::new((x + 10, y), 5, BLUE.filled()));

        let asymptote_style = GREEN.mix(0.7).stroke_width(2);
        chart
            .draw_series(
                asymptote_dashes(x0, x1, 60)
                    .into_iter()
                    .map(|(a, b)| PathElement::new(vec![(a, ASYMPTOTE), (b, ASYMPTOTE)], asymptote_style)),
            )?
            .label("Asymptote (y=1/3)")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 8, y)], asymptote_style));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        Ok(())
    }
}

/// Render the fit chart to a PNG file.
pub fn render_fit_png(chart: &FitChart, path: &Path, size: (u32, u32)) -> Result<(), AppError> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    chart
        .draw(&root)
        .map_err(|e| AppError::new(4, format!("Failed to draw fit chart: {e}")))?;
    root.present()
        .map_err(|e| AppError::new(2, format!("Failed to write chart '{}': {e}", path.display())))?;

    debug!("rendered fit chart to '{}'", path.display());
    Ok(())
}

/// Render the fit chart into an SVG string.
pub fn render_fit_svg_string(chart: &FitChart, size: (u32, u32)) -> Result<String, AppError> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, size).into_drawing_area();
        chart
            .draw(&root)
            .map_err(|e| AppError::new(4, format!("Failed to draw fit chart: {e}")))?;
        root.present()
            .map_err(|e| AppError::new(4, format!("Failed to finish SVG: {e}")))?;
    }
    Ok(buf)
}
