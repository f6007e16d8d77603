//! Plotters chart of the full probability series with a confidence band.
//!
//! The band is drawn as one filled polygon (upper bound left-to-right, lower
//! bound right-to-left) under the probability line, with the `y = 1/3`
//! asymptote and a small info box in the upper-left corner.

use std::path::Path;

use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::domain::{ASYMPTOTE, BandRow};
use crate::error::AppError;
use crate::plot::{asymptote_dashes, padded_bounds};

pub const BAND_TITLE: &str = "Probability of Line Segment Intersection in Regular Polygons";

const SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);
const INFO_BOX_COLOR: RGBColor = RGBColor(245, 222, 179);

/// Band bounds for every row: `(n, lower, upper)`.
///
/// The distance from `probability` to each CI bound is scaled by
/// `multiplier`, then the bounds are clipped to `[0, 1]`.
pub fn band_bounds(rows: &[BandRow], multiplier: f64) -> Vec<(f64, f64, f64)> {
    rows.iter()
        .map(|r| {
            let lower = r.probability - (r.probability - r.ci_lower) * multiplier;
            let upper = r.probability + (r.ci_upper - r.probability) * multiplier;
            (r.n, lower.max(0.0), upper.min(1.0))
        })
        .collect()
}

/// A render-only description of the band chart.
#[derive(Debug, Clone)]
pub struct BandChart {
    pub line: Vec<(f64, f64)>,
    pub band: Vec<(f64, f64, f64)>,
    pub band_label: String,
    pub info_lines: Vec<String>,
    pub x_bounds: [f64; 2],
}

impl BandChart {
    pub fn new(rows: &[BandRow], multiplier: f64, iterations: u64) -> Self {
        let mut sorted = rows.to_vec();
        sorted.sort_by(|a, b| a.n.total_cmp(&b.n));

        Self {
            line: sorted.iter().map(|r| (r.n, r.probability)).collect(),
            band: band_bounds(&sorted, multiplier),
            band_label: format!("95% Confidence Interval (×{multiplier} for visibility)"),
            info_lines: vec![
                "Monte Carlo Simulation".to_string(),
                format!("{} iterations per n", group_thousands(iterations)),
            ],
            x_bounds: padded_bounds(sorted.iter().map(|r| r.n), 0.0),
        }
    }

    pub fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let [x0, x1] = self.x_bounds;

        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(root)
            .caption(BAND_TITLE, ("serif", 30))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(70)
            .build_cartesian_2d(x0..x1, 0.0..1.0)?;

        chart
            .configure_mesh()
            .x_desc("Number of Sides (n)")
            .y_desc("Probability")
            .label_style(("serif", 16))
            .axis_desc_style(("serif", 22))
            .bold_line_style(BLACK.mix(0.12))
            .light_line_style(BLACK.mix(0.04))
            .draw()?;

        let band_style = SERIES_COLOR.mix(0.2).filled();
        let polygon: Vec<(f64, f64)> = self
            .band
            .iter()
            .map(|&(n, _, upper)| (n, upper))
            .chain(self.band.iter().rev().map(|&(n, lower, _)| (n, lower)))
            .collect();
        chart
            .draw_series(std::iter::once(Polygon::new(polygon, band_style)))?
            .label(self.band_label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], band_style));

        chart
            .draw_series(LineSeries::new(self.line.iter().copied(), SERIES_COLOR.stroke_width(3)))?
            .label("Probability")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], SERIES_COLOR.stroke_width(3)));

        let asymptote_style = GREEN.mix(0.7).stroke_width(2);
        chart
            .draw_series(
                asymptote_dashes(x0, x1, 60)
                    .into_iter()
                    .map(|(a, b)| PathElement::new(vec![(a, ASYMPTOTE), (b, ASYMPTOTE)], asymptote_style)),
            )?
            .label("Asymptote (y=1/3)")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 8, y)], asymptote_style));

        // Info box in axes-relative coordinates (upper-left corner).
        let span = x1 - x0;
        let box_left = x0 + 0.03 * span;
        let box_right = x0 + 0.33 * span;
        let box_bottom = 0.975 - 0.045 * (self.info_lines.len() as f64 + 0.5);
        chart.draw_series(std::iter::once(Rectangle::new(
            [(box_left, 0.975), (box_right, box_bottom)],
            INFO_BOX_COLOR.mix(0.3).filled(),
        )))?;
        chart.draw_series(self.info_lines.iter().enumerate().map(|(i, line)| {
            Text::new(
                line.clone(),
                (x0 + 0.05 * span, 0.95 - 0.045 * i as f64),
                ("serif", 18).into_font().color(&BLACK),
            )
        }))?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font(("serif", 18))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        Ok(())
    }
}

/// Render the band chart to a PNG file.
pub fn render_band_png(chart: &BandChart, path: &Path, size: (u32, u32)) -> Result<(), AppError> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    chart
        .draw(&root)
        .map_err(|e| AppError::new(4, format!("Failed to draw band chart: {e}")))?;
    root.present()
        .map_err(|e| AppError::new(2, format!("Failed to write chart '{}': {e}", path.display())))?;

    debug!("rendered band chart to '{}'", path.display());
    Ok(())
}

/// Render the band chart to an SVG file.
pub fn render_band_svg(chart: &BandChart, path: &Path, size: (u32, u32)) -> Result<(), AppError> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    chart
        .draw(&root)
        .map_err(|e| AppError::new(4, format!("Failed to draw band chart: {e}")))?;
    root.present()
        .map_err(|e| AppError::new(2, format!("Failed to write chart '{}': {e}", path.display())))?;

    debug!("rendered band chart to '{}'", path.display());
    Ok(())
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<BandRow> {
        vec![
            BandRow { n: 4.0, probability: 0.28, ci_lower: 0.27, ci_upper: 0.29 },
            BandRow { n: 3.0, probability: 0.02, ci_lower: 0.01, ci_upper: 0.03 },
            BandRow { n: 5.0, probability: 0.97, ci_lower: 0.96, ci_upper: 0.98 },
        ]
    }

    #[test]
    fn band_bounds_scale_and_clip() {
        let bounds = band_bounds(&rows(), 1.0);
        assert!((bounds[0].1 - 0.27).abs() < 1e-12);
        assert!((bounds[0].2 - 0.29).abs() < 1e-12);

        let wide = band_bounds(&rows(), 5.0);
        assert!((wide[0].1 - 0.23).abs() < 1e-12);
        assert!((wide[0].2 - 0.33).abs() < 1e-12);
        assert_eq!(wide[1].1, 0.0);
        assert_eq!(wide[2].2, 1.0);
    }

    #[test]
    fn chart_sorts_rows_by_n() {
        let chart = BandChart::new(&rows(), 1.0, 1_000_000_000);
        let ns: Vec<f64> = chart.line.iter().map(|&(n, _)| n).collect();
        assert_eq!(ns, vec![3.0, 4.0, 5.0]);
        assert_eq!(chart.x_bounds, [3.0, 5.0]);
        assert_eq!(chart.info_lines[1], "1,000,000,000 iterations per n");
        assert_eq!(chart.band_label, "95% Confidence Interval (×1 for visibility)");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn renders_svg_with_band_polygon() {
        let chart = BandChart::new(&rows(), 1.0, 1000);
        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, (900, 520)).into_drawing_area();
            chart.draw(&root).unwrap();
            root.present().unwrap();
        }
        assert!(buf.contains("<polygon"));
        assert!(buf.contains("<polyline"));
    }

    #[test]
    fn renders_png_and_svg_files() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("band.png");
        let svg = dir.path().join("band.svg");
        let chart = BandChart::new(&rows(), 2.0, 1000);

        render_band_png(&chart, &png, (640, 400)).unwrap();
        render_band_svg(&chart, &svg, (640, 400)).unwrap();

        assert!(std::fs::read(&png).unwrap().starts_with(b"\x89PNG\r\n\x1a\n"));
        assert!(std::fs::read_to_string(&svg).unwrap().contains("<svg"));
    }
}
