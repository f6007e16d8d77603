//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - fitted curve: `-` line
//! - asymptote `y = 1/3`: `.` line
//! - observed samples: `o`
//! - anchors: `A`

use crate::domain::{ASYMPTOTE, Sample};
use crate::fit::TwoPointFit;

/// Render the fitted curve with every sample overlaid.
pub fn render_ascii_plot(fit: &TwoPointFit, samples: &[Sample], width: usize, height: usize) -> String {
    let (n_lo, n_hi) = n_extent(fit, samples);
    let (y_lo, y_hi) = y_extent(fit, samples).unwrap_or((0.0, 1.0));
    let pad = ((y_hi - y_lo).abs() * 0.05).max(1e-12);

    let mut canvas = Canvas::new(width.max(10), height.max(5), (n_lo, n_hi), (y_lo - pad, y_hi + pad));

    // Curve first, then the asymptote fills whatever is still blank.
    canvas.polyline(&fit.grid, '-');
    canvas.polyline(&[(n_lo, ASYMPTOTE), (n_hi, ASYMPTOTE)], '.');

    for s in samples.iter().filter(|s| (n_lo..=n_hi).contains(&s.n)) {
        canvas.mark(s.n, s.probability, 'o');
    }
    for s in [fit.anchors.first, fit.anchors.second] {
        canvas.mark(s.n, s.probability, 'A');
    }

    canvas.render()
}

/// Character grid with a fixed data window; row 0 is the top.
struct Canvas {
    cells: Vec<Vec<char>>,
    n_window: (f64, f64),
    y_window: (f64, f64),
}

impl Canvas {
    fn new(width: usize, height: usize, n_window: (f64, f64), y_window: (f64, f64)) -> Self {
        Self {
            cells: vec![vec![' '; width]; height],
            n_window,
            y_window,
        }
    }

    fn cols(&self) -> usize {
        self.cells[0].len()
    }

    fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Data point to `(col, row)`, clamped to the grid.
    fn cell(&self, n: f64, y: f64) -> (isize, isize) {
        let fx = ((n - self.n_window.0) / (self.n_window.1 - self.n_window.0)).clamp(0.0, 1.0);
        let fy = ((y - self.y_window.0) / (self.y_window.1 - self.y_window.0)).clamp(0.0, 1.0);
        let col = (fx * (self.cols() - 1) as f64).round();
        let row = ((1.0 - fy) * (self.rows() - 1) as f64).round();
        (col as isize, row as isize)
    }

    /// Overwrite the cell under a data point.
    fn mark(&mut self, n: f64, y: f64, ch: char) {
        let (col, row) = self.cell(n, y);
        self.cells[row as usize][col as usize] = ch;
    }

    /// Connect consecutive finite points; only blank cells are written.
    fn polyline(&mut self, points: &[(f64, f64)], ch: char) {
        let mut prev: Option<(isize, isize)> = None;
        for &(n, y) in points {
            if !y.is_finite() {
                prev = None;
                continue;
            }
            let here = self.cell(n, y);
            self.segment(prev.unwrap_or(here), here, ch);
            prev = Some(here);
        }
    }

    /// Bresenham segment between two cells.
    fn segment(&mut self, from: (isize, isize), to: (isize, isize), ch: char) {
        let (mut x, mut y) = from;
        let (dx, dy) = ((to.0 - x).abs(), -(to.1 - y).abs());
        let (step_x, step_y) = ((to.0 - x).signum(), (to.1 - y).signum());
        let mut err = dx + dy;

        loop {
            if let Some(cell) = self
                .cells
                .get_mut(y as usize)
                .and_then(|row| row.get_mut(x as usize))
                .filter(|c| **c == ' ')
            {
                *cell = ch;
            }
            if (x, y) == to {
                break;
            }
            let twice = 2 * err;
            if twice >= dy {
                err += dy;
                x += step_x;
            }
            if twice <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    fn render(self) -> String {
        let mut out = format!(
            "Plot: n=[{:.3}, {:.3}] | y=[{:.4}, {:.4}]\n",
            self.n_window.0, self.n_window.1, self.y_window.0, self.y_window.1
        );
        for row in self.cells {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

/// `n` window: the fit range widened to every sample.
fn n_extent(fit: &TwoPointFit, samples: &[Sample]) -> (f64, f64) {
    let (lo, hi) = samples
        .iter()
        .map(|s| s.n)
        .fold(fit.n_range, |(lo, hi), n| (lo.min(n), hi.max(n)));
    if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) }
}

/// `y` extent over samples, finite grid values, and the asymptote.
fn y_extent(fit: &TwoPointFit, samples: &[Sample]) -> Option<(f64, f64)> {
    let (lo, hi) = samples
        .iter()
        .map(|s| s.probability)
        .chain(fit.grid.iter().map(|&(_, y)| y).filter(|y| y.is_finite()))
        .fold((ASYMPTOTE, ASYMPTOTE), |(lo, hi), y| (lo.min(y), hi.max(y)));
    (lo.is_finite() && hi.is_finite() && hi > lo).then_some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::fit_samples;

    #[test]
    fn plot_marks_anchors_and_asymptote() {
        let samples = [Sample::new(4.0, 0.5), Sample::new(10.0, 0.4)];
        let fit = fit_samples(&samples, 20).unwrap();

        let txt = render_ascii_plot(&fit, &samples, 10, 5);
        let lines: Vec<&str> = txt.lines().collect();

        assert_eq!(lines[0], "Plot: n=[4.000, 10.000] | y=[0.3250, 0.5083]");
        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with('A'), "{txt}");
        assert!(lines[3].ends_with('A'), "{txt}");
        assert_eq!(lines[5], "..........");
    }

    #[test]
    fn extra_samples_are_plotted_as_points() {
        let samples = [
            Sample::new(4.0, 0.5),
            Sample::new(10.0, 0.4),
            Sample::new(7.0, 0.34),
        ];
        let fit = fit_samples(&samples, 20).unwrap();
        let txt = render_ascii_plot(&fit, &samples, 40, 12);
        let body: String = txt.lines().skip(1).collect();
        assert_eq!(body.matches('A').count(), 2);
        assert_eq!(body.matches('o').count(), 1);
    }
}
