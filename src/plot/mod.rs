//! Charts.
//!
//! - `ascii`: fixed-size terminal preview of a fit
//! - `fit_chart`: Plotters PNG of the fitted curve, anchors, and asymptote
//! - `band_chart`: Plotters PNG/SVG of the full series with its confidence band

pub mod ascii;
pub mod band_chart;
pub mod fit_chart;

pub use ascii::*;
pub use band_chart::*;
pub use fit_chart::*;

/// `[min - pad, max + pad]` over the finite values, `pad = span * frac`.
///
/// Falls back to `[0, 1]` when there is nothing finite and widens a
/// zero-width span by `0.5` on each side.
pub(crate) fn padded_bounds(values: impl IntoIterator<Item = f64>, frac: f64) -> [f64; 2] {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if !(min.is_finite() && max.is_finite()) {
        return [0.0, 1.0];
    }
    if max <= min {
        return [min - 0.5, max + 0.5];
    }
    let pad = (max - min) * frac;
    [min - pad, max + pad]
}

/// Dash segments `(x_start, x_end)` covering `[x0, x1]` (dash and gap equal).
pub(crate) fn asymptote_dashes(x0: f64, x1: f64, dashes: usize) -> Vec<(f64, f64)> {
    let dashes = dashes.max(1);
    let period = (x1 - x0) / dashes as f64;
    (0..dashes)
        .map(|i| {
            let start = x0 + period * i as f64;
            (start, start + period * 0.5)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_bounds_cases() {
        assert_eq!(padded_bounds([1.0, 3.0, f64::NAN], 0.0), [1.0, 3.0]);
        assert_eq!(padded_bounds([1.0, 3.0], 0.5), [0.0, 4.0]);
        assert_eq!(padded_bounds([2.0], 0.1), [1.5, 2.5]);
        assert_eq!(padded_bounds(std::iter::empty(), 0.1), [0.0, 1.0]);
    }

    #[test]
    fn dashes_stay_inside_range() {
        let d = asymptote_dashes(0.0, 10.0, 5);
        assert_eq!(d.len(), 5);
        assert_eq!(d[0], (0.0, 1.0));
        assert!(d.iter().all(|&(a, b)| a >= 0.0 && b <= 10.0 && b > a));
    }
}
