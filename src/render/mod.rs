//! Chart rendering with `plotters`.
//!
//! One writer per figure; each takes precomputed data and writes a PNG.
//! Helpers here keep data inside the visible range, since log axes cannot
//! show non-positive values and fixed-range axes should not spill lines
//! into the margins.

pub mod ergodicity;
pub mod kelly;
pub mod physics;

use std::path::{Path, PathBuf};

use plotters::prelude::{DashedLineSeries, RGBColor, ShapeStyle};

pub use ergodicity::{render_coin_flips, render_multiplicative};
pub use kelly::{render_growth_curve, render_kelly_simulation};
pub use physics::{render_cross_sections, render_spectra};

pub const ORANGE: RGBColor = RGBColor(255, 165, 0);

pub const CAPTION_FONT: (&str, u32) = ("sans-serif", 28);

/// Dash length and gap, in pixels, of reference lines.
const DASH_SIZE: i32 = 8;
const DASH_SPACING: i32 = 6;

/// Output file and bitmap size of one figure.
#[derive(Debug, Clone)]
pub struct Figure {
    pub path: PathBuf,
    pub size: (u32, u32),
}

impl Figure {
    pub fn new(dir: &Path, file_name: &str, size: (u32, u32)) -> Self {
        Self {
            path: dir.join(file_name),
            size,
        }
    }
}

/// Drop points whose y value cannot be drawn on a log axis.
pub fn positive_points(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    points
        .iter()
        .copied()
        .filter(|&(_, y)| y.is_finite() && y > 0.0)
        .collect()
}

/// Keep only points whose y value lies in `[lo, hi]`.
pub fn points_in_range(points: &[(f64, f64)], lo: f64, hi: f64) -> Vec<(f64, f64)> {
    points
        .iter()
        .copied()
        .filter(|&(_, y)| y >= lo && y <= hi)
        .collect()
}

/// Dashed reference line through `points` (means, optima, break-even).
pub fn dashed_line(
    points: Vec<(f64, f64)>,
    style: impl Into<ShapeStyle>,
) -> DashedLineSeries<std::vec::IntoIter<(f64, f64)>, i32> {
    DashedLineSeries::new(points, DASH_SIZE, DASH_SPACING, style.into())
}

/// Clamp y values into `[lo, hi]`.
pub fn clamp_points(points: &[(f64, f64)], lo: f64, hi: f64) -> Vec<(f64, f64)> {
    points.iter().map(|&(x, y)| (x, y.clamp(lo, hi))).collect()
}

/// Log-axis bounds covering every positive value, padded by half a decade
/// on each side. Falls back to `0.1..10` when nothing is positive.
pub fn log_bounds<'a>(values: impl IntoIterator<Item = &'a f64>) -> (f64, f64) {
    let (lo, hi) = values
        .into_iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() || !hi.is_finite() {
        return (0.1, 10.0);
    }
    let pad = 10f64.powf(0.5);
    (lo / pad, hi * pad)
}

/// `(x, y)` points for a vertical marker spanning `[lo, hi]`.
pub fn vertical_line(x: f64, lo: f64, hi: f64) -> Vec<(f64, f64)> {
    vec![(x, lo), (x, hi)]
}

/// `(x, y)` points for a horizontal marker spanning `[lo, hi]`.
pub fn horizontal_line(y: f64, lo: f64, hi: f64) -> Vec<(f64, f64)> {
    vec![(lo, y), (hi, y)]
}

/// Tick label for log axes, e.g. `1e-3`.
pub fn log_tick(value: &f64) -> String {
    format!("{value:.0e}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_points_masks_underflow() {
        let pts = [(0.0, 1.0), (0.1, 0.0), (0.2, -1.0), (0.3, f64::NAN), (0.4, 2.0)];
        assert_eq!(positive_points(&pts), vec![(0.0, 1.0), (0.4, 2.0)]);
    }

    #[test]
    fn test_clamp_points() {
        let pts = [(0.0, -5.0), (1.0, 0.1), (2.0, 9.0)];
        assert_eq!(clamp_points(&pts, -0.2, 0.3), vec![(0.0, -0.2), (1.0, 0.1), (2.0, 0.3)]);
    }

    #[test]
    fn test_log_bounds_pad_half_decade() {
        let (lo, hi) = log_bounds(&[1e-2, 0.0, 1e3]);
        assert!((lo.log10() + 2.5).abs() < 1e-9);
        assert!((hi.log10() - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_log_bounds_fallback() {
        assert_eq!(log_bounds(&[0.0, -1.0]), (0.1, 10.0));
        assert_eq!(log_bounds(&Vec::<f64>::new()), (0.1, 10.0));
    }

    #[test]
    fn test_marker_lines() {
        assert_eq!(vertical_line(0.3, 1.0, 2.0), vec![(0.3, 1.0), (0.3, 2.0)]);
        assert_eq!(horizontal_line(1.0, 0.0, 0.8), vec![(0.0, 1.0), (0.8, 1.0)]);
    }

    #[test]
    fn test_figure_path() {
        let fig = Figure::new(Path::new("plots"), "ergodic.png", (800, 600));
        assert_eq!(fig.path, PathBuf::from("plots/ergodic.png"));
        assert_eq!(fig.size, (800, 600));
    }

    #[test]
    fn test_points_in_range_drops_off_axis_values() {
        let pts = [(0.0, 1e-30), (1.0, 1e-25), (2.0, 1e-22), (3.0, 1e-20)];
        assert_eq!(points_in_range(&pts, 1e-25, 2e-21), vec![(1.0, 1e-25), (2.0, 1e-22)]);
    }

    #[test]
    fn test_dashed_line_leaves_gaps() {
        use plotters::prelude::*;

        let (w, h) = (100u32, 100u32);
        let mut buf = vec![0u8; (w * h * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
            root.fill(&WHITE).unwrap();
            let mut chart = ChartBuilder::on(&root)
                .build_cartesian_2d(0.0..1.0, 0.0..1.0)
                .unwrap();
            chart
                .draw_series(dashed_line(vertical_line(0.5, 0.0, 1.0), BLACK.stroke_width(1)))
                .unwrap();
            root.present().unwrap();
        }

        let dark = |x: u32, y: u32| buf[((y * w + x) * 3) as usize] < 128;
        let inked_rows = (0..h).filter(|&y| (47..=53).any(|x| dark(x, y))).count();
        assert!(inked_rows > 20, "line barely drawn: {inked_rows} rows");
        assert!(inked_rows < 90, "line looks solid: {inked_rows} rows");
    }

    #[test]
    fn test_log_tick() {
        assert_eq!(log_tick(&1000.0), "1e3");
    }
}
