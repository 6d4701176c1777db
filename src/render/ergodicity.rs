//! Ergodic vs non-ergodic process figures.

use anyhow::Result;
use plotters::prelude::*;
use tracing::debug;

use super::{dashed_line, horizontal_line, log_bounds, log_tick, positive_points, Figure, CAPTION_FONT};
use crate::simulation::processes::{CoinFlipRun, MultiplicativeRun};

/// Coin flips, their running time average, and the ensemble average.
pub fn render_coin_flips(fig: &Figure, run: &CoinFlipRun) -> Result<()> {
    let steps = run.flips.len() as f64;
    let root = BitMapBackend::new(&fig.path, fig.size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Ergodic Process: Coin Flips", CAPTION_FONT)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(1.0..steps.max(2.0), -1.25..1.25)?;

    chart
        .configure_mesh()
        .x_desc("Step")
        .y_desc("Value")
        .draw()?;

    let flips: Vec<(f64, f64)> = run
        .flips
        .iter()
        .enumerate()
        .map(|(i, &v)| ((i + 1) as f64, v))
        .collect();
    let time_avg: Vec<(f64, f64)> = run
        .time_average
        .iter()
        .enumerate()
        .map(|(i, &v)| ((i + 1) as f64, v))
        .collect();

    chart
        .draw_series(LineSeries::new(flips, BLUE.stroke_width(2)))?
        .label("Coin Flip at Step t")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new(time_avg, RED.stroke_width(3)))?
        .label("Time Average up to t")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .draw_series(dashed_line(
            horizontal_line(run.ensemble_average, 1.0, steps.max(2.0)),
            GREEN.stroke_width(3),
        ))?
        .label(format!("Ensemble Average = {:.1}", run.ensemble_average))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    debug!(path = %fig.path.display(), "Coin flip chart written");
    Ok(())
}

/// A multiplicative path against its time average and ensemble average,
/// log-scale value axis.
pub fn render_multiplicative(fig: &Figure, run: &MultiplicativeRun) -> Result<()> {
    let last_step = (run.path.len().saturating_sub(1) as f64).max(1.0);
    let values: Vec<f64> = run
        .path
        .iter()
        .chain(&run.time_average)
        .chain(&run.ensemble_average)
        .copied()
        .collect();
    let (y_lo, y_hi) = log_bounds(&values);

    let root = BitMapBackend::new(&fig.path, fig.size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Non-Ergodic Process: Multiplicative Growth", CAPTION_FONT)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..last_step, (y_lo..y_hi).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("Step")
        .y_desc("Value")
        .y_label_formatter(&log_tick)
        .draw()?;

    let indexed = |values: &[f64]| -> Vec<(f64, f64)> {
        let points: Vec<(f64, f64)> = values
            .iter()
            .enumerate()
            .map(|(t, &v)| (t as f64, v))
            .collect();
        positive_points(&points)
    };

    chart
        .draw_series(LineSeries::new(indexed(&run.path), BLUE.stroke_width(2)))?
        .label("Single Realization Y(t)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new(indexed(&run.time_average), RED.stroke_width(3)))?
        .label("Time Average of Single Path Y(t)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .draw_series(dashed_line(indexed(&run.ensemble_average), GREEN.stroke_width(3)))?
        .label(format!("Ensemble Avg E[Y(t)] = {:.2}^t", run.mean_factor))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    debug!(path = %fig.path.display(), "Multiplicative chart written");
    Ok(())
}
