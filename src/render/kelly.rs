//! Kelly figures: the growth-rate curve and the finite-horizon Monte Carlo.

use anyhow::Result;
use plotters::prelude::*;
use tracing::debug;

use super::{
    clamp_points, dashed_line, horizontal_line, log_bounds, log_tick, positive_points,
    vertical_line, Figure, CAPTION_FONT, ORANGE,
};
use crate::simulation::percentile::PercentileConfig;
use crate::strategy::KellyGame;
use crate::types::{Band, ResultTable, Scenario};

fn band_color(band: Band) -> RGBColor {
    match band {
        Band::Low => BLUE,
        Band::Mid => GREEN,
        Band::High => ORANGE,
    }
}

/// G(f) over `[0, f_max]` with the Kelly fraction marked.
pub fn render_growth_curve(
    fig: &Figure,
    game: &KellyGame,
    curve: &[(f64, f64)],
    f_max: f64,
    y_range: (f64, f64),
) -> Result<()> {
    let (y_lo, y_hi) = y_range;
    let root = BitMapBackend::new(&fig.path, fig.size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Kelly Criterion Growth Rate", CAPTION_FONT)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..f_max, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Fraction of Bankroll (f)")
        .y_desc("G(f)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(clamp_points(curve, y_lo, y_hi), BLUE.stroke_width(3)))?
        .label("G(f)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    let f_star = game.kelly_fraction();
    if (0.0..=f_max).contains(&f_star) {
        chart
            .draw_series(dashed_line(vertical_line(f_star, y_lo, y_hi), RED.stroke_width(2)))?
            .label(format!("Kelly Fraction = {f_star:.2}"))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    debug!(path = %fig.path.display(), "Growth curve written");
    Ok(())
}

/// Percentile bands of final wealth vs bet fraction, log-scale wealth axis.
///
/// Marks each band's best fraction, the closed-form Kelly fraction, and
/// the break-even wealth of 1.
pub fn render_kelly_simulation(
    fig: &Figure,
    scenario: &Scenario,
    table: &ResultTable,
    percentiles: &PercentileConfig,
) -> Result<()> {
    let fractions = table.fractions();
    let mut x_lo = fractions.iter().copied().fold(f64::INFINITY, f64::min);
    let mut x_hi = fractions.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !x_lo.is_finite() || !x_hi.is_finite() {
        x_lo = 0.0;
        x_hi = 1.0;
    } else if x_hi - x_lo < 1e-9 {
        x_lo -= 0.05;
        x_hi += 0.05;
    }

    let values: Vec<f64> = table
        .rows
        .iter()
        .flat_map(|r| [r.low, r.mid, r.high])
        .chain(std::iter::once(1.0))
        .collect();
    let (y_lo, y_hi) = log_bounds(&values);

    let root = BitMapBackend::new(&fig.path, fig.size).into_drawing_area();
    root.fill(&WHITE)?;

    let title = format!(
        "Kelly Simulation (t={}, p={:.2}, a={}, b={})",
        scenario.rounds, scenario.win_prob, scenario.win_coef, scenario.loss_coef
    );
    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_lo..x_hi, (y_lo..y_hi).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("Fraction of Wealth Bet (f)")
        .y_desc("Final Wealth (log scale)")
        .y_label_formatter(&log_tick)
        .draw()?;

    for band in Band::ALL {
        let color = band_color(band);
        let points = positive_points(&table.series(band));
        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(3)))?
            .label(percentiles.label(band))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        chart.draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), 4, color.filled())))?;
    }

    for band in Band::ALL {
        let Some(best) = table.best_for(band) else {
            continue;
        };
        let color = band_color(band);
        chart
            .draw_series(dashed_line(
                vertical_line(best.fraction, y_lo, y_hi),
                color.stroke_width(1),
            ))?
            .label(format!(
                "Max {}% @ f={:.3}",
                percentiles.band(band).center,
                best.fraction
            ))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    let f_kelly = KellyGame::new(scenario.win_prob, scenario.win_coef, scenario.loss_coef)
        .kelly_fraction();
    if (x_lo..=x_hi).contains(&f_kelly) {
        chart
            .draw_series(dashed_line(vertical_line(f_kelly, y_lo, y_hi), RED.stroke_width(2)))?
            .label(format!("Kelly @ f={f_kelly:.3}"))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    } else {
        debug!(f_kelly, x_lo, x_hi, "Kelly fraction outside plotted range");
    }

    chart.draw_series(LineSeries::new(horizontal_line(1.0, x_lo, x_hi), BLACK.stroke_width(2)))?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    debug!(path = %fig.path.display(), rounds = scenario.rounds, "Kelly simulation chart written");
    Ok(())
}
