//! Fission cross-section and prompt-neutron spectrum figures.

use anyhow::Result;
use plotters::prelude::*;
use tracing::debug;

use super::{dashed_line, log_tick, points_in_range, vertical_line, Figure, CAPTION_FONT, ORANGE};
use crate::physics::{cross_sections, spectra, Isotope};

const SIGMA_RANGE: (f64, f64) = (1e-25, 2e-21);
const SPECTRUM_Y_MAX: f64 = 0.5;
/// Samples of the interpolated line, 0.01 decade apart.
const LINE_SAMPLES: usize = 901;

fn cross_section_color(isotope: Isotope) -> RGBColor {
    match isotope {
        Isotope::U238 => GREEN,
        Isotope::U235 => BLUE,
        Isotope::Pu239 => ORANGE,
    }
}

fn spectrum_color(isotope: Isotope) -> RGBColor {
    match isotope {
        Isotope::U235 => BLUE,
        Isotope::U238 => ORANGE,
        Isotope::Pu239 => GREEN,
    }
}

/// Line and marker points of one isotope that fall inside `[lo, hi]`.
///
/// The line follows the log-log interpolation, so a curve rising from
/// below the floor enters at its crossing rather than at the next table
/// point. Markers only show table values that are on the axis.
pub fn cross_section_series(
    isotope: Isotope,
    lo: f64,
    hi: f64,
) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let line = points_in_range(&cross_sections::interpolated_curve(isotope, LINE_SAMPLES), lo, hi);
    let markers = points_in_range(&cross_sections::curve(isotope), lo, hi);
    (line, markers)
}

/// Fission cross sections vs log10 energy, log-scale σ axis.
/// Sub-threshold U-238 values lie below the axis and are not drawn.
pub fn render_cross_sections(fig: &Figure) -> Result<()> {
    let (lo, hi) = SIGMA_RANGE;
    let root = BitMapBackend::new(&fig.path, fig.size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Fission Cross Sections for U-235, Pu-239, and U-238", CAPTION_FONT)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(-2.0..8.0, (lo..hi).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("Energy in log10(eV)")
        .y_desc("Fission cross section σf [cm²]")
        .y_label_formatter(&log_tick)
        .draw()?;

    for isotope in [Isotope::U238, Isotope::U235, Isotope::Pu239] {
        let color = cross_section_color(isotope);
        let (line, points) = cross_section_series(isotope, lo, hi);
        chart
            .draw_series(LineSeries::new(line, color.stroke_width(2)))?
            .label(isotope.to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

        // Marker shape per isotope: triangle, circle, square.
        match isotope {
            Isotope::U238 => {
                chart.draw_series(
                    points
                        .iter()
                        .map(|&p| TriangleMarker::new(p, 6, color.filled())),
                )?;
            }
            Isotope::U235 => {
                chart.draw_series(points.iter().map(|&p| Circle::new(p, 5, color.filled())))?;
            }
            Isotope::Pu239 => {
                chart.draw_series(points.iter().map(|&(x, y)| {
                    EmptyElement::at((x, y)) + Rectangle::new([(-5, -5), (5, 5)], color.filled())
                }))?;
            }
        }
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    debug!(path = %fig.path.display(), "Cross-section chart written");
    Ok(())
}

/// Maxwellian prompt-neutron spectra with their mean energies marked.
pub fn render_spectra(fig: &Figure) -> Result<()> {
    let root = BitMapBackend::new(&fig.path, fig.size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Synthetic Prompt Fission Neutron Spectra", CAPTION_FONT)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..4.5, 0.0..SPECTRUM_Y_MAX)?;

    chart
        .configure_mesh()
        .x_desc("Neutron energy (MeV)")
        .y_desc("Normalized Probability Density")
        .draw()?;

    for isotope in [Isotope::U235, Isotope::U238, Isotope::Pu239] {
        let color = spectrum_color(isotope);
        chart
            .draw_series(LineSeries::new(spectra::spectrum(isotope), color.stroke_width(2)))?
            .label(format!("{isotope} (n,f)"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    for isotope in [Isotope::U235, Isotope::U238, Isotope::Pu239] {
        let color = spectrum_color(isotope);
        let mean = spectra::mean_energy_mev(isotope);
        chart
            .draw_series(dashed_line(
                vertical_line(mean, 0.0, SPECTRUM_Y_MAX),
                color.mix(0.6).stroke_width(2),
            ))?
            .label(format!("{isotope} mean = {mean:.1} MeV"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.mix(0.6)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    debug!(path = %fig.path.display(), "Spectra chart written");
    Ok(())
}
