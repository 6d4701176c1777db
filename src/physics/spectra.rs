//! Prompt fission neutron spectra as normalized Maxwellians.
//!
//! f(E) = 2/sqrt(pi) * sqrt(E) / T^(3/2) * exp(-E/T), E and T in MeV.
//! The mean energy of this distribution is 1.5 * T.

use std::f64::consts::PI;

use super::Isotope;
use crate::grid::linspace;

/// Upper edge of the plotted energy grid (MeV).
pub const ENERGY_MAX_MEV: f64 = 4.0;
/// Points on the plotted energy grid.
pub const ENERGY_POINTS: usize = 1000;

/// Spectrum temperature in MeV, chosen so that 1.5*T matches the
/// reported mean prompt-neutron energy.
pub fn temperature_mev(isotope: Isotope) -> f64 {
    match isotope {
        Isotope::U235 => 1.33,  // mean ~2.0 MeV
        Isotope::Pu239 => 1.40, // mean ~2.1 MeV
        Isotope::U238 => 1.53,  // mean ~2.3 MeV
    }
}

pub fn mean_energy_mev(isotope: Isotope) -> f64 {
    1.5 * temperature_mev(isotope)
}

/// Normalized Maxwellian density at energy `e` for temperature `t`.
pub fn maxwellian(e: f64, t: f64) -> f64 {
    if e <= 0.0 {
        return 0.0;
    }
    (2.0 / PI.sqrt()) * (e.sqrt() / t.powf(1.5)) * (-e / t).exp()
}

/// `(E, f(E))` on `linspace(0, ENERGY_MAX_MEV, ENERGY_POINTS)`.
pub fn spectrum(isotope: Isotope) -> Vec<(f64, f64)> {
    let t = temperature_mev(isotope);
    linspace(0.0, ENERGY_MAX_MEV, ENERGY_POINTS)
        .into_iter()
        .map(|e| (e, maxwellian(e, t)))
        .collect()
}
