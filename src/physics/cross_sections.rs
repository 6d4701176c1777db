//! Fission cross sections on a decade energy grid.
//!
//! Energies are log10(E / eV) from -2 (0.01 eV) to 7 (10 MeV).
//! Cross sections are stored as log10(σ / cm²).

use super::Isotope;
use crate::grid::linspace;

/// log10(E / eV) grid points.
pub const LOG10_ENERGY_EV: [f64; 10] = [-2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];

/// U-235: ~585 b thermal, falling roughly as 1/v to ~1 keV, ~1.5 b fast.
const LOG10_SIGMA_U235: [f64; 10] = [
    -21.10, -21.30, -21.70, -22.22, -22.70, -23.30, -23.70, -24.00, -23.82, -23.89,
];

/// Pu-239: ~750 b thermal, ~3 b fast.
const LOG10_SIGMA_PU239: [f64; 10] = [
    -21.05, -21.16, -21.52, -22.00, -22.40, -23.00, -23.40, -23.70, -23.52, -23.55,
];

/// U-238: threshold fission, nominal 1e-30 cm² below ~1 keV.
const LOG10_SIGMA_U238: [f64; 10] = [
    -30.0, -30.0, -30.0, -30.0, -29.0, -27.0, -26.16, -25.10, -24.16, -24.10,
];

/// log10 cross-section table for an isotope, aligned with [`LOG10_ENERGY_EV`].
pub fn log10_table(isotope: Isotope) -> &'static [f64; 10] {
    match isotope {
        Isotope::U235 => &LOG10_SIGMA_U235,
        Isotope::Pu239 => &LOG10_SIGMA_PU239,
        Isotope::U238 => &LOG10_SIGMA_U238,
    }
}

/// Cross sections in cm² at the grid points.
pub fn sigma_cm2(isotope: Isotope) -> Vec<f64> {
    log10_table(isotope).iter().map(|l| 10f64.powf(*l)).collect()
}

/// `(log10 E, σ)` pairs ready for plotting.
pub fn curve(isotope: Isotope) -> Vec<(f64, f64)> {
    LOG10_ENERGY_EV.iter().copied().zip(sigma_cm2(isotope)).collect()
}

/// Cross section at an arbitrary energy, interpolated linearly in
/// log-log space. Energies outside the grid clamp to the end values.
pub fn sigma_at(isotope: Isotope, log10_energy_ev: f64) -> f64 {
    let table = log10_table(isotope);
    let first = LOG10_ENERGY_EV[0];
    let last = LOG10_ENERGY_EV[LOG10_ENERGY_EV.len() - 1];
    let x = log10_energy_ev.clamp(first, last);

    let idx = LOG10_ENERGY_EV
        .windows(2)
        .position(|w| x <= w[1])
        .unwrap_or(LOG10_ENERGY_EV.len() - 2);
    let (x0, x1) = (LOG10_ENERGY_EV[idx], LOG10_ENERGY_EV[idx + 1]);
    let t = (x - x0) / (x1 - x0);
    let log_sigma = table[idx] + (table[idx + 1] - table[idx]) * t;
    10f64.powf(log_sigma)
}

/// `samples` points of the log-log interpolated curve, spanning the grid.
pub fn interpolated_curve(isotope: Isotope, samples: usize) -> Vec<(f64, f64)> {
    let first = LOG10_ENERGY_EV[0];
    let last = LOG10_ENERGY_EV[LOG10_ENERGY_EV.len() - 1];
    linspace(first, last, samples)
        .into_iter()
        .map(|x| (x, sigma_at(isotope, x)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel_close(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < 1e-9
    }

    #[test]
    fn test_thermal_values() {
        // ~585 b and ~750 b at thermal energies (1 b = 1e-24 cm²)
        let u235 = sigma_cm2(Isotope::U235)[0];
        let pu239 = sigma_cm2(Isotope::Pu239)[0];
        assert!(u235 > 5e-22 && u235 < 1e-21);
        assert!(pu239 > u235);
    }

    #[test]
    fn test_u238_threshold() {
        let sigma = sigma_cm2(Isotope::U238);
        assert!(sigma[..4].iter().all(|&s| rel_close(s, 1e-30)));
        assert!(sigma[9] > 1e-25);
        assert!(sigma.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_lookup_hits_grid_points() {
        for isotope in Isotope::ALL {
            let sigma = sigma_cm2(isotope);
            for (i, &x) in LOG10_ENERGY_EV.iter().enumerate() {
                assert!(rel_close(sigma_at(isotope, x), sigma[i]), "{isotope} at {x}");
            }
        }
    }

    #[test]
    fn test_lookup_interpolates_in_log_space() {
        // midway between -21.10 and -21.30
        assert!(rel_close(sigma_at(Isotope::U235, -1.5), 10f64.powf(-21.20)));
    }

    #[test]
    fn test_lookup_clamps() {
        assert!(rel_close(sigma_at(Isotope::Pu239, -5.0), 10f64.powf(-21.05)));
        assert!(rel_close(sigma_at(Isotope::Pu239, 9.0), 10f64.powf(-23.55)));
    }

    #[test]
    fn test_interpolated_curve_passes_through_table() {
        let c = interpolated_curve(Isotope::U238, 901);
        assert_eq!(c.len(), 901);
        // every 100th sample lands on a decade grid point
        for (i, &(x, sigma)) in c.iter().step_by(100).enumerate() {
            assert!((x - LOG10_ENERGY_EV[i]).abs() < 1e-9);
            assert!(rel_close(sigma, sigma_cm2(Isotope::U238)[i]));
        }
    }

    #[test]
    fn test_curve_pairs() {
        let c = curve(Isotope::U235);
        assert_eq!(c.len(), 10);
        assert_eq!(c[0].0, -2.0);
        assert_eq!(c[9].0, 7.0);
    }
}
