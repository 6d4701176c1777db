//! Nuclear reference data: fission cross sections and prompt neutron
//! spectra for the fissile and fertile isotopes.
//!
//! Tables are synthetic, tuned to typical thermal and fast-region values.

pub mod cross_sections;
pub mod spectra;

use std::fmt;

/// Isotopes covered by the reference figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Isotope {
    U235,
    Pu239,
    U238,
}

impl Isotope {
    pub const ALL: [Isotope; 3] = [Isotope::U235, Isotope::Pu239, Isotope::U238];
}

impl fmt::Display for Isotope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Isotope::U235 => write!(f, "U-235"),
            Isotope::Pu239 => write!(f, "Pu-239"),
            Isotope::U238 => write!(f, "U-238"),
        }
    }
}
