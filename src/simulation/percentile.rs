//! Percentile extraction with optional three-point smoothing.
//!
//! Percentiles interpolate linearly between closest ranks,
//! rank = q/100 * (n - 1). A band averages the percentiles at
//! `center - spread`, `center` and `center + spread` to damp sampling noise.

use serde::Deserialize;

use crate::types::{Band, SimError};

// ---------------------------------------------------------------------------
// Raw percentile
// ---------------------------------------------------------------------------

/// Percentile `q` (0..=100) of an ascending-sorted slice.
///
/// Returns NaN for an empty slice.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = (q / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = (lo + 1).min(n - 1);
            let frac = rank - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

// ---------------------------------------------------------------------------
// Bands
// ---------------------------------------------------------------------------

/// A smoothed percentile: mean of three percentiles `spread` apart.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PercentileBand {
    pub center: f64,
    /// Distance in percentile points to the outer taps. 0 = raw percentile.
    #[serde(default)]
    pub spread: f64,
}

impl PercentileBand {
    pub fn new(center: f64, spread: f64) -> Self {
        Self { center, spread }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let lo = self.center - self.spread;
        let hi = self.center + self.spread;
        if !self.spread.is_finite() || self.spread < 0.0 || !(0.0..=100.0).contains(&lo) || !(0.0..=100.0).contains(&hi) {
            return Err(SimError::InvalidScenario(format!(
                "percentile band {}±{} must stay within 0..=100",
                self.center, self.spread
            )));
        }
        Ok(())
    }

    /// Evaluate this band on an ascending-sorted slice.
    pub fn evaluate(&self, sorted: &[f64]) -> f64 {
        if self.spread == 0.0 {
            return percentile_sorted(sorted, self.center);
        }
        (percentile_sorted(sorted, self.center - self.spread)
            + percentile_sorted(sorted, self.center)
            + percentile_sorted(sorted, self.center + self.spread))
            / 3.0
    }
}

/// The low / mid / high bands reported per fraction.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PercentileConfig {
    pub low: PercentileBand,
    pub mid: PercentileBand,
    pub high: PercentileBand,
}

impl Default for PercentileConfig {
    fn default() -> Self {
        Self {
            low: PercentileBand::new(10.0, 5.0),   // 5th/10th/15th
            mid: PercentileBand::new(50.0, 5.0),   // 45th/50th/55th
            high: PercentileBand::new(90.0, 5.0),  // 85th/90th/95th
        }
    }
}

impl PercentileConfig {
    /// Raw 10th/50th/90th percentiles, no smoothing.
    pub fn unsmoothed() -> Self {
        Self {
            low: PercentileBand::new(10.0, 0.0),
            mid: PercentileBand::new(50.0, 0.0),
            high: PercentileBand::new(90.0, 0.0),
        }
    }

    pub fn band(&self, band: Band) -> &PercentileBand {
        match band {
            Band::Low => &self.low,
            Band::Mid => &self.mid,
            Band::High => &self.high,
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        for band in Band::ALL {
            self.band(band).validate()?;
        }
        Ok(())
    }

    /// Legend label for a band, e.g. "10th Percentile".
    pub fn label(&self, band: Band) -> String {
        let center = self.band(band).center;
        let label = format!("{} Percentile", ordinal(center));
        if center == 50.0 {
            format!("{label} (Median)")
        } else {
            label
        }
    }
}

fn ordinal(value: f64) -> String {
    if value.fract() != 0.0 {
        return format!("{value}th");
    }
    let n = value as u64;
    let suffix = match (n % 10, n % 100) {
        (1, r) if r != 11 => "st",
        (2, r) if r != 12 => "nd",
        (3, r) if r != 13 => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
