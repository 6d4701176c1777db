//! Kelly criterion for the two-outcome multiplicative bet.
//!
//! Win => wealth multiplied by (1 + a*f), lose => by (1 - b*f).
//! The Kelly fraction maximizes `p*ln(1 + a*f) + (1-p)*ln(1 - b*f)`.

use tracing::debug;

use crate::grid::linspace;

// ---------------------------------------------------------------------------
// Closed form
// ---------------------------------------------------------------------------

/// Kelly fraction: f* = (p*a - (1-p)*b) / (a*b)
///
/// The raw formula, not clamped: a negative value means the game has no
/// edge, and values above `1/b` are outside the bettable range.
pub fn kelly_fraction(win_prob: f64, win_coef: f64, loss_coef: f64) -> f64 {
    (win_prob * win_coef - (1.0 - win_prob) * loss_coef) / (win_coef * loss_coef)
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// Parameters of a repeated two-outcome bet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KellyGame {
    pub win_prob: f64,
    pub win_coef: f64,
    pub loss_coef: f64,
}

impl KellyGame {
    pub fn new(win_prob: f64, win_coef: f64, loss_coef: f64) -> Self {
        Self {
            win_prob,
            win_coef,
            loss_coef,
        }
    }

    pub fn kelly_fraction(&self) -> f64 {
        kelly_fraction(self.win_prob, self.win_coef, self.loss_coef)
    }

    /// Expected log-growth per round, G(f).
    ///
    /// NaN or -inf where `1 - b*f <= 0`.
    pub fn growth_rate(&self, fraction: f64) -> f64 {
        let p = self.win_prob;
        p * (1.0 + self.win_coef * fraction).ln()
            + (1.0 - p) * (1.0 - self.loss_coef * fraction).ln()
    }

    /// Sample G(f) on `samples` evenly spaced fractions in `[0, f_max]`,
    /// dropping points where G is not finite.
    pub fn growth_curve(&self, f_max: f64, samples: usize) -> Vec<(f64, f64)> {
        let curve: Vec<(f64, f64)> = linspace(0.0, f_max, samples)
            .into_iter()
            .map(|f| (f, self.growth_rate(f)))
            .filter(|(_, g)| g.is_finite())
            .collect();

        debug!(
            requested = samples,
            kept = curve.len(),
            f_max,
            "Growth curve sampled"
        );
        curve
    }

    /// Median of the final wealth after `rounds` rounds, taking the
    /// expected win count `p*n` as exact:
    /// (1 + a*f)^(p*n) * (1 - b*f)^((1-p)*n)
    pub fn theoretical_median(&self, fraction: f64, rounds: usize) -> f64 {
        (rounds as f64 * self.growth_rate(fraction)).exp()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
