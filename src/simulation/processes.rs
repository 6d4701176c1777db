//! Single-path stochastic processes for the ergodicity figures.
//!
//! The additive coin-flip walk is ergodic: its running time average
//! converges to the ensemble average `2p - 1`. The multiplicative process
//! is not: its ensemble average grows as `E[M]^t` while a typical path
//! decays whenever `E[ln M] < 0`.

use rand::Rng;
use tracing::debug;

use crate::grid::running_mean;
use crate::types::SimError;

// ---------------------------------------------------------------------------
// Additive coin flips
// ---------------------------------------------------------------------------

/// One realization of ±1 coin flips with its running time average.
#[derive(Debug, Clone)]
pub struct CoinFlipRun {
    pub flips: Vec<f64>,
    /// Mean of `flips[..=t]` for every step.
    pub time_average: Vec<f64>,
    /// Expected value of a single flip, `2p - 1`.
    pub ensemble_average: f64,
}

/// Flip `steps` coins, +1 with probability `win_prob` and -1 otherwise.
pub fn coin_flip_run<R: Rng + ?Sized>(
    steps: usize,
    win_prob: f64,
    rng: &mut R,
) -> Result<CoinFlipRun, SimError> {
    check_probability(win_prob)?;
    check_steps(steps)?;

    let flips: Vec<f64> = (0..steps)
        .map(|_| if rng.gen::<f64>() < win_prob { 1.0 } else { -1.0 })
        .collect();
    let time_average = running_mean(&flips);
    let ensemble_average = 2.0 * win_prob - 1.0;

    debug!(
        steps,
        final_time_average = time_average.last().copied().unwrap_or(0.0),
        ensemble_average,
        "Coin flip run"
    );

    Ok(CoinFlipRun {
        flips,
        time_average,
        ensemble_average,
    })
}

// ---------------------------------------------------------------------------
// Multiplicative growth
// ---------------------------------------------------------------------------

/// One realization of a multiplicative process, `steps + 1` points from Y(0) = 1.
#[derive(Debug, Clone)]
pub struct MultiplicativeRun {
    pub path: Vec<f64>,
    /// Arithmetic mean of `path[..=t]`.
    pub time_average: Vec<f64>,
    /// `E[M]^t`.
    pub ensemble_average: Vec<f64>,
    /// `E[M] = p*up + (1-p)*down`.
    pub mean_factor: f64,
}

/// Parameters of the multiplicative game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiplicativeGame {
    pub win_prob: f64,
    pub up_factor: f64,
    pub down_factor: f64,
}

impl MultiplicativeGame {
    pub fn new(win_prob: f64, up_factor: f64, down_factor: f64) -> Self {
        Self {
            win_prob,
            up_factor,
            down_factor,
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        check_probability(self.win_prob)?;
        for (name, factor) in [("up", self.up_factor), ("down", self.down_factor)] {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(SimError::InvalidScenario(format!(
                    "{name} factor must be positive, got {factor}"
                )));
            }
        }
        Ok(())
    }

    /// Expected one-step multiplier.
    pub fn mean_factor(&self) -> f64 {
        self.win_prob * self.up_factor + (1.0 - self.win_prob) * self.down_factor
    }

    /// Expected one-step log multiplier; negative means a typical path decays.
    pub fn log_growth(&self) -> f64 {
        self.win_prob * self.up_factor.ln() + (1.0 - self.win_prob) * self.down_factor.ln()
    }

    pub fn run<R: Rng + ?Sized>(&self, steps: usize, rng: &mut R) -> Result<MultiplicativeRun, SimError> {
        self.validate()?;
        check_steps(steps)?;

        let mut path = Vec::with_capacity(steps + 1);
        let mut y = 1.0;
        path.push(y);
        for _ in 0..steps {
            y *= if rng.gen::<f64>() < self.win_prob {
                self.up_factor
            } else {
                self.down_factor
            };
            path.push(y);
        }

        let mean_factor = self.mean_factor();
        let ensemble_average = (0..=steps).map(|t| mean_factor.powi(t as i32)).collect();
        let time_average = running_mean(&path);

        debug!(
            steps,
            final_value = y,
            mean_factor,
            log_growth = self.log_growth(),
            "Multiplicative run"
        );

        Ok(MultiplicativeRun {
            path,
            time_average,
            ensemble_average,
            mean_factor,
        })
    }
}

fn check_probability(p: f64) -> Result<(), SimError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(SimError::InvalidScenario(format!(
            "probability must be between 0 and 1, got {p}"
        )));
    }
    Ok(())
}

fn check_steps(steps: usize) -> Result<(), SimError> {
    if steps == 0 {
        return Err(SimError::InvalidScenario("steps must be at least 1".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
