//! Finite-horizon betting simulator.
//!
//! For each candidate fraction, runs `trials` independent wealth paths of
//! `rounds` coin tosses and reports smoothed percentiles of final wealth.
//! Fractions are simulated in parallel; each one owns an RNG seeded from
//! the caller's generator, so results depend only on that generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use super::percentile::PercentileConfig;
use crate::types::{FractionStats, ResultTable, Scenario, SimError};

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

pub struct BettingSimulator {
    percentiles: PercentileConfig,
}

impl Default for BettingSimulator {
    fn default() -> Self {
        Self::new(PercentileConfig::default())
    }
}

impl BettingSimulator {
    pub fn new(percentiles: PercentileConfig) -> Self {
        Self { percentiles }
    }

    /// Access the percentile configuration.
    pub fn percentiles(&self) -> &PercentileConfig {
        &self.percentiles
    }

    /// Simulate every fraction of `scenario`.
    ///
    /// Validation runs first: nothing is drawn from `rng` when the scenario
    /// or any fraction is invalid.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        scenario: &Scenario,
        rng: &mut R,
    ) -> Result<ResultTable, SimError> {
        self.percentiles.validate()?;
        scenario.validate()?;

        // One sub-seed per fraction, drawn in fraction order.
        let seeds: Vec<u64> = scenario.fractions.iter().map(|_| rng.gen()).collect();

        let rows: Vec<FractionStats> = scenario
            .fractions
            .par_iter()
            .zip(seeds.into_par_iter())
            .map(|(&fraction, seed)| {
                let mut trial_rng = StdRng::seed_from_u64(seed);
                self.simulate_fraction(scenario, fraction, &mut trial_rng)
            })
            .collect();

        info!(
            rounds = scenario.rounds,
            trials = scenario.trials,
            fractions = rows.len(),
            "Betting simulation complete"
        );

        Ok(ResultTable::new(rows))
    }

    /// Run all trials for one fraction and summarise them.
    fn simulate_fraction<R: Rng + ?Sized>(
        &self,
        scenario: &Scenario,
        fraction: f64,
        rng: &mut R,
    ) -> FractionStats {
        let mut finals: Vec<f64> = (0..scenario.trials)
            .map(|_| final_wealth(scenario, fraction, rng))
            .collect();
        finals.sort_by(f64::total_cmp);

        let stats = FractionStats {
            fraction,
            low: self.percentiles.low.evaluate(&finals),
            mid: self.percentiles.mid.evaluate(&finals),
            high: self.percentiles.high.evaluate(&finals),
        };

        debug!(
            fraction,
            low = stats.low,
            mid = stats.mid,
            high = stats.high,
            "Fraction simulated"
        );
        stats
    }
}

/// Simulate with the default 10/50/90 smoothed bands.
pub fn simulate<R: Rng + ?Sized>(scenario: &Scenario, rng: &mut R) -> Result<ResultTable, SimError> {
    BettingSimulator::default().simulate(scenario, rng)
}

/// One wealth path: start at 1.0, multiply per round, keep the end value.
pub fn final_wealth<R: Rng + ?Sized>(scenario: &Scenario, fraction: f64, rng: &mut R) -> f64 {
    let win = scenario.win_multiplier(fraction);
    let lose = scenario.loss_multiplier(fraction);
    let mut wealth = 1.0;
    for _ in 0..scenario.rounds {
        if rng.gen::<f64>() < scenario.win_prob {
            wealth *= win;
        } else {
            wealth *= lose;
        }
    }
    wealth
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
