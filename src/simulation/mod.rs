//! Simulation engine: finite-horizon Kelly Monte Carlo, percentile
//! extraction, and the single-path ergodicity processes.

pub mod finite;
pub mod percentile;
pub mod processes;

pub use finite::{final_wealth, simulate, BettingSimulator};
pub use percentile::{percentile_sorted, PercentileBand, PercentileConfig};
pub use processes::{coin_flip_run, CoinFlipRun, MultiplicativeGame, MultiplicativeRun};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Generator for one run: fixed seed when given, OS entropy otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
