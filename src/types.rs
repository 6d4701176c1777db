//! Core domain types for ERGODIC.
//!
//! Betting scenarios, per-fraction wealth statistics, the result table
//! produced by the simulator, and the library error enum.

use std::fmt;

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

/// Immutable configuration of a finite-horizon betting game.
///
/// Win => wealth multiplied by `1 + win_coef * f`.
/// Lose => wealth multiplied by `1 - loss_coef * f`.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// Probability of winning a single round.
    pub win_prob: f64,
    /// Win coefficient `a`.
    pub win_coef: f64,
    /// Loss coefficient `b`.
    pub loss_coef: f64,
    /// Betting rounds per trial (`n`).
    pub rounds: usize,
    /// Monte Carlo trials per fraction (`T`).
    pub trials: usize,
    /// Candidate bet fractions, in output order.
    pub fractions: Vec<f64>,
}

impl Scenario {
    /// Check every constraint before a single trial runs.
    ///
    /// Scenario-level problems are reported before fraction-level ones.
    pub fn validate(&self) -> Result<(), SimError> {
        if !(0.0..=1.0).contains(&self.win_prob) {
            return Err(SimError::InvalidScenario(format!(
                "win probability must be between 0 and 1, got {}",
                self.win_prob
            )));
        }
        if !self.win_coef.is_finite() || self.win_coef <= 0.0 {
            return Err(SimError::InvalidScenario(format!(
                "win coefficient must be positive, got {}",
                self.win_coef
            )));
        }
        if !self.loss_coef.is_finite() || self.loss_coef <= 0.0 {
            return Err(SimError::InvalidScenario(format!(
                "loss coefficient must be positive, got {}",
                self.loss_coef
            )));
        }
        if self.rounds == 0 {
            return Err(SimError::InvalidScenario("rounds must be at least 1".into()));
        }
        if self.trials == 0 {
            return Err(SimError::InvalidScenario("trials must be at least 1".into()));
        }
        if self.fractions.is_empty() {
            return Err(SimError::InvalidScenario("no fractions to evaluate".into()));
        }
        for &f in &self.fractions {
            self.check_fraction(f)?;
        }
        Ok(())
    }

    /// A fraction is usable when it is finite, non-negative and keeps
    /// `1 - b*f` strictly positive.
    pub fn check_fraction(&self, fraction: f64) -> Result<(), SimError> {
        if !fraction.is_finite() || fraction < 0.0 || self.loss_coef * fraction >= 1.0 {
            return Err(SimError::InvalidFraction {
                fraction,
                loss_coef: self.loss_coef,
            });
        }
        Ok(())
    }

    /// Wealth multiplier applied on a winning round.
    pub fn win_multiplier(&self, fraction: f64) -> f64 {
        1.0 + self.win_coef * fraction
    }

    /// Wealth multiplier applied on a losing round.
    pub fn loss_multiplier(&self, fraction: f64) -> f64 {
        1.0 - self.loss_coef * fraction
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Which of the three statistics of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Low,
    Mid,
    High,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Low, Band::Mid, Band::High];
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Band::Low => write!(f, "low"),
            Band::Mid => write!(f, "mid"),
            Band::High => write!(f, "high"),
        }
    }
}

/// Final-wealth statistics for a single bet fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractionStats {
    pub fraction: f64,
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl FractionStats {
    pub fn get(&self, band: Band) -> f64 {
        match band {
            Band::Low => self.low,
            Band::Mid => self.mid,
            Band::High => self.high,
        }
    }
}

/// Simulator output, one row per fraction in scenario order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    pub rows: Vec<FractionStats>,
}

impl ResultTable {
    pub fn new(rows: Vec<FractionStats>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn fractions(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.fraction).collect()
    }

    /// `(fraction, statistic)` pairs for one band.
    pub fn series(&self, band: Band) -> Vec<(f64, f64)> {
        self.rows.iter().map(|r| (r.fraction, r.get(band))).collect()
    }

    /// Look up the row for an exact fraction value.
    pub fn get(&self, fraction: f64) -> Option<&FractionStats> {
        self.rows.iter().find(|r| r.fraction == fraction)
    }

    /// The row whose statistic for `band` is largest.
    /// Ties go to the earliest row.
    pub fn best_for(&self, band: Band) -> Option<&FractionStats> {
        let mut best: Option<&FractionStats> = None;
        for row in &self.rows {
            let value = row.get(band);
            if value.is_nan() {
                continue;
            }
            match best {
                Some(b) if b.get(band) >= value => {}
                _ => best = Some(row),
            }
        }
        best
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for ERGODIC.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Invalid fraction {fraction}: loss coefficient {loss_coef} would drive wealth non-positive")]
    InvalidFraction { fraction: f64, loss_coef: f64 },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Scenario {
        Scenario {
            win_prob: 0.55,
            win_coef: 0.85,
            loss_coef: 0.65,
            rounds: 100,
            trials: 10,
            fractions: vec![0.0, 0.1, 0.2],
        }
    }

    fn row(fraction: f64, low: f64, mid: f64, high: f64) -> FractionStats {
        FractionStats { fraction, low, mid, high }
    }

    // -- Scenario validation --

    #[test]
    fn test_valid_scenario() {
        assert!(scenario().validate().is_ok());
    }

    #[test]
    fn test_probability_out_of_range() {
        let s = Scenario { win_prob: 1.2, ..scenario() };
        assert!(matches!(s.validate(), Err(SimError::InvalidScenario(_))));
        let s = Scenario { win_prob: -0.1, ..scenario() };
        assert!(matches!(s.validate(), Err(SimError::InvalidScenario(_))));
        let s = Scenario { win_prob: f64::NAN, ..scenario() };
        assert!(matches!(s.validate(), Err(SimError::InvalidScenario(_))));
    }

    #[test]
    fn test_probability_bounds_inclusive() {
        assert!(Scenario { win_prob: 0.0, ..scenario() }.validate().is_ok());
        assert!(Scenario { win_prob: 1.0, ..scenario() }.validate().is_ok());
    }

    #[test]
    fn test_non_positive_coefficients() {
        let s = Scenario { win_coef: 0.0, ..scenario() };
        assert!(matches!(s.validate(), Err(SimError::InvalidScenario(_))));
        let s = Scenario { loss_coef: -1.0, ..scenario() };
        assert!(matches!(s.validate(), Err(SimError::InvalidScenario(_))));
    }

    #[test]
    fn test_non_finite_coefficients() {
        let s = Scenario { win_coef: f64::INFINITY, ..scenario() };
        assert!(matches!(s.validate(), Err(SimError::InvalidScenario(_))));
        let s = Scenario { loss_coef: f64::NAN, ..scenario() };
        assert!(matches!(s.validate(), Err(SimError::InvalidScenario(_))));
    }

    #[test]
    fn test_non_finite_fraction() {
        let s = Scenario { fractions: vec![0.1, f64::NAN], ..scenario() };
        match s.validate() {
            Err(SimError::InvalidFraction { fraction, .. }) => assert!(fraction.is_nan()),
            other => panic!("expected InvalidFraction, got {other:?}"),
        }
        let s = Scenario { fractions: vec![f64::INFINITY], ..scenario() };
        assert!(matches!(s.validate(), Err(SimError::InvalidFraction { .. })));
    }

    #[test]
    fn test_zero_rounds_or_trials() {
        let s = Scenario { rounds: 0, ..scenario() };
        assert!(matches!(s.validate(), Err(SimError::InvalidScenario(_))));
        let s = Scenario { trials: 0, ..scenario() };
        assert!(matches!(s.validate(), Err(SimError::InvalidScenario(_))));
    }

    #[test]
    fn test_empty_fractions() {
        let s = Scenario { fractions: vec![], ..scenario() };
        assert!(matches!(s.validate(), Err(SimError::InvalidScenario(_))));
    }

    #[test]
    fn test_fraction_at_ruin_boundary() {
        // b*f == 1 exactly
        let s = Scenario { loss_coef: 0.5, fractions: vec![0.1, 2.0], ..scenario() };
        match s.validate() {
            Err(SimError::InvalidFraction { fraction, loss_coef }) => {
                assert_eq!(fraction, 2.0);
                assert_eq!(loss_coef, 0.5);
            }
            other => panic!("expected InvalidFraction, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_fraction() {
        let s = Scenario { fractions: vec![-0.01], ..scenario() };
        assert!(matches!(s.validate(), Err(SimError::InvalidFraction { .. })));
    }

    #[test]
    fn test_scenario_error_reported_before_fraction_error() {
        let s = Scenario { rounds: 0, fractions: vec![5.0], ..scenario() };
        assert!(matches!(s.validate(), Err(SimError::InvalidScenario(_))));
    }

    #[test]
    fn test_multipliers() {
        let s = scenario();
        assert!((s.win_multiplier(0.2) - 1.17).abs() < 1e-12);
        assert!((s.loss_multiplier(0.2) - 0.87).abs() < 1e-12);
        assert_eq!(s.win_multiplier(0.0), 1.0);
        assert_eq!(s.loss_multiplier(0.0), 1.0);
    }

    // -- Result table --

    #[test]
    fn test_best_for_each_band() {
        let table = ResultTable::new(vec![
            row(0.0, 1.0, 1.0, 1.0),
            row(0.1, 1.5, 2.0, 3.0),
            row(0.2, 1.2, 2.5, 6.0),
        ]);
        assert_eq!(table.best_for(Band::Low).unwrap().fraction, 0.1);
        assert_eq!(table.best_for(Band::Mid).unwrap().fraction, 0.2);
        assert_eq!(table.best_for(Band::High).unwrap().fraction, 0.2);
    }

    #[test]
    fn test_best_for_ties_pick_first() {
        let table = ResultTable::new(vec![
            row(0.0, 1.0, 1.0, 1.0),
            row(0.1, 1.0, 1.0, 1.0),
        ]);
        assert_eq!(table.best_for(Band::Mid).unwrap().fraction, 0.0);
    }

    #[test]
    fn test_best_for_empty() {
        assert!(ResultTable::new(vec![]).best_for(Band::Low).is_none());
    }

    #[test]
    fn test_series_and_lookup() {
        let table = ResultTable::new(vec![row(0.0, 1.0, 2.0, 3.0), row(0.5, 4.0, 5.0, 6.0)]);
        assert_eq!(table.series(Band::High), vec![(0.0, 3.0), (0.5, 6.0)]);
        assert_eq!(table.fractions(), vec![0.0, 0.5]);
        assert_eq!(table.get(0.5).unwrap().mid, 5.0);
        assert!(table.get(0.25).is_none());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_error_display() {
        let err = SimError::InvalidScenario("rounds must be at least 1".into());
        assert!(err.to_string().contains("Invalid scenario"));
        let err = SimError::InvalidFraction { fraction: 2.0, loss_coef: 0.5 };
        assert!(err.to_string().contains("Invalid fraction 2"));
    }

    #[test]
    fn test_band_display() {
        assert_eq!(Band::Low.to_string(), "low");
        assert_eq!(Band::ALL.len(), 3);
    }
}
