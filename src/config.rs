//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section and field has a default equal to the constants the
//! figures were originally tuned with, so a missing file or a partial
//! file is fine.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::grid::linspace;
use crate::simulation::percentile::PercentileConfig;
use crate::types::Scenario;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub ergodic: ErgodicConfig,
    pub growth_curve: GrowthCurveConfig,
    pub kelly_sim: KellySimConfig,
    pub non_ergodic: NonErgodicConfig,
    pub physics: PhysicsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the PNG files are written to.
    pub dir: PathBuf,
    /// Bitmap size in pixels.
    pub width: u32,
    pub height: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("plots"),
            width: 1500,
            height: 900,
        }
    }
}

/// Additive coin-flip walk.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ErgodicConfig {
    pub enabled: bool,
    pub steps: usize,
    pub win_prob: f64,
    /// `None` draws a fresh seed from the OS on every run.
    pub seed: Option<u64>,
}

impl Default for ErgodicConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            steps: 100,
            win_prob: 0.6,
            seed: None,
        }
    }
}

/// Expected log-growth curve G(f).
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GrowthCurveConfig {
    pub enabled: bool,
    pub win_prob: f64,
    pub win_coef: f64,
    pub loss_coef: f64,
    pub fraction_max: f64,
    pub samples: usize,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for GrowthCurveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            win_prob: 0.7,
            win_coef: 1.5,
            loss_coef: 0.95,
            fraction_max: 1.0,
            samples: 200,
            y_min: -0.2,
            y_max: 0.3,
        }
    }
}

/// Finite-horizon Kelly Monte Carlo, one figure per round count.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct KellySimConfig {
    pub enabled: bool,
    pub win_prob: f64,
    pub win_coef: f64,
    pub loss_coef: f64,
    pub trials: usize,
    pub rounds: Vec<usize>,
    pub fraction_min: f64,
    pub fraction_max: f64,
    pub fraction_count: usize,
    /// Every round count restarts from this seed. `None` = OS entropy.
    pub seed: Option<u64>,
    pub percentiles: PercentileConfig,
}

impl Default for KellySimConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            win_prob: 0.55,
            win_coef: 0.85,
            loss_coef: 0.65,
            trials: 2000,
            rounds: vec![100, 200, 400, 800, 1600, 3200],
            fraction_min: 0.0,
            fraction_max: 0.8,
            fraction_count: 51,
            seed: Some(42),
            percentiles: PercentileConfig::default(),
        }
    }
}

impl KellySimConfig {
    pub fn fractions(&self) -> Vec<f64> {
        linspace(self.fraction_min, self.fraction_max, self.fraction_count)
    }

    /// Scenario for one round count. Validation is left to the simulator.
    pub fn scenario(&self, rounds: usize) -> Scenario {
        Scenario {
            win_prob: self.win_prob,
            win_coef: self.win_coef,
            loss_coef: self.loss_coef,
            rounds,
            trials: self.trials,
            fractions: self.fractions(),
        }
    }
}

/// Multiplicative single-path process.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NonErgodicConfig {
    pub enabled: bool,
    pub steps: usize,
    pub win_prob: f64,
    pub up_factor: f64,
    pub down_factor: f64,
    pub seed: Option<u64>,
}

impl Default for NonErgodicConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            steps: 200,
            win_prob: 0.5,
            up_factor: 1.6,
            down_factor: 0.5,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PhysicsConfig {
    pub cross_sections: bool,
    pub spectra: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            cross_sections: true,
            spectra: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }
}
