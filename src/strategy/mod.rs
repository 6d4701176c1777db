//! Betting strategy: closed-form Kelly sizing and log-growth analysis.

pub mod kelly;

pub use kelly::{kelly_fraction, KellyGame};
