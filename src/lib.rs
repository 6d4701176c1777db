//! ERGODIC: ergodicity, Kelly criterion and fission reference plots.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod grid;
pub mod strategy;
pub mod simulation;
pub mod physics;
pub mod render;
