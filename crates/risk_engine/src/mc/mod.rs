//! Monte Carlo orchestration.
//!
//! Combines one correlated price draw and one correlated default draw per
//! trial, aggregates per-trial portfolio losses into an empirical loss
//! distribution, and derives tail statistics and per-loan risk
//! contributions.

pub mod config;
pub mod contribution;
pub mod engine;
pub mod error;
pub mod result;

pub use config::{SimulationConfig, SimulationConfigBuilder, DEFAULT_TRIALS, MAX_TRIALS};
pub use contribution::RiskContribution;
pub use engine::MonteCarloEngine;
pub use error::SimulationError;
pub use result::SimulationResult;
