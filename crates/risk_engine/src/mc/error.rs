//! Error types for the simulation engine.
//!
//! Only structural input-contract violations surface as errors. Market
//! extremity never does: extreme inputs are exactly what the engine
//! quantifies, and inconsistent correlation triples are stability-clamped
//! upstream rather than rejected here.

use risk_core::assets::AssetType;
use thiserror::Error;

/// Errors raised by the Monte Carlo engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Trial count outside [1, `MAX_TRIALS`].
    #[error("invalid trial count {0}: must be in [1, 1_000_000]")]
    InvalidTrialCount(usize),

    /// The horizon must be at least one day.
    #[error("horizon must be at least one day")]
    InvalidHorizon,

    /// The price snapshot lacks a price for an asset the portfolio holds.
    #[error("price snapshot has no price for {asset}")]
    MissingPrice {
        /// The asset without a price.
        asset: AssetType,
    },

    /// The caller aborted the simulation between trials.
    #[error("simulation aborted by caller")]
    Aborted,
}
