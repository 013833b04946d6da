//! Error types for loan and portfolio construction.

use risk_core::assets::AssetType;
use thiserror::Error;

/// Errors raised when constructing a loan.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    /// Principal must be positive and finite.
    #[error("principal must be positive and finite, got {got}")]
    InvalidPrincipal {
        /// The offending principal.
        got: f64,
    },

    /// Annual lending rate must be non-negative and finite.
    #[error("annual rate must be non-negative and finite, got {got}")]
    InvalidRate {
        /// The offending rate.
        got: f64,
    },

    /// Tenor must be at least one day.
    #[error("tenor must be at least one day")]
    ZeroTenor,

    /// Leverage ratio must be non-negative and finite.
    #[error("leverage must be non-negative and finite, got {got}")]
    InvalidLeverage {
        /// The offending leverage.
        got: f64,
    },
}

/// Errors raised when building a portfolio.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// Two loans shared the same identifier.
    #[error("duplicate loan id: {id}")]
    DuplicateLoanId {
        /// The duplicated identifier.
        id: String,
    },

    /// Risk capital must be positive and finite.
    #[error("risk capital must be positive and finite, got {got}")]
    InvalidRiskCapital {
        /// The offending amount.
        got: f64,
    },
}

/// Errors raised when computing metrics over a portfolio.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The price snapshot is missing an asset the portfolio holds.
    #[error("price snapshot has no price for {asset}")]
    MissingPrice {
        /// The asset without a price.
        asset: AssetType,
    },
}
