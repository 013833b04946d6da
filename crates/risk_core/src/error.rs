//! Error types for structured error handling.
//!
//! This module provides:
//! - `AssetError`: Errors from collateral construction
//! - `PriceError`: Errors from market-price snapshot construction
//! - `CorrelationError`: Errors from correlation-parameter validation
//!
//! These are construction-time contract violations. Numerical degeneracies
//! (zero collateral, inconsistent correlation triples) are deliberately NOT
//! errors; they are handled with sentinels and clamps at the point of use.

use thiserror::Error;

use crate::assets::AssetType;

/// Errors raised when constructing collateral positions or policies.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    /// Collateral quantity was negative.
    #[error("collateral quantity {got} is negative")]
    NegativeQuantity {
        /// The offending quantity.
        got: f64,
    },

    /// Collateral quantity was NaN or infinite.
    #[error("collateral quantity {got} is not finite")]
    NonFiniteQuantity {
        /// The offending quantity.
        got: f64,
    },

    /// Margin thresholds must satisfy warn < call < liquidation.
    #[error("margin thresholds not strictly increasing: warn={warn}, call={call}, liquidation={liquidation}")]
    InvalidMarginThresholds {
        /// Warning threshold.
        warn: f64,
        /// Margin-call threshold.
        call: f64,
        /// Liquidation threshold.
        liquidation: f64,
    },
}

/// Errors raised when constructing a market-price snapshot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceError {
    /// Price was NaN or infinite.
    #[error("price for {asset} is not finite: {got}")]
    NonFinite {
        /// Asset the price was supplied for.
        asset: AssetType,
        /// The offending price.
        got: f64,
    },

    /// Price was zero or negative.
    #[error("price for {asset} must be positive, got {got}")]
    NonPositive {
        /// Asset the price was supplied for.
        asset: AssetType,
        /// The offending price.
        got: f64,
    },
}

/// Errors raised when validating correlation parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorrelationError {
    /// A pairwise correlation was outside [-1, 1].
    #[error("correlation {name} is {got}, must be in [-1, 1]")]
    OutOfRange {
        /// Which pair the value was supplied for.
        name: &'static str,
        /// The offending value.
        got: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NegativeQuantity { got: -1.5 };
        assert!(err.to_string().contains("-1.5"));

        let err = AssetError::InvalidMarginThresholds {
            warn: 0.8,
            call: 0.7,
            liquidation: 0.9,
        };
        assert!(err.to_string().contains("strictly increasing"));
    }

    #[test]
    fn test_price_error_display() {
        let err = PriceError::NonPositive {
            asset: AssetType::Btc,
            got: 0.0,
        };
        assert!(err.to_string().contains("BTC"));
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_correlation_error_display() {
        let err = CorrelationError::OutOfRange {
            name: "btc_eth",
            got: 1.5,
        };
        assert!(err.to_string().contains("btc_eth"));
        assert!(err.to_string().contains("1.5"));
    }
}
