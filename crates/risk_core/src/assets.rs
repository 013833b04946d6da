//! Collateral asset universe.
//!
//! The universe is a closed set of three assets (BTC, ETH, SOL). Each asset
//! carries two fixed policies:
//!
//! - a **margin policy**: the warn / call / liquidation LTV thresholds,
//!   strictly increasing;
//! - **risk characteristics**: the liquidation slippage fraction and a
//!   volatility multiplier applied on top of the base annualized
//!   volatility.
//!
//! Extending the universe means extending this module's tables, not
//! touching callers: everything downstream iterates [`AssetType::ALL`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Collateral asset type.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AssetType {
    /// Bitcoin.
    Btc,
    /// Ether.
    Eth,
    /// Solana.
    Sol,
}

impl AssetType {
    /// All asset types, in canonical order.
    pub const ALL: [AssetType; 3] = [AssetType::Btc, AssetType::Eth, AssetType::Sol];

    /// Ticker symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            AssetType::Btc => "BTC",
            AssetType::Eth => "ETH",
            AssetType::Sol => "SOL",
        }
    }

    /// Index into canonical-order arrays.
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            AssetType::Btc => 0,
            AssetType::Eth => 1,
            AssetType::Sol => 2,
        }
    }

    /// The asset's margin policy (warn / call / liquidation LTVs).
    pub fn margin_policy(&self) -> MarginPolicy {
        match self {
            AssetType::Btc => MarginPolicy {
                warn_ltv: 0.70,
                call_ltv: 0.80,
                liquidation_ltv: 0.90,
            },
            AssetType::Eth => MarginPolicy {
                warn_ltv: 0.65,
                call_ltv: 0.75,
                liquidation_ltv: 0.85,
            },
            AssetType::Sol => MarginPolicy {
                warn_ltv: 0.60,
                call_ltv: 0.70,
                liquidation_ltv: 0.80,
            },
        }
    }

    /// The asset's risk characteristics.
    pub fn risk_characteristics(&self) -> RiskCharacteristics {
        match self {
            AssetType::Btc => RiskCharacteristics {
                liquidation_slippage: 0.05,
                volatility_multiplier: 1.0,
            },
            AssetType::Eth => RiskCharacteristics {
                liquidation_slippage: 0.07,
                volatility_multiplier: 1.2,
            },
            AssetType::Sol => RiskCharacteristics {
                liquidation_slippage: 0.10,
                volatility_multiplier: 1.5,
            },
        }
    }

    /// Base annualized volatility before any multipliers.
    pub fn base_volatility(&self) -> f64 {
        match self {
            AssetType::Btc => 0.60,
            AssetType::Eth => 0.80,
            AssetType::Sol => 1.00,
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Margin policy: LTV thresholds at which a loan escalates.
///
/// Invariant: `warn_ltv < call_ltv < liquidation_ltv`. The built-in
/// policies satisfy this by construction; [`MarginPolicy::new`] enforces it
/// for custom policies.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarginPolicy {
    /// LTV at which the position enters the warning band.
    pub warn_ltv: f64,
    /// LTV at which a margin call is issued.
    pub call_ltv: f64,
    /// LTV at which the position is liquidated.
    pub liquidation_ltv: f64,
}

impl MarginPolicy {
    /// Creates a custom margin policy.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::InvalidMarginThresholds` unless the thresholds
    /// are strictly increasing and all positive.
    pub fn new(warn_ltv: f64, call_ltv: f64, liquidation_ltv: f64) -> Result<Self, AssetError> {
        if !(warn_ltv > 0.0 && warn_ltv < call_ltv && call_ltv < liquidation_ltv) {
            return Err(AssetError::InvalidMarginThresholds {
                warn: warn_ltv,
                call: call_ltv,
                liquidation: liquidation_ltv,
            });
        }
        Ok(Self {
            warn_ltv,
            call_ltv,
            liquidation_ltv,
        })
    }
}

/// Risk characteristics of a collateral asset.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskCharacteristics {
    /// Fraction of collateral value lost to slippage on forced liquidation.
    pub liquidation_slippage: f64,
    /// Multiplier on the base volatility (riskier assets > 1).
    pub volatility_multiplier: f64,
}

impl RiskCharacteristics {
    /// Annualized volatility for the asset: base volatility times the
    /// asset's multiplier.
    #[inline]
    pub fn annual_volatility(&self, base: f64) -> f64 {
        base * self.volatility_multiplier
    }
}

/// A collateral position: asset type plus non-negative quantity.
///
/// # Examples
///
/// ```
/// use risk_core::assets::{AssetType, CollateralAsset};
///
/// let position = CollateralAsset::new(AssetType::Btc, 10.0).unwrap();
/// assert_eq!(position.value_usd(100_000.0), 1_000_000.0);
///
/// assert!(CollateralAsset::new(AssetType::Btc, -1.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollateralAsset {
    asset: AssetType,
    quantity: f64,
}

impl CollateralAsset {
    /// Creates a collateral position.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::NegativeQuantity` for negative quantities and
    /// `AssetError::NonFiniteQuantity` for NaN/infinite quantities. Zero
    /// is valid (a loan whose collateral has been fully withdrawn).
    pub fn new(asset: AssetType, quantity: f64) -> Result<Self, AssetError> {
        if !quantity.is_finite() {
            return Err(AssetError::NonFiniteQuantity { got: quantity });
        }
        if quantity < 0.0 {
            return Err(AssetError::NegativeQuantity { got: quantity });
        }
        Ok(Self { asset, quantity })
    }

    /// The asset type.
    #[inline]
    pub fn asset(&self) -> AssetType {
        self.asset
    }

    /// The quantity held.
    #[inline]
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// USD value of the position at the given unit price.
    #[inline]
    pub fn value_usd(&self, price: f64) -> f64 {
        self.quantity * price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_symbols() {
        assert_eq!(AssetType::Btc.symbol(), "BTC");
        assert_eq!(AssetType::Eth.symbol(), "ETH");
        assert_eq!(AssetType::Sol.symbol(), "SOL");
        assert_eq!(format!("{}", AssetType::Sol), "SOL");
    }

    #[test]
    fn test_asset_indices_match_canonical_order() {
        for (i, asset) in AssetType::ALL.iter().enumerate() {
            assert_eq!(asset.index(), i);
        }
    }

    #[test]
    fn test_margin_policies_strictly_increasing() {
        for asset in AssetType::ALL {
            let p = asset.margin_policy();
            assert!(
                p.warn_ltv < p.call_ltv && p.call_ltv < p.liquidation_ltv,
                "policy ordering violated for {}",
                asset
            );
        }
    }

    #[test]
    fn test_btc_margin_policy_values() {
        let p = AssetType::Btc.margin_policy();
        assert_eq!(p.warn_ltv, 0.70);
        assert_eq!(p.call_ltv, 0.80);
        assert_eq!(p.liquidation_ltv, 0.90);
    }

    #[test]
    fn test_custom_margin_policy_validation() {
        assert!(MarginPolicy::new(0.6, 0.7, 0.8).is_ok());
        assert!(MarginPolicy::new(0.7, 0.7, 0.8).is_err());
        assert!(MarginPolicy::new(0.8, 0.7, 0.9).is_err());
        assert!(MarginPolicy::new(-0.1, 0.7, 0.9).is_err());
    }

    #[test]
    fn test_risk_characteristics_ordering() {
        // Slippage and volatility both rise with asset risk.
        let btc = AssetType::Btc.risk_characteristics();
        let eth = AssetType::Eth.risk_characteristics();
        let sol = AssetType::Sol.risk_characteristics();

        assert!(btc.liquidation_slippage < eth.liquidation_slippage);
        assert!(eth.liquidation_slippage < sol.liquidation_slippage);
        assert!(btc.volatility_multiplier <= eth.volatility_multiplier);
        assert!(eth.volatility_multiplier <= sol.volatility_multiplier);
    }

    #[test]
    fn test_annual_volatility() {
        let sol = AssetType::Sol;
        let vol = sol
            .risk_characteristics()
            .annual_volatility(sol.base_volatility());
        assert!((vol - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_collateral_valid() {
        let c = CollateralAsset::new(AssetType::Eth, 25.0).unwrap();
        assert_eq!(c.asset(), AssetType::Eth);
        assert_eq!(c.quantity(), 25.0);
        assert_eq!(c.value_usd(4_000.0), 100_000.0);
    }

    #[test]
    fn test_collateral_zero_quantity_valid() {
        let c = CollateralAsset::new(AssetType::Btc, 0.0).unwrap();
        assert_eq!(c.value_usd(100_000.0), 0.0);
    }

    #[test]
    fn test_collateral_negative_rejected() {
        assert!(matches!(
            CollateralAsset::new(AssetType::Btc, -0.5),
            Err(AssetError::NegativeQuantity { .. })
        ));
    }

    #[test]
    fn test_collateral_non_finite_rejected() {
        assert!(CollateralAsset::new(AssetType::Btc, f64::NAN).is_err());
        assert!(CollateralAsset::new(AssetType::Btc, f64::INFINITY).is_err());
    }

    #[test]
    fn test_collateral_serde_roundtrip() {
        let c = CollateralAsset::new(AssetType::Sol, 1_000.0).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        let back: CollateralAsset = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
