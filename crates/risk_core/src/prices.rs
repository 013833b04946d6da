//! Validated market-price snapshots.
//!
//! The engine consumes prices as an immutable snapshot supplied by an
//! external market-data collaborator. Validation happens once, here, at
//! construction: a non-finite or non-positive price is a structural input
//! violation, not a market condition to be simulated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assets::AssetType;
use crate::error::PriceError;

/// Immutable snapshot of current USD prices per collateral asset.
///
/// # Examples
///
/// ```
/// use risk_core::assets::AssetType;
/// use risk_core::prices::CurrentPrices;
///
/// let prices = CurrentPrices::new([
///     (AssetType::Btc, 100_000.0),
///     (AssetType::Eth, 4_000.0),
///     (AssetType::Sol, 200.0),
/// ])
/// .unwrap();
///
/// assert_eq!(prices.get(AssetType::Btc), Some(100_000.0));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrentPrices {
    prices: BTreeMap<AssetType, f64>,
}

impl CurrentPrices {
    /// Creates a snapshot from (asset, price) pairs.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if any price is NaN, infinite, zero, or
    /// negative. Later pairs for the same asset overwrite earlier ones.
    pub fn new(pairs: impl IntoIterator<Item = (AssetType, f64)>) -> Result<Self, PriceError> {
        let mut prices = BTreeMap::new();
        for (asset, price) in pairs {
            if !price.is_finite() {
                return Err(PriceError::NonFinite { asset, got: price });
            }
            if price <= 0.0 {
                return Err(PriceError::NonPositive { asset, got: price });
            }
            prices.insert(asset, price);
        }
        Ok(Self { prices })
    }

    /// Price for an asset, if present in the snapshot.
    #[inline]
    pub fn get(&self, asset: AssetType) -> Option<f64> {
        self.prices.get(&asset).copied()
    }

    /// Whether the snapshot carries a price for every asset in the universe.
    pub fn is_complete(&self) -> bool {
        AssetType::ALL.iter().all(|a| self.prices.contains_key(a))
    }

    /// Iterates (asset, price) pairs in canonical asset order.
    pub fn iter(&self) -> impl Iterator<Item = (AssetType, f64)> + '_ {
        self.prices.iter().map(|(a, p)| (*a, *p))
    }
}
