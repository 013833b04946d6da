//! Synthetic historical price series for backtesting and charting.
//!
//! Walks forward hour by hour with the same correlated-shock machinery the
//! terminal-price simulator uses, but with the drift solved so each
//! asset's path terminates at a target current price:
//!
//! ```text
//! drift_per_step = ln(target / start) / total_steps
//! ```
//!
//! This lives with the engine only because it shares the correlation
//! transform; it is a data-provider concern for chart and backtest
//! features, not part of the risk core.

use risk_core::assets::AssetType;
use risk_core::math::{CholeskyFactor3, CorrelationTriple};
use risk_core::prices::CurrentPrices;

use crate::mc::SimulationError;
use crate::rng::SimRng;

/// Hours per year used by the hourly walk.
const HOURS_PER_YEAR: usize = 365 * 24;

/// Multi-year hourly price series for the full asset universe.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoricalSeries {
    /// Number of hourly points per asset (steps + 1, including the start).
    pub points: usize,
    /// Hourly prices per asset, indexed canonically ([`AssetType::index`]).
    pub prices: [Vec<f64>; 3],
}

impl HistoricalSeries {
    /// The series for one asset.
    #[inline]
    pub fn asset(&self, asset: AssetType) -> &[f64] {
        &self.prices[asset.index()]
    }
}

/// Generator of correlated synthetic price histories.
#[derive(Clone, Debug)]
pub struct HistoricalPathGenerator {
    cholesky: CholeskyFactor3,
    hourly_vols: [f64; 3],
}

impl HistoricalPathGenerator {
    /// Creates a generator with the given cross-asset correlations.
    ///
    /// Hourly volatility is each asset's unstressed annualized volatility
    /// scaled by `sqrt(1 / (365 × 24))`.
    pub fn new(correlations: CorrelationTriple) -> Self {
        let hourly_scale = (1.0 / HOURS_PER_YEAR as f64).sqrt();
        let mut hourly_vols = [0.0; 3];
        for asset in AssetType::ALL {
            let annual = asset
                .risk_characteristics()
                .annual_volatility(asset.base_volatility());
            hourly_vols[asset.index()] = annual * hourly_scale;
        }
        Self {
            cholesky: correlations.cholesky(),
            hourly_vols,
        }
    }

    /// Generates an hourly series over `years` years, walking each asset
    /// from its start price to its target price.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::MissingPrice` if either snapshot lacks a
    /// price for any universe asset, or `SimulationError::InvalidHorizon`
    /// for zero years.
    pub fn generate(
        &self,
        start: &CurrentPrices,
        target: &CurrentPrices,
        years: u32,
        rng: &mut SimRng,
    ) -> Result<HistoricalSeries, SimulationError> {
        if years == 0 {
            return Err(SimulationError::InvalidHorizon);
        }

        let mut start_prices = [0.0; 3];
        let mut drifts = [0.0; 3];
        let total_steps = years as usize * HOURS_PER_YEAR;
        for asset in AssetType::ALL {
            let i = asset.index();
            let s = start
                .get(asset)
                .ok_or(SimulationError::MissingPrice { asset })?;
            let t = target
                .get(asset)
                .ok_or(SimulationError::MissingPrice { asset })?;
            start_prices[i] = s;
            drifts[i] = (t / s).ln() / total_steps as f64;
        }

        let mut prices = [
            Vec::with_capacity(total_steps + 1),
            Vec::with_capacity(total_steps + 1),
            Vec::with_capacity(total_steps + 1),
        ];
        let mut current = start_prices;
        for i in 0..3 {
            prices[i].push(current[i]);
        }

        for _ in 0..total_steps {
            let z = [rng.gen_normal(), rng.gen_normal(), rng.gen_normal()];
            let w = self.cholesky.transform(z);
            for i in 0..3 {
                current[i] *= (drifts[i] + self.hourly_vols[i] * w[i]).exp();
                prices[i].push(current[i]);
            }
        }

        Ok(HistoricalSeries {
            points: total_steps + 1,
            prices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(btc: f64, eth: f64, sol: f64) -> CurrentPrices {
        CurrentPrices::new([
            (AssetType::Btc, btc),
            (AssetType::Eth, eth),
            (AssetType::Sol, sol),
        ])
        .unwrap()
    }

    fn generator() -> HistoricalPathGenerator {
        HistoricalPathGenerator::new(CorrelationTriple {
            ab: 0.85,
            ac: 0.75,
            bc: 0.80,
        })
    }

    #[test]
    fn test_series_shape() {
        let start = snapshot(30_000.0, 1_500.0, 50.0);
        let target = snapshot(100_000.0, 4_000.0, 200.0);
        let mut rng = SimRng::from_seed(1);

        let series = generator().generate(&start, &target, 1, &mut rng).unwrap();
        assert_eq!(series.points, 365 * 24 + 1);
        for asset in AssetType::ALL {
            assert_eq!(series.asset(asset).len(), series.points);
            assert!(series.asset(asset).iter().all(|p| p.is_finite() && *p > 0.0));
        }
    }

    #[test]
    fn test_series_starts_at_start_prices() {
        let start = snapshot(30_000.0, 1_500.0, 50.0);
        let target = snapshot(100_000.0, 4_000.0, 200.0);
        let mut rng = SimRng::from_seed(2);

        let series = generator().generate(&start, &target, 1, &mut rng).unwrap();
        assert_eq!(series.asset(AssetType::Btc)[0], 30_000.0);
        assert_eq!(series.asset(AssetType::Sol)[0], 50.0);
    }

    #[test]
    fn test_terminal_near_target_in_log_space() {
        // The drift calibration pins E[ln(terminal)] to ln(target); a
        // single realization lands within a few hourly-vol standard
        // deviations of it.
        let start = snapshot(30_000.0, 1_500.0, 50.0);
        let target = snapshot(100_000.0, 4_000.0, 200.0);
        let mut rng = SimRng::from_seed(3);

        let series = generator().generate(&start, &target, 2, &mut rng).unwrap();

        let steps = (2 * 365 * 24) as f64;
        for asset in AssetType::ALL {
            let terminal = *series.asset(asset).last().unwrap();
            let want = target.get(asset).unwrap();
            let annual = asset
                .risk_characteristics()
                .annual_volatility(asset.base_volatility());
            let path_std = annual * (1.0f64 / (365.0 * 24.0)).sqrt() * steps.sqrt();
            let log_miss = (terminal / want).ln().abs();
            assert!(
                log_miss < 4.0 * path_std,
                "{} terminal {} vs target {} ({} stds)",
                asset,
                terminal,
                want,
                log_miss / path_std
            );
        }
    }

    #[test]
    fn test_zero_years_rejected() {
        let start = snapshot(1.0, 1.0, 1.0);
        let mut rng = SimRng::from_seed(4);
        assert!(matches!(
            generator().generate(&start, &start, 0, &mut rng),
            Err(SimulationError::InvalidHorizon)
        ));
    }

    #[test]
    fn test_missing_price_rejected() {
        let start = CurrentPrices::new([(AssetType::Btc, 1.0)]).unwrap();
        let full = snapshot(1.0, 1.0, 1.0);
        let mut rng = SimRng::from_seed(5);
        assert!(matches!(
            generator().generate(&start, &full, 1, &mut rng),
            Err(SimulationError::MissingPrice { .. })
        ));
    }

    #[test]
    fn test_deterministic_given_seed() {
        let start = snapshot(30_000.0, 1_500.0, 50.0);
        let target = snapshot(100_000.0, 4_000.0, 200.0);

        let a = generator()
            .generate(&start, &target, 1, &mut SimRng::from_seed(6))
            .unwrap();
        let b = generator()
            .generate(&start, &target, 1, &mut SimRng::from_seed(6))
            .unwrap();
        assert_eq!(a, b);
    }
}
